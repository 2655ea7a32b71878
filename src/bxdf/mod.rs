// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The canonical bidirectional distribution function (BxDF) layer.
//!
//! A BxDF is one scattering lobe, evaluated and sampled entirely in its
//! local shading frame (see `local`). The container that aggregates several
//! lobes into one surface response lives in `material::bsdf`.

use geometry::prelude::*;
use spectrum::RGBSpectrumf;

pub mod local;
pub mod fresnel;
pub mod microfacet;
pub mod lambertian;
pub mod specular;
pub mod microfacet_bxdf;
pub mod plastic;
pub mod conductor;
pub mod normalmap;

/// Whether a lobe can be found by continuous sampling (`Standard`) or only
/// ever hit exactly (`Delta`, e.g. perfect mirrors/specular glass).
/// Delta lobes contribute to `sample` but never to `evaluate`/`pdf`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BxdfKind {
    Standard,
    Delta,
}

/// Outcome of sampling a lobe's outgoing direction given an incoming one.
#[derive(Copy, Clone, Debug)]
pub struct BxdfSample {
    /// sampled direction, in the same local frame as the inputs
    pub o: Vector3f,
    /// lobe value for `(i, o)`
    pub f: RGBSpectrumf,
    /// pdf of `o` with respect to solid angle (meaningless for delta lobes,
    /// conventionally reported as 1 so mixture-container math stays well
    /// defined)
    pub pdf_o: Float,
}

/// One scattering lobe. All directions are unit vectors in the local
/// shading frame (`local`'s y-up convention); the BSDF container performs
/// world<->local transforms, so concrete lobes never see a `Frame`.
pub trait BxDf {
    /// `Standard` or `Delta`.
    fn kind(&self) -> BxdfKind;

    /// `f(i, o)` for the interface between media of refractive index
    /// `eta_a` (on the `i` side) and `eta_b` (on the `o` side). Always
    /// zero for `Delta` lobes (they are a set of measure zero).
    fn evaluate(&self, i: Vector3f, o: Vector3f, eta_a: Float, eta_b: Float) -> RGBSpectrumf;

    /// Sample an outgoing direction given an incoming one, or `None` if the
    /// sample is geometrically inadmissible (e.g. total internal reflection
    /// requested on the transmissive branch of a specular glass).
    fn sample(&self, i: Vector3f, eta_a: Float, eta_b: Float, u: Point2f) -> Option<BxdfSample>;

    /// pdf of `o` given `i`, with respect to solid angle. Zero for `Delta`
    /// lobes.
    fn pdf(&self, i: Vector3f, o: Vector3f, eta_a: Float, eta_b: Float) -> Float;
}
