// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Helpers shared by every integrator: the measurement-direction stream
//! name, a zero check for early-out, and the light-sampling pdf query
//! `sample_one_light` leaves split across `Scene`/`AreaLight`.

use geometry::prelude::*;
use light::AreaLight;
use sample::power_heuristic;
use scene::Scene;
use spectrum::RGBSpectrumf;

/// named stream every integrator declares for its primary camera sample
pub const STREAM_FILM: &str = "film";
/// named stream for next-event-estimation light picks (`u` for which
/// light, `u1`/`u2` for the point/direction on it)
pub const STREAM_LIGHT_PICK: &str = "light-pick";
pub const STREAM_LIGHT_SAMPLE: &str = "light-sample";
/// named stream for bsdf lobe-pick + direction sampling
pub const STREAM_BSDF_PICK: &str = "bsdf-pick";
pub const STREAM_BSDF_SAMPLE: &str = "bsdf-sample";

#[inline]
pub fn is_black(c: RGBSpectrumf) -> bool {
    c.r() <= 0.0 as Float && c.g() <= 0.0 as Float && c.b() <= 0.0 as Float
}

/// The solid-angle pdf `scene.sample_one_light` would assign to `wi`
/// from `reference`, for MIS against a bsdf-sampled direction: the
/// discrete pick probability times the light's own directional pdf.
pub fn light_pdf(scene: &Scene, light: &dyn AreaLight, reference: Point3f, wi: Vector3f) -> Float {
    scene.pdf_one_light(light) * light.pdf_wi(reference, wi)
}

#[inline]
pub fn mis_weight(pdf_a: Float, pdf_b: Float) -> Float {
    power_heuristic(1, pdf_a, 1, pdf_b)
}
