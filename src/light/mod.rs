// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Light sources: surfaces that emit (`AreaLight`) and the
//! environment (`InfinityAreaLight`).

use geometry::prelude::*;
use spectrum::RGBSpectrumf;

pub mod area;
pub mod infinity;
pub mod prelude;

pub use self::area::AreaLight;
pub use self::infinity::InfinityAreaLight;

/// Outcome of sampling one incident direction from a light, toward a
/// shading point.
#[derive(Copy, Clone, Debug)]
pub struct LightSample {
    /// sampled incident direction, world space, pointing away from the
    /// shading point toward the light
    pub wi: Vector3f,
    /// pdf of `wi` wrt solid angle at the shading point
    pub pdf_wi: Float,
    /// incident radiance carried by `wi`
    pub li: RGBSpectrumf,
    /// a point on the light to shadow-test visibility against
    pub visibility_point: Point3f,
}

/// Outcome of sampling an emission point and outgoing direction from a
/// light, the first vertex of a light subpath (§4.10, Backward and
/// Bidirectional). Distinct from `LightSample`, which samples a
/// direction *toward* a reference point rather than an independent
/// emission ray.
#[derive(Copy, Clone, Debug)]
pub struct EmissionSample {
    pub position: Point3f,
    /// outward-facing normal at `position`
    pub normal: Vector3f,
    /// direction the emitted particle travels
    pub direction: Vector3f,
    /// pdf of `position` wrt area
    pub pdf_pos: Float,
    /// pdf of `direction` wrt solid angle around `normal`
    pub pdf_dir: Float,
    pub le: RGBSpectrumf,
}

/// A light that emits from a bounded surface. Also implements the
/// "environment" special case (`InfinityAreaLight`), whose
/// `visibility_point` sampling instead returns a point on the scene's
/// bounding sphere.
pub trait AreaLight: Send + Sync {
    /// emitted radiance leaving `p` (on this light's surface) toward
    /// `w`; zero if `w` leaves through the back side
    fn le(&self, normal: Vector3f, w: Vector3f) -> RGBSpectrumf;

    /// importance-sample an incident direction from `reference`
    fn sample_wi(&self, reference: Point3f, u: Point2f) -> Option<LightSample>;

    /// pdf (wrt solid angle at `reference`) of the direction `wi`
    /// sampled by `sample_wi`
    fn pdf_wi(&self, reference: Point3f, wi: Vector3f) -> Float;

    /// total emitted power
    fn power(&self) -> RGBSpectrumf;

    /// `true` for the environment light; callers special-case the
    /// first-miss visibility flag (§4.9) only for it
    #[inline]
    fn is_infinite(&self) -> bool {
        false
    }

    /// importance-sample a standalone emission ray, for a light
    /// subpath's first vertex. `None` for lights that can't support
    /// one; the default. `AreaLight` (the concrete surface light) and
    /// `InfinityAreaLight` both override this.
    fn sample_le(&self, u_pos: Point2f, u_dir: Point2f) -> Option<EmissionSample> {
        let _ = (u_pos, u_dir);
        None
    }
}
