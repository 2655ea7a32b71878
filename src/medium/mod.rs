// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Homogeneous participating media attenuating a ray between two points.
//!
//! Scattering (in-scattering/phase functions) is out of scope; a medium
//! here only attenuates radiance along a straight segment, which is
//! enough to model tinted glass/liquids via Beer-Lambert absorption.

use geometry::prelude::*;
use spectrum::RGBSpectrumf;

/// Attenuates radiance traveling in a straight line through some
/// volume. Surfaces that bound a medium reference it from their
/// `SurfacePoint::medium`; the side a ray enters is resolved by the
/// nested-dielectric priority stack in `scene`.
pub trait Medium {
    /// Transmittance of the straight segment from `a` to `b`.
    fn transmittance(&self, a: Point3f, b: Point3f) -> RGBSpectrumf;
}

/// The medium of empty space: perfectly transparent.
#[derive(Copy, Clone, Debug, Default)]
pub struct Vacuum;

impl Medium for Vacuum {
    #[inline]
    fn transmittance(&self, _a: Point3f, _b: Point3f) -> RGBSpectrumf {
        RGBSpectrumf::new(1.0 as Float, 1.0 as Float, 1.0 as Float)
    }
}

/// A homogeneous absorbing medium: Beer-Lambert attenuation with a
/// per-channel absorption `color` and scalar `density`.
#[derive(Copy, Clone, Debug)]
pub struct Homogeneous {
    pub color: RGBSpectrumf,
    pub density: Float,
}

impl Homogeneous {
    pub fn new(color: RGBSpectrumf, density: Float) -> Homogeneous {
        Homogeneous { color, density }
    }
}

impl Medium for Homogeneous {
    fn transmittance(&self, a: Point3f, b: Point3f) -> RGBSpectrumf {
        let d = (b - a).magnitude();
        let exponent = self.color * (-self.density * d);
        RGBSpectrumf::new(exponent.r().exp(), exponent.g().exp(), exponent.b().exp())
    }
}
