// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Local-shading-frame helpers for the BxDF layer.
//!
//! Everywhere else in this crate the macro-normal of a local frame sits on
//! the z axis (`geometry::foundamental::normal`). The BSDF/microfacet
//! formulas in this crate instead treat the **y** axis as the macro-normal,
//! matching the engine this renderer's math was grounded on. Rather than
//! flip the whole crate's convention, the two live side by side: shapes and
//! rays keep z-up, and `material::bsdf::Bsdf` builds its local frame so
//! that `y` is the shading normal before handing directions to any `BxDf`.

use geometry::prelude::*;
use sample::sample_concentric_disk;

#[inline]
pub fn cos_theta(w: Vector3f) -> Float {
    w.y
}

#[inline]
pub fn cos2_theta(w: Vector3f) -> Float {
    w.y * w.y
}

#[inline]
pub fn sin2_theta(w: Vector3f) -> Float {
    (1.0 as Float - cos2_theta(w)).max(0.0 as Float)
}

#[inline]
pub fn sin_theta(w: Vector3f) -> Float {
    sin2_theta(w).sqrt()
}

#[inline]
pub fn tan2_theta(w: Vector3f) -> Float {
    sin2_theta(w) / cos2_theta(w)
}

#[inline]
pub fn same_hemisphere(a: Vector3f, b: Vector3f) -> bool {
    a.y * b.y > 0.0 as Float
}

/// Mirror `w` about the macro-normal `(0, 1, 0)`.
#[inline]
pub fn reflect(w: Vector3f) -> Vector3f {
    Vector3f::new(-w.x, w.y, -w.z)
}

/// Mirror `w` about an arbitrary local normal `n`.
#[inline]
pub fn reflect_about(w: Vector3f, n: Vector3f) -> Vector3f {
    -w + n * (2.0 as Float * w.dot(n))
}

/// Refract `i` (pointing away from the surface, local frame) across an
/// interface of relative index `eta = eta_i / eta_t`, using the local
/// macro-normal. Returns `None` on total internal reflection.
pub fn refract(i: Vector3f, eta: Float) -> Option<Vector3f> {
    let cos_theta_i = cos_theta(i);
    let sin2_theta_i = sin2_theta(i);
    let sin2_theta_t = eta * eta * sin2_theta_i;
    if sin2_theta_t >= 1.0 as Float {
        return None;
    }
    let cos_theta_t = (1.0 as Float - sin2_theta_t).sqrt();
    let n = if cos_theta_i >= 0.0 as Float {
        Vector3f::new(0.0 as Float, 1.0 as Float, 0.0 as Float)
    } else {
        Vector3f::new(0.0 as Float, -1.0 as Float, 0.0 as Float)
    };
    Some(-i * eta + n * (eta * cos_theta_i.abs() - cos_theta_t))
}

/// Cosine-weighted hemisphere sample in this module's y-up convention:
/// `o.y` carries `cos(theta)`, unlike `sample::sample_cosw_hemisphere`
/// (z-up) used by the rest of the crate.
#[inline]
pub fn sample_cosine_hemisphere(u: Point2f) -> Vector3f {
    let d = sample_concentric_disk(u);
    let y = (1.0 as Float - d.x * d.x - d.y * d.y).max(0.0 as Float).sqrt();
    Vector3f::new(d.x, y, d.y)
}

/// Refract `w` about an arbitrary normal `n` (e.g. a sampled microfacet
/// half vector, rather than the macro-normal), at relative index `eta`.
/// Returns `None` on total internal reflection.
pub fn refract_about(w: Vector3f, n: Vector3f, eta: Float) -> Option<Vector3f> {
    let cos_theta_i = n.dot(w);
    let sin2_theta_i = (1.0 as Float - cos_theta_i * cos_theta_i).max(0.0 as Float);
    let sin2_theta_t = eta * eta * sin2_theta_i;
    if sin2_theta_t >= 1.0 as Float {
        return None;
    }
    let cos_theta_t = (1.0 as Float - sin2_theta_t).sqrt();
    Some(-w * eta + n * (eta * cos_theta_i - cos_theta_t))
}
