// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Anisotropic Smith-GGX microfacet model, VNDF-sampled (Heitz 2018).
//!
//! Directions here live in the `bxdf::local` shading frame, so `w.y`
//! is `cosθ`. This is the crate's single microfacet formulation; every
//! microfacet-backed `BxDf` in `microfacet_bxdf`/`conductor`/`plastic`
//! goes through it rather than carrying its own `D`/`Λ`/sampling code.

use geometry::prelude::*;

/// per-axis GGX roughness. A single-roughness material remaps to
/// `alpha_x == alpha_y` at construction so there is exactly one
/// distribution/sampling path, isotropic or not.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Roughness {
    pub alpha_x: Float,
    pub alpha_y: Float,
}

impl Roughness {
    pub fn isotropic(alpha: Float) -> Roughness {
        Roughness { alpha_x: alpha, alpha_y: alpha }
    }

    pub fn anisotropic(alpha_x: Float, alpha_y: Float) -> Roughness {
        Roughness { alpha_x, alpha_y }
    }
}

/// Smith-GGX microfacet distribution and masking, over `alpha`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Microfacet {
    pub alpha: Roughness,
}

impl Microfacet {
    pub fn new(alpha: Roughness) -> Microfacet {
        Microfacet { alpha }
    }

    /// normal distribution function at half vector `m` (local frame)
    pub fn distribution(&self, m: Vector3f) -> Float {
        let ax = self.alpha.alpha_x;
        let ay = self.alpha.alpha_y;
        let x = m.x * m.x / (ax * ax) + m.y * m.y + m.z * m.z / (ay * ay);
        1.0 as Float / (float::pi() * ax * ay * x * x)
    }

    fn lambda(&self, w: Vector3f) -> Float {
        let ax = self.alpha.alpha_x;
        let ay = self.alpha.alpha_y;
        let x = (ax * ax * w.x * w.x + ay * ay * w.z * w.z) / (w.y * w.y);
        (-1.0 as Float + (1.0 as Float + x).sqrt()) * 0.5 as Float
    }

    /// Smith masking for a single direction
    pub fn g1(&self, w: Vector3f) -> Float {
        1.0 as Float / (1.0 as Float + self.lambda(w))
    }

    /// Smith joint masking-shadowing for an incident/outgoing pair
    pub fn g2(&self, i: Vector3f, o: Vector3f) -> Float {
        1.0 as Float / (1.0 as Float + self.lambda(i) + self.lambda(o))
    }

    /// VNDF sampling of the half vector, given incident direction `i`
    /// and a uniform 2D sample
    pub fn sample_m(&self, i: Vector3f, u: Point2f) -> Vector3f {
        let ax = self.alpha.alpha_x;
        let ay = self.alpha.alpha_y;

        let ih = Vector3f::new(ax * i.x, i.y, ay * i.z).normalize();

        let lensq = ih.x * ih.x + ih.z * ih.z;
        let t1 = if lensq > 0.0 as Float {
            Vector3f::new(-ih.z, 0.0 as Float, ih.x) / lensq.sqrt()
        } else {
            Vector3f::new(1.0 as Float, 0.0 as Float, 0.0 as Float)
        };
        let t2 = ih.cross(t1);

        let r = u.x.sqrt();
        let phi = 2.0 as Float * float::pi() * u.y;
        let x1 = r * phi.cos();
        let mut x2 = r * phi.sin();
        let s = 0.5 as Float * (1.0 as Float + ih.y);
        x2 = (1.0 as Float - s) * (1.0 as Float - x1 * x1).max(0.0 as Float).sqrt() + s * x2;

        let nh = x1 * t1 + x2 * t2 + (1.0 as Float - x1 * x1 - x2 * x2).max(0.0 as Float).sqrt() * ih;
        Vector3f::new(ax * nh.x, nh.y.max(0.0 as Float), ay * nh.z).normalize()
    }

    /// pdf (solid angle, about `m`) of `sample_m`'s output
    pub fn pdf(&self, i: Vector3f, m: Vector3f) -> Float {
        self.g1(i) * i.dot(m).max(0.0 as Float) * self.distribution(m) / i.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isotropic_distribution_peaks_at_normal() {
        let m = Microfacet::new(Roughness::isotropic(0.2 as Float));
        let at_normal = m.distribution(Vector3f::new(0.0 as Float, 1.0 as Float, 0.0 as Float));
        let tilted = m.distribution(Vector3f::new(0.2 as Float, 0.9797959 as Float, 0.0 as Float));
        assert!(at_normal > tilted);
    }

    #[test]
    fn g1_is_bounded_unit_interval() {
        let m = Microfacet::new(Roughness::isotropic(0.5 as Float));
        let w = Vector3f::new(0.3 as Float, 0.9 as Float, 0.1 as Float).normalize();
        let g = m.g1(w);
        assert!(g > 0.0 as Float && g <= 1.0 as Float);
    }

    #[test]
    fn sampled_half_vector_is_in_upper_hemisphere() {
        let m = Microfacet::new(Roughness::isotropic(0.3 as Float));
        let i = Vector3f::new(0.2 as Float, 0.8 as Float, 0.1 as Float).normalize();
        for k in 0..16 {
            let u = Point2f::new((k as Float + 0.5 as Float) / 16.0 as Float, 0.37 as Float);
            let m_sampled = m.sample_m(i, u);
            assert!(m_sampled.y >= 0.0 as Float);
        }
    }
}
