// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The environment light: radiance arriving from infinity, indexed by
//! direction through a 2D texture in `(u = 1 - phi/2pi, v = theta/pi)`.

use geometry::prelude::*;
use sample::distribution::Distribution2D;
use sample::sample_concentric_disk;
use spectrum::RGBSpectrumf;
use std::sync::Arc;
use texturing::Texture2D;
use super::LightSample;

/// direction -> `(u, v)` lookup into the environment texture
#[inline]
fn direction_to_uv(w: Vector3f) -> Point2f {
    let sph = Sphericalf::from_vec(w.normalize());
    let u = 1.0 as Float - sph.phi * (0.5 as Float * float::frac_1_pi());
    let v = sph.theta * float::frac_1_pi();
    Point2f::new(u, v)
}

#[inline]
fn uv_to_direction(uv: Point2f) -> Vector3f {
    let phi = (1.0 as Float - uv.x) * 2.0 as Float * float::pi();
    let theta = uv.y * float::pi();
    Sphericalf::new(theta, phi).to_vec()
}

/// The environment: a distant, infinitely large emitter whose radiance
/// only depends on direction. Must be `set_scene_bounds` before it can
/// be sampled, since its sampled-direction visibility point is placed
/// on the scene's bounding sphere.
pub struct InfinityAreaLight {
    radiance: Arc<dyn Texture2D<RGBSpectrumf>>,
    strength: Float,
    distribution: Distribution2D,
    /// `(center, radius)`, populated by `set_scene_bounds`
    bounds: (Point3f, Float),
    /// whether an escaping primary camera ray sees this light directly
    /// (§4.8/§9's resolved Open Question): only gates that one case,
    /// never the light's role as an importance-sampled source or a
    /// bidirectional path endpoint.
    visible_to_camera: bool,
}

impl InfinityAreaLight {
    /// `nu`/`nv` give the resolution of the importance distribution
    /// built over `radiance`; the luminance proxy used is the texture's
    /// red+green+blue sum, weighted by `sin(theta)` as §4.8 requires.
    pub fn new(
        radiance: Arc<dyn Texture2D<RGBSpectrumf>>,
        strength: Float,
        nu: usize,
        nv: usize,
        visible_to_camera: bool,
    ) -> InfinityAreaLight {
        assert!(nu > 0 && nv > 0);
        let mut func = Vec::with_capacity(nu * nv);
        for v in 0..nv {
            let theta = (v as Float + 0.5 as Float) / nv as Float * float::pi();
            let sintheta = theta.sin();
            for u in 0..nu {
                let uv0 = Point2f::new(u as Float / nu as Float, v as Float / nv as Float);
                let uv1 = Point2f::new((u + 1) as Float / nu as Float, (v + 1) as Float / nv as Float);
                let c = radiance.integrate(uv0, uv1);
                func.push((c.r() + c.g() + c.b()) * sintheta);
            }
        }
        let distribution = Distribution2D::new(&func, nu);
        InfinityAreaLight {
            radiance,
            strength,
            distribution,
            bounds: (Point3f::new(0.0 as Float, 0.0 as Float, 0.0 as Float), 1.0 as Float),
            visible_to_camera,
        }
    }

    /// radiance arriving from direction `w`, world space, unit length
    pub fn li(&self, w: Vector3f) -> RGBSpectrumf {
        self.radiance.evaluate(direction_to_uv(w)) * self.strength
    }

    /// whether an escaping primary camera ray should see this light
    pub fn visible_to_camera(&self) -> bool {
        self.visible_to_camera
    }

    /// populate the bounding sphere used to place a finite visibility
    /// point for a sampled direction; must be called before rendering
    pub fn set_scene_bounds(&mut self, bounds: BBox3f) {
        self.bounds = bounds.bsphere();
    }
}

impl super::AreaLight for InfinityAreaLight {
    /// `normal` is unused: the environment has no surface, so `w` alone
    /// (the direction the look-up ray travels) determines the radiance.
    fn le(&self, _normal: Vector3f, w: Vector3f) -> RGBSpectrumf {
        self.li(w)
    }

    fn sample_wi(&self, reference: Point3f, u: Point2f) -> Option<LightSample> {
        let (uv, pdf_uv) = self.distribution.sample_continuous(u);
        if pdf_uv == 0.0 as Float {
            return None;
        }
        let wi = uv_to_direction(uv);
        let sintheta = (uv.y * float::pi()).sin();
        if sintheta == 0.0 as Float {
            return None;
        }
        let pdf_wi = pdf_uv / (2.0 as Float * float::pi() * float::pi() * sintheta);
        let (center, radius) = self.bounds;
        let visibility_point = reference + wi * (2.0 as Float * radius + (center - reference).magnitude());
        Some(LightSample { wi, pdf_wi, li: self.li(wi), visibility_point })
    }

    fn pdf_wi(&self, _reference: Point3f, wi: Vector3f) -> Float {
        let uv = direction_to_uv(wi);
        let sintheta = (uv.y * float::pi()).sin();
        if sintheta == 0.0 as Float {
            return 0.0 as Float;
        }
        self.distribution.pdf(uv) / (2.0 as Float * float::pi() * float::pi() * sintheta)
    }

    fn power(&self) -> RGBSpectrumf {
        let (_, radius) = self.bounds;
        // crude but consistent estimate: average radiance times the
        // disk the scene presents to the environment
        let mut sum = RGBSpectrumf::new(0.0 as Float, 0.0 as Float, 0.0 as Float);
        let n = 64usize;
        for iv in 0..n {
            let v = (iv as Float + 0.5 as Float) / n as Float;
            let theta = v * float::pi();
            for iu in 0..n {
                let u = (iu as Float + 0.5 as Float) / n as Float;
                let w = uv_to_direction(Point2f::new(u, v));
                sum += self.li(w) * theta.sin();
            }
        }
        let dudv = (float::pi() * float::pi()) / (n * n) as Float;
        sum * (dudv * float::pi() * radius * radius)
    }

    /// Samples a standalone emission ray for a light subpath started from
    /// the environment (§4.10, "environment-started paths"): a direction
    /// `d` off the same importance distribution `sample_wi` draws from,
    /// then a point on a disk of the scene's bounding radius, perpendicular
    /// to `d` and offset to the far side, so the particle travels `-d`
    /// back into the scene. `normal` is set to the travel direction itself
    /// (there's no surface here, only a consistent sign for the caller's
    /// ray-offset epsilon).
    fn sample_le(&self, u_pos: Point2f, u_dir: Point2f) -> Option<super::EmissionSample> {
        let (uv, pdf_uv) = self.distribution.sample_continuous(u_dir);
        if pdf_uv == 0.0 as Float {
            return None;
        }
        let d = uv_to_direction(uv);
        let sintheta = (uv.y * float::pi()).sin();
        if sintheta == 0.0 as Float {
            return None;
        }
        let pdf_dir = pdf_uv / (2.0 as Float * float::pi() * float::pi() * sintheta);

        let direction = -d;
        let (center, radius) = self.bounds;
        let frame = Frame::from_normal(direction);
        let disk = sample_concentric_disk(u_pos);
        // disk centered on the far side in the direction radiance arrives
        // from (`d`), so the particle starts outside the scene and travels
        // `-d` back into it.
        let position = center + d * radius
            + frame.tangent() * (disk.x * radius)
            + frame.bitangent() * (disk.y * radius);
        let pdf_pos = 1.0 as Float / (float::pi() * radius * radius);
        let le = self.li(d);

        Some(super::EmissionSample { position, normal: direction, direction, pdf_pos, pdf_dir, le })
    }

    #[inline]
    fn is_infinite(&self) -> bool {
        true
    }
}
