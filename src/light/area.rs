// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A light bound to a `Surface`, emitting uniform diffuse radiance
//! from its front side.

use bxdf::local::sample_cosine_hemisphere;
use geometry::prelude::*;
use sample::distribution::Distribution1D;
use sample::pdf_cosw_hemisphere;
use shape::Surface;
use spectrum::RGBSpectrumf;
use std::sync::Arc;
use super::LightSample;

/// A diffuse area light bound to a `Surface`; every primitive the
/// surface exposes emits the same radiance. Primitives are picked
/// proportional to area so the aggregate pdf over the whole surface
/// stays uniform (`1 / total_area`).
pub struct AreaLight {
    surface: Arc<dyn Surface>,
    /// constant emitted radiance from the front side
    radiance: RGBSpectrumf,
    primitive_distribution: Distribution1D,
    total_area: Float,
}

impl AreaLight {
    pub fn new(surface: Arc<dyn Surface>, radiance: RGBSpectrumf) -> AreaLight {
        let areas: Vec<Float> = (0..surface.primitive_count()).map(|i| surface.area(i)).collect();
        let total_area = areas.iter().sum();
        let primitive_distribution = Distribution1D::new(areas);
        AreaLight { surface, radiance, primitive_distribution, total_area }
    }

    pub fn surface(&self) -> &Arc<dyn Surface> {
        &self.surface
    }

    /// brute-force intersection against this light's own surface,
    /// used by `pdf_wi` to recover the hit distance/normal for a given
    /// direction without going through the scene's acceleration
    /// structure
    fn raycast(&self, ray: &RawRay, t_max: Float) -> Option<(Float, Vector3f)> {
        let mut best: Option<(Float, usize)> = None;
        let mut t_max = t_max;
        for i in 0..self.surface.primitive_count() {
            if let Some(t) = self.surface.raycast(i, ray, t_max) {
                t_max = t;
                best = Some((t, i));
            }
        }
        best.map(|(t, primitive)| {
            let p = ray.evaluate(t);
            (t, self.surface.normal_at(primitive, p))
        })
    }
}

impl super::AreaLight for AreaLight {
    fn le(&self, normal: Vector3f, w: Vector3f) -> RGBSpectrumf {
        if normal.dot(w) <= 0.0 as Float {
            RGBSpectrumf::new(0.0 as Float, 0.0 as Float, 0.0 as Float)
        } else {
            self.radiance
        }
    }

    fn sample_wi(&self, reference: Point3f, u: Point2f) -> Option<LightSample> {
        let (primitive, pdf_primitive, remapped_u) = self.primitive_distribution.sample_discrete(u.x);
        let (p, n) = self.surface.sample_p(primitive, Point2f::new(remapped_u, u.y));
        let d = p - reference;
        let dist2 = d.magnitude2();
        if dist2 == 0.0 as Float {
            return None;
        }
        let wi = d / dist2.sqrt();
        let cos_light = n.dot(-wi).abs();
        if cos_light == 0.0 as Float {
            return None;
        }
        let pdf_area = pdf_primitive * self.surface.pdf_p(primitive, p);
        let pdf_wi = pdf_area * dist2 / cos_light;
        let li = self.le(n, -wi);
        Some(LightSample { wi, pdf_wi, li, visibility_point: p })
    }

    fn pdf_wi(&self, reference: Point3f, wi: Vector3f) -> Float {
        let ray = RawRay::from_od(reference, wi);
        if let Some((t, n)) = self.raycast(&ray, float::infinity()) {
            let p = ray.evaluate(t);
            let d = p - reference;
            let dist2 = d.magnitude2();
            // area pdf, uniform over the whole surface since
            // primitives are picked proportional to their own area
            let pdf_area = 1.0 as Float / self.total_area;
            let cos_light = n.dot(-wi).abs().max(1e-4 as Float);
            pdf_area * dist2 / cos_light
        } else {
            0.0 as Float
        }
    }

    fn power(&self) -> RGBSpectrumf {
        self.radiance * (float::pi() * self.total_area)
    }

    fn sample_le(&self, u_pos: Point2f, u_dir: Point2f) -> Option<super::EmissionSample> {
        let (primitive, pdf_primitive, remapped_u) = self.primitive_distribution.sample_discrete(u_pos.x);
        let (p, n) = self.surface.sample_p(primitive, Point2f::new(remapped_u, u_pos.y));
        let pdf_pos = pdf_primitive * self.surface.pdf_p(primitive, p);
        let (direction, pdf_dir) = sample_emission_direction(n, u_dir);
        if pdf_dir <= 0.0 as Float {
            return None;
        }
        let le = self.le(n, direction);
        Some(super::EmissionSample { position: p, normal: n, direction, pdf_pos, pdf_dir, le })
    }
}

/// cosine-weighted direction sampling, used by `sample_le` to pick an
/// emission direction over the light's own front hemisphere.
fn sample_emission_direction(normal: Vector3f, u: Point2f) -> (Vector3f, Float) {
    let frame = Frame::from_normal(normal);
    let local = sample_cosine_hemisphere(u);
    let pdf = pdf_cosw_hemisphere(local.y.abs());
    (frame.local_to_world(local), pdf)
}
