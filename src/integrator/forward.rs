// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Unidirectional, MIS-weighted next-event estimation: one path grown
//! from the sensor, attempting a light connection at every non-delta
//! vertex and adding whatever the bsdf-sampled ray itself hits, weighted
//! so neither strategy double-counts. Grounded on the teacher's
//! `renderer::pt::PTRenderer`/`calculate_lighting` (same NEE + MIS
//! structure), rebuilt over the nested-dielectric `raycast_nested` walk
//! instead of a flat `Composable::intersect`.

use arena::PagedArena;
use bxdf::BxdfKind;
use error::RenderError;
use geometry::prelude::*;
use integrator::common::{
    is_black, light_pdf, mis_weight, STREAM_BSDF_PICK, STREAM_BSDF_SAMPLE, STREAM_FILM,
    STREAM_LIGHT_PICK, STREAM_LIGHT_SAMPLE,
};
use integrator::Integrator;
use light::AreaLight;
use material::bsdf::Bsdf;
use render::sensor::Sensor;
use render::target::Measurement;
use sample::pixel::PixelSampler;
use scene::priority::{raycast_nested, PriorityStack};
use scene::Scene;
use spectrum::{RGBSpectrumf, Spectrum};

/// Forward path tracer with multiple importance sampling between light
/// and bsdf sampling (§4.10, Forward-MIS).
pub struct ForwardIntegrator {
    max_path_length: usize,
}

impl ForwardIntegrator {
    pub fn new(max_path_length: usize) -> ForwardIntegrator {
        ForwardIntegrator { max_path_length }
    }

    /// One next-event-estimation attempt from `reference`, toward a
    /// light picked proportional to power. `None` when the scene has no
    /// lights, the pick is occluded, or the bsdf has no response there.
    fn sample_light<'a>(
        &self,
        scene: &'a Scene,
        sampler: &mut PixelSampler,
        bsdf: &Bsdf<'a>,
        reference: Point3f,
        wo: Vector3f,
        shading_normal: Vector3f,
        eta_a: Float,
        eta_b: Float,
    ) -> RGBSpectrumf {
        let u_pick = sampler.get_1d(STREAM_LIGHT_PICK);
        let (light, pick_pdf) = match scene.sample_one_light(u_pick) {
            Some(x) => x,
            None => return RGBSpectrumf::black(),
        };
        if pick_pdf <= 0.0 as Float {
            return RGBSpectrumf::black();
        }
        let u = sampler.get_2d(STREAM_LIGHT_SAMPLE);
        let sample = match light.sample_wi(reference, u) {
            Some(s) => s,
            None => return RGBSpectrumf::black(),
        };
        if sample.pdf_wi <= 0.0 as Float || is_black(sample.li) {
            return RGBSpectrumf::black();
        }
        let f = bsdf.evaluate(wo, sample.wi, eta_a, eta_b) * sample.wi.dot(shading_normal).abs();
        if is_black(f) {
            return RGBSpectrumf::black();
        }
        if !scene.visible(reference, sample.visibility_point) {
            return RGBSpectrumf::black();
        }
        let light_pdf_full = pick_pdf * sample.pdf_wi;
        let bsdf_pdf = bsdf.pdf(wo, sample.wi, eta_a, eta_b);
        let weight = mis_weight(light_pdf_full, bsdf_pdf);
        f * sample.li * (weight / light_pdf_full)
    }
}

impl Integrator for ForwardIntegrator {
    fn declare_streams(&self, sampler: &mut PixelSampler) {
        sampler.declare_measurement_direction(STREAM_FILM);
        let bounces = self.max_path_length.max(1) as u32;
        sampler.declare_1d(STREAM_LIGHT_PICK, bounces);
        sampler.declare_2d(STREAM_LIGHT_SAMPLE, bounces);
        sampler.declare_1d(STREAM_BSDF_PICK, bounces);
        sampler.declare_2d(STREAM_BSDF_SAMPLE, bounces);
    }

    fn max_path_length(&self) -> usize {
        self.max_path_length
    }

    fn run_once(
        &self,
        measurement: &mut Measurement,
        scene: &Scene,
        sensor: &Sensor,
        sampler: &mut PixelSampler,
        arena: &PagedArena,
    ) -> Result<(), RenderError> {
        let film_sample = sampler.get_2d(STREAM_FILM);
        let (ray0, _p0, _pdf_p0, pdf_wi0, we0) = sensor.generate_primary(film_sample);
        let cos0 = ray0.direction().dot(sensor.forward()).abs();
        let mut beta = if pdf_wi0 > 0.0 as Float {
            we0 * (cos0 / pdf_wi0)
        } else {
            RGBSpectrumf::black()
        };
        measurement.add_sample_count(1.0 as Float);
        if is_black(beta) {
            return Ok(());
        }

        let mut stack = PriorityStack::new();
        let mut ray = ray0;
        let mut specular_bounce = true;
        let mut prev_pdf_bsdf = 1.0 as Float;
        let mut prev_point = sensor.eye();
        let mut radiance = RGBSpectrumf::black();

        for bounce in 0..self.max_path_length {
            let hit = match raycast_nested(scene, &mut stack, ray, arena)? {
                Some(hit) => hit,
                None => {
                    if let Some(env) = scene.environment() {
                        if specular_bounce || bounce == 0 {
                            if !env.visible_to_camera() && bounce == 0 {
                                break;
                            }
                            radiance += beta * env.li(ray.direction());
                        } else {
                            let pdf_light = light_pdf(scene, &**env, prev_point, ray.direction());
                            let weight = mis_weight(prev_pdf_bsdf, pdf_light);
                            radiance += beta * env.li(ray.direction()) * weight;
                        }
                    }
                    break;
                }
            };
            beta *= hit.transmittance;
            if is_black(beta) {
                break;
            }
            let surface = hit.surface;

            if let Some(light) = surface.light {
                let le = light.le(surface.normal, -ray.direction());
                if !is_black(le) {
                    if specular_bounce || bounce == 0 {
                        radiance += beta * le;
                    } else {
                        let pdf_light = light_pdf(scene, light, prev_point, ray.direction());
                        let weight = mis_weight(prev_pdf_bsdf, pdf_light);
                        radiance += beta * le * weight;
                    }
                }
            }

            if bounce + 1 >= self.max_path_length {
                break;
            }

            let material = match surface.material {
                Some(m) => m,
                None => break,
            };
            let bsdf = material.compute_scattering(&surface, arena);
            let wo = -ray.direction();

            radiance += beta * self.sample_light(
                scene,
                sampler,
                &bsdf,
                surface.position,
                wo,
                surface.shading.normal(),
                hit.eta_a,
                hit.eta_b,
            );

            let u_lobe = sampler.get_1d(STREAM_BSDF_PICK);
            let u = sampler.get_2d(STREAM_BSDF_SAMPLE);
            let sample = match bsdf.sample_wi(wo, hit.eta_a, hit.eta_b, u_lobe, u) {
                Some(s) => s,
                None => break,
            };
            if sample.pdf <= 0.0 as Float || is_black(sample.f) {
                break;
            }

            let cos = sample.wi.dot(surface.shading.normal()).abs();
            beta *= sample.f * (cos / sample.pdf);
            specular_bounce = sample.kind == BxdfKind::Delta;
            prev_pdf_bsdf = sample.pdf;
            prev_point = surface.position;
            ray = surface.spawn_ray(sample.wi);

            if bounce > 3 {
                let max_component = beta.r().max(beta.g()).max(beta.b());
                let q = (1.0 as Float - max_component).max(0.05 as Float);
                if sampler.get_1d_free() < q {
                    break;
                }
                beta /= 1.0 as Float - q;
            }
        }

        measurement.add_sample(measurement.pixel(), radiance);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_every_stream_it_draws_from() {
        let integrator = ForwardIntegrator::new(4);
        let mut sampler = PixelSampler::new(Point2::new(16u32, 16u32), true);
        integrator.declare_streams(&mut sampler);
        sampler.seed(1, 0);
        let n = sampler.round_up_sample_count(4);
        sampler.begin_pixel(Point2::new(0, 0), n);
        // should not panic drawing every declared stream once
        let _ = sampler.get_2d(STREAM_FILM);
        let _ = sampler.get_1d(STREAM_LIGHT_PICK);
        let _ = sampler.get_2d(STREAM_LIGHT_SAMPLE);
        let _ = sampler.get_1d(STREAM_BSDF_PICK);
        let _ = sampler.get_2d(STREAM_BSDF_SAMPLE);
    }
}
