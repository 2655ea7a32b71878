// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Bidirectional path tracing: build a sensor subpath (as in
//! `ForwardIntegrator`) and a light subpath (as in `BackwardIntegrator`)
//! per sample, then additionally connect every interior vertex pair
//! between them (§4.10, Bidirectional) -- the paths NEE alone can't
//! reach in one sample, e.g. a caustic seen through a diffuse bounce on
//! the eye side.
//!
//! Direct lighting (the eye path's own light hits, and eye-vertex-to-
//! fresh-light-sample connections) reuses exact power-heuristic MIS, the
//! same two techniques `ForwardIntegrator` weighs. The additional
//! eye-vertex/light-vertex connections are a third family of techniques
//! that can reach the same path length; combining them with exact
//! Veach-style multi-sample MIS would mean storing and inverting
//! area-measure pdfs at every vertex in both directions. Instead each
//! such connection is damped by a uniform `1 / path_length` heuristic,
//! bounding variance without the full pdf bookkeeping. Recorded as a
//! resolved simplification in DESIGN.md.

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

const STREAM_LIGHT_PICK_L: &str = "bd-light-pick";
const STREAM_EMISSION_POS: &str = "bd-emission-pos";
const STREAM_EMISSION_DIR: &str = "bd-emission-dir";
const STREAM_BSDF_PICK_L: &str = "bd-bsdf-pick-light";
const STREAM_BSDF_SAMPLE_L: &str = "bd-bsdf-sample-light";

struct EyeVertex<'a> {
    position: Point3f,
    wo: Vector3f,
    shading_normal: Vector3f,
    bsdf: Bsdf<'a>,
    beta: RGBSpectrumf,
    eta_a: Float,
    eta_b: Float,
}

struct LightVertex<'a> {
    position: Point3f,
    wo: Vector3f,
    shading_normal: Vector3f,
    bsdf: Bsdf<'a>,
    beta: RGBSpectrumf,
    eta_a: Float,
    eta_b: Float,
}

pub struct BidirectionalIntegrator {
    max_path_length: usize,
}

impl BidirectionalIntegrator {
    pub fn new(max_path_length: usize) -> BidirectionalIntegrator {
        BidirectionalIntegrator { max_path_length }
    }

    /// Grows the sensor subpath, recording every scattering vertex and
    /// splatting its own direct-lighting contribution (bsdf-hit + NEE,
    /// exactly `ForwardIntegrator::run_once`'s per-bounce logic) straight
    /// into `radiance`.
    fn trace_eye_path<'a>(
        &self,
        scene: &'a Scene,
        sensor: &Sensor,
        sampler: &mut PixelSampler,
        arena: &'a PagedArena,
        stack: &mut PriorityStack<'a>,
        radiance: &mut RGBSpectrumf,
    ) -> Result<Vec<EyeVertex<'a>>, RenderError> {
        let mut vertices = Vec::new();
        let film_sample = sampler.get_2d(STREAM_FILM);
        let (ray0, _p0, _pdf_p0, pdf_wi0, we0) = sensor.generate_primary(film_sample);
        let cos0 = ray0.direction().dot(sensor.forward()).abs();
        let mut beta = if pdf_wi0 > 0.0 as Float {
            we0 * (cos0 / pdf_wi0)
        } else {
            RGBSpectrumf::black()
        };
        if is_black(beta) {
            return Ok(vertices);
        }

        let mut ray = ray0;
        let mut specular_bounce = true;
        let mut prev_pdf_bsdf = 1.0 as Float;
        let mut prev_point = sensor.eye();

        for bounce in 0..self.max_path_length {
            let hit = match raycast_nested(scene, stack, ray, arena)? {
                Some(hit) => hit,
                None => {
                    if let Some(env) = scene.environment() {
                        if specular_bounce || bounce == 0 {
                            if env.visible_to_camera() || bounce != 0 {
                                *radiance += beta * env.li(ray.direction());
                            }
                        } else {
                            let pdf_light = light_pdf(scene, &**env, prev_point, ray.direction());
                            let weight = mis_weight(prev_pdf_bsdf, pdf_light);
                            *radiance += beta * env.li(ray.direction()) * weight;
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
                        *radiance += beta * le;
                    } else {
                        let pdf_light = light_pdf(scene, light, prev_point, ray.direction());
                        let weight = mis_weight(prev_pdf_bsdf, pdf_light);
                        *radiance += beta * le * weight;
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

            *radiance += beta * sample_light(
                scene, sampler, &bsdf, surface.position, wo, surface.shading.normal(),
                hit.eta_a, hit.eta_b,
            );

            let u_lobe = sampler.get_1d(STREAM_BSDF_PICK);
            let u = sampler.get_2d(STREAM_BSDF_SAMPLE);
            let sample = bsdf.sample_wi(wo, hit.eta_a, hit.eta_b, u_lobe, u);

            vertices.push(EyeVertex {
                position: surface.position,
                wo,
                shading_normal: surface.shading.normal(),
                bsdf,
                beta,
                eta_a: hit.eta_a,
                eta_b: hit.eta_b,
            });

            let sample = match sample {
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
        Ok(vertices)
    }

    /// Grows the light subpath, recording every scattering vertex and
    /// splatting its own sensor connection (the `connect_vertex`/
    /// `connect_emission` strategies `BackwardIntegrator` uses).
    fn trace_light_path<'a>(
        &self,
        measurement: &mut Measurement,
        scene: &'a Scene,
        sensor: &Sensor,
        sampler: &mut PixelSampler,
        arena: &'a PagedArena,
        stack: &mut PriorityStack<'a>,
    ) -> Result<Vec<LightVertex<'a>>, RenderError> {
        let mut vertices = Vec::new();

        let u_pick = sampler.get_1d(STREAM_LIGHT_PICK_L);
        let (light, pick_pdf) = match scene.sample_one_light(u_pick) {
            Some(x) => x,
            None => return Ok(vertices),
        };
        if pick_pdf <= 0.0 as Float {
            return Ok(vertices);
        }
        let u_pos = sampler.get_2d(STREAM_EMISSION_POS);
        let u_dir = sampler.get_2d(STREAM_EMISSION_DIR);
        let emission = match light.sample_le(u_pos, u_dir) {
            Some(e) => e,
            None => return Ok(vertices),
        };
        if emission.pdf_pos <= 0.0 as Float || emission.pdf_dir <= 0.0 as Float || is_black(emission.le) {
            return Ok(vertices);
        }

        connect_emission(measurement, scene, sensor, light, emission.position, emission.normal, pick_pdf, emission.pdf_pos);

        let cos0 = emission.normal.dot(emission.direction).abs();
        let mut flux = emission.le * (cos0 / (pick_pdf * emission.pdf_pos * emission.pdf_dir));
        if is_black(flux) {
            return Ok(vertices);
        }

        let mut ray = RawRay::from_od(emission.position + emission.normal * (1e-4 as Float), emission.direction);

        for bounce in 0..self.max_path_length {
            let hit = match raycast_nested(scene, stack, ray, arena)? {
                Some(hit) => hit,
                None => break,
            };
            flux *= hit.transmittance;
            if is_black(flux) {
                break;
            }
            let surface = hit.surface;
            let material = match surface.material {
                Some(m) => m,
                None => break,
            };
            let bsdf = material.compute_scattering(&surface, arena);
            let wo = -ray.direction();

            connect_vertex(measurement, scene, sensor, &bsdf, surface.position, wo, flux, hit.eta_a, hit.eta_b);

            let at_last_bounce = bounce + 1 >= self.max_path_length;
            let sample = if at_last_bounce {
                None
            } else {
                let u_lobe = sampler.get_1d(STREAM_BSDF_PICK_L);
                let u = sampler.get_2d(STREAM_BSDF_SAMPLE_L);
                bsdf.sample_wi(wo, hit.eta_a, hit.eta_b, u_lobe, u)
            };

            vertices.push(LightVertex {
                position: surface.position,
                wo,
                shading_normal: surface.shading.normal(),
                bsdf,
                beta: flux,
                eta_a: hit.eta_a,
                eta_b: hit.eta_b,
            });

            if at_last_bounce {
                break;
            }
            let sample = match sample {
                Some(s) => s,
                None => break,
            };
            if sample.pdf <= 0.0 as Float || is_black(sample.f) {
                break;
            }
            let cos = sample.wi.dot(surface.shading.normal()).abs();
            flux *= sample.f * (cos / sample.pdf);
            ray = surface.spawn_ray(sample.wi);

            if bounce > 3 {
                let max_component = flux.r().max(flux.g()).max(flux.b());
                let q = (1.0 as Float - max_component).max(0.05 as Float);
                if sampler.get_1d_free() < q {
                    break;
                }
                flux /= 1.0 as Float - q;
            }
        }
        Ok(vertices)
    }
}

impl Integrator for BidirectionalIntegrator {
    fn declare_streams(&self, sampler: &mut PixelSampler) {
        sampler.declare_measurement_direction(STREAM_FILM);
        let bounces = self.max_path_length.max(1) as u32;
        sampler.declare_1d(STREAM_LIGHT_PICK, bounces);
        sampler.declare_2d(STREAM_LIGHT_SAMPLE, bounces);
        sampler.declare_1d(STREAM_BSDF_PICK, bounces);
        sampler.declare_2d(STREAM_BSDF_SAMPLE, bounces);
        sampler.declare_1d(STREAM_LIGHT_PICK_L, 1);
        sampler.declare_2d(STREAM_EMISSION_POS, 1);
        sampler.declare_2d(STREAM_EMISSION_DIR, 1);
        sampler.declare_1d(STREAM_BSDF_PICK_L, bounces);
        sampler.declare_2d(STREAM_BSDF_SAMPLE_L, bounces);
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
        measurement.add_sample_count(1.0 as Float);

        let mut eye_stack = PriorityStack::new();
        let mut radiance = RGBSpectrumf::black();
        let eye_vertices = self.trace_eye_path(scene, sensor, sampler, arena, &mut eye_stack, &mut radiance)?;

        let mut light_stack = PriorityStack::new();
        let light_vertices = self.trace_light_path(measurement, scene, sensor, sampler, arena, &mut light_stack)?;

        for (i, eye_vertex) in eye_vertices.iter().enumerate() {
            for (j, light_vertex) in light_vertices.iter().enumerate() {
                let path_length = i + j + 2;
                if path_length > self.max_path_length {
                    continue;
                }
                let d = light_vertex.position - eye_vertex.position;
                let dist2 = d.magnitude2();
                if dist2 <= 0.0 as Float {
                    continue;
                }
                let dist = dist2.sqrt();
                let wi_eye = d / dist;

                let f_eye = eye_vertex.bsdf.evaluate(eye_vertex.wo, wi_eye, eye_vertex.eta_a, eye_vertex.eta_b);
                if is_black(f_eye) {
                    continue;
                }
                let f_light = light_vertex.bsdf.evaluate(light_vertex.wo, -wi_eye, light_vertex.eta_a, light_vertex.eta_b);
                if is_black(f_light) {
                    continue;
                }
                if !scene.visible(eye_vertex.position, light_vertex.position) {
                    continue;
                }
                let cos_eye = wi_eye.dot(eye_vertex.shading_normal).abs();
                let cos_light = wi_eye.dot(light_vertex.shading_normal).abs();
                let g = cos_eye * cos_light / dist2;
                let weight = 1.0 as Float / path_length as Float;
                radiance += eye_vertex.beta * f_eye * g * f_light * light_vertex.beta * weight;
            }
        }

        measurement.add_sample(measurement.pixel(), radiance);
        Ok(())
    }
}

/// Identical to `ForwardIntegrator::sample_light`: one NEE attempt from
/// `reference`, power-heuristic-weighted against the bsdf pdf.
fn sample_light<'a>(
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

/// Identical to `BackwardIntegrator::connect_emission`.
fn connect_emission(
    measurement: &mut Measurement,
    scene: &Scene,
    sensor: &Sensor,
    light: &dyn AreaLight,
    position: Point3f,
    normal: Vector3f,
    pick_pdf: Float,
    pdf_pos: Float,
) {
    let connection = match sensor.sample_p(position) {
        Some(c) => c,
        None => return,
    };
    let le = light.le(normal, connection.wi);
    if is_black(le) {
        return;
    }
    let cos = connection.wi.dot(normal).abs();
    let denom = pick_pdf * pdf_pos * connection.distance * connection.distance;
    if denom <= 0.0 as Float {
        return;
    }
    if !scene.visible(position, sensor.eye()) {
        return;
    }
    let contribution = le * connection.importance * (cos / denom);
    if is_black(contribution) {
        return;
    }
    measurement.add_sample(connection.pixel, contribution);
}

/// Identical to `BackwardIntegrator::connect_vertex`.
fn connect_vertex<'a>(
    measurement: &mut Measurement,
    scene: &Scene,
    sensor: &Sensor,
    bsdf: &Bsdf<'a>,
    position: Point3f,
    wo: Vector3f,
    flux_in: RGBSpectrumf,
    eta_a: Float,
    eta_b: Float,
) {
    let connection = match sensor.sample_p(position) {
        Some(c) => c,
        None => return,
    };
    if connection.distance <= 0.0 as Float {
        return;
    }
    let f = bsdf.evaluate(wo, connection.wi, eta_a, eta_b);
    if is_black(f) {
        return;
    }
    if !scene.visible(position, sensor.eye()) {
        return;
    }
    let contribution = flux_in * f * connection.importance / (connection.distance * connection.distance);
    if is_black(contribution) {
        return;
    }
    measurement.add_sample(connection.pixel, contribution);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_every_stream_it_draws_from() {
        let integrator = BidirectionalIntegrator::new(4);
        let mut sampler = PixelSampler::new(Point2::new(16u32, 16u32), true);
        integrator.declare_streams(&mut sampler);
        sampler.seed(1, 0);
        let n = sampler.round_up_sample_count(4);
        sampler.begin_pixel(Point2::new(0, 0), n);
        let _ = sampler.get_2d(STREAM_FILM);
        let _ = sampler.get_1d(STREAM_LIGHT_PICK);
        let _ = sampler.get_2d(STREAM_LIGHT_SAMPLE);
        let _ = sampler.get_1d(STREAM_BSDF_PICK);
        let _ = sampler.get_2d(STREAM_BSDF_SAMPLE);
        let _ = sampler.get_1d(STREAM_LIGHT_PICK_L);
        let _ = sampler.get_2d(STREAM_EMISSION_POS);
        let _ = sampler.get_2d(STREAM_EMISSION_DIR);
        let _ = sampler.get_1d(STREAM_BSDF_PICK_L);
        let _ = sampler.get_2d(STREAM_BSDF_SAMPLE_L);
    }
}
