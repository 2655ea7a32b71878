// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Light tracing: a path grown from an emitted light particle,
//! attempting a sensor connection at every vertex, splatted straight
//! onto whichever pixel it lands on. No MIS (§4.10, Backward): every
//! connection is added at its own weight, so combining this with the
//! forward integrator's pixels would double-count -- this integrator is
//! meant to run alone.
//!
//! `AreaLight::sample_le` (added alongside this integrator, grounded on
//! `light::area::AreaLight`'s existing `sample_wi`/pdf machinery) seeds
//! the particle; both surface area lights and `InfinityAreaLight` (an
//! environment-started path, per §4.10) implement it, so any light
//! `scene::sample_one_light` can pick is able to start a path here.

use arena::PagedArena;
use error::RenderError;
use geometry::prelude::*;
use integrator::common::is_black;
use integrator::Integrator;
use light::AreaLight;
use material::bsdf::Bsdf;
use render::sensor::Sensor;
use render::target::Measurement;
use sample::pixel::PixelSampler;
use scene::priority::{raycast_nested, PriorityStack};
use scene::Scene;
use spectrum::{RGBSpectrumf, Spectrum};

const STREAM_LIGHT_PICK: &str = "light-pick";
const STREAM_EMISSION_POS: &str = "emission-pos";
const STREAM_EMISSION_DIR: &str = "emission-dir";
const STREAM_BSDF_PICK: &str = "bsdf-pick";
const STREAM_BSDF_SAMPLE: &str = "bsdf-sample";

/// Light-tracing integrator: grows one path from a sampled light
/// particle, connecting it to the sensor at every vertex.
pub struct BackwardIntegrator {
    max_path_length: usize,
}

impl BackwardIntegrator {
    pub fn new(max_path_length: usize) -> BackwardIntegrator {
        BackwardIntegrator { max_path_length }
    }

    /// The `t=0` strategy: the emitted particle's origin seen directly
    /// by the sensor, without going through its sampled direction at
    /// all -- `Le` is re-evaluated toward the sensor, weighted only by
    /// `pick_pdf * pdf_pos`.
    fn connect_emission(
        &self,
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

    /// Connects a scattering vertex to the sensor: `flux_in` is the
    /// particle's throughput arriving at `position`, still missing this
    /// vertex's own scattering toward the sensor direction, which
    /// `bsdf.evaluate` supplies. Delta lobes evaluate to zero here (§4.5,
    /// `Bsdf::evaluate` only sums `Standard` lobes), so a specular vertex
    /// is skipped automatically rather than needing a special case.
    fn connect_vertex<'a>(
        &self,
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
        let contribution = flux_in * f * connection.importance
            / (connection.distance * connection.distance);
        if is_black(contribution) {
            return;
        }
        measurement.add_sample(connection.pixel, contribution);
    }
}

impl Integrator for BackwardIntegrator {
    fn declare_streams(&self, sampler: &mut PixelSampler) {
        let bounces = self.max_path_length.max(1) as u32;
        sampler.declare_1d(STREAM_LIGHT_PICK, 1);
        sampler.declare_2d(STREAM_EMISSION_POS, 1);
        sampler.declare_2d(STREAM_EMISSION_DIR, 1);
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
        measurement.add_sample_count(1.0 as Float);

        let u_pick = sampler.get_1d(STREAM_LIGHT_PICK);
        let (light, pick_pdf) = match scene.sample_one_light(u_pick) {
            Some(x) => x,
            None => return Ok(()),
        };
        if pick_pdf <= 0.0 as Float {
            return Ok(());
        }
        let u_pos = sampler.get_2d(STREAM_EMISSION_POS);
        let u_dir = sampler.get_2d(STREAM_EMISSION_DIR);
        let emission = match light.sample_le(u_pos, u_dir) {
            Some(e) => e,
            None => return Ok(()),
        };
        if emission.pdf_pos <= 0.0 as Float || emission.pdf_dir <= 0.0 as Float || is_black(emission.le) {
            return Ok(());
        }

        self.connect_emission(
            measurement,
            scene,
            sensor,
            light,
            emission.position,
            emission.normal,
            pick_pdf,
            emission.pdf_pos,
        );

        let cos0 = emission.normal.dot(emission.direction).abs();
        let mut flux = emission.le * (cos0 / (pick_pdf * emission.pdf_pos * emission.pdf_dir));
        if is_black(flux) {
            return Ok(());
        }

        let mut stack = PriorityStack::new();
        let mut ray = RawRay::from_od(
            emission.position + emission.normal * (1e-4 as Float),
            emission.direction,
        );

        for bounce in 0..self.max_path_length {
            let hit = match raycast_nested(scene, &mut stack, ray, arena)? {
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

            self.connect_vertex(
                measurement,
                scene,
                sensor,
                &bsdf,
                surface.position,
                wo,
                flux,
                hit.eta_a,
                hit.eta_b,
            );

            if bounce + 1 >= self.max_path_length {
                break;
            }

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

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_every_stream_it_draws_from() {
        let integrator = BackwardIntegrator::new(4);
        let mut sampler = PixelSampler::new(Point2::new(16u32, 16u32), true);
        integrator.declare_streams(&mut sampler);
        sampler.seed(1, 0);
        let n = sampler.round_up_sample_count(4);
        sampler.begin_pixel(Point2::new(0, 0), n);
        let _ = sampler.get_1d(STREAM_LIGHT_PICK);
        let _ = sampler.get_2d(STREAM_EMISSION_POS);
        let _ = sampler.get_2d(STREAM_EMISSION_DIR);
        let _ = sampler.get_1d(STREAM_BSDF_PICK);
        let _ = sampler.get_2d(STREAM_BSDF_SAMPLE);
    }
}
