// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Integrators: one estimator sample per `run_once` call. Common
//! contract (§4.10): declare the 1D/2D streams consumed up front so the
//! renderer can route film-pixel jitter; call `measurement.add_sample_count(1)`;
//! add one or more `measurement.add_sample(p, Li)`.

use arena::PagedArena;
use error::RenderError;
use render::sensor::Sensor;
use render::target::Measurement;
use sample::pixel::PixelSampler;
use scene::Scene;

pub mod common;
pub mod forward;
pub mod backward;
pub mod bidirectional;
pub mod prelude;

pub use self::forward::ForwardIntegrator;
pub use self::backward::BackwardIntegrator;
pub use self::bidirectional::BidirectionalIntegrator;

/// One estimator sample, driven by the renderer's per-pixel loop.
pub trait Integrator: Sync + Send {
    /// Declares every named 1D/2D stream this integrator draws from.
    /// Called once per worker sampler, before any pixel is rendered.
    fn declare_streams(&self, sampler: &mut PixelSampler);

    /// the longest path this integrator may build
    fn max_path_length(&self) -> usize;

    /// Runs exactly one sample for the pixel `measurement` is bound to.
    fn run_once(
        &self,
        measurement: &mut Measurement,
        scene: &Scene,
        sensor: &Sensor,
        sampler: &mut PixelSampler,
        arena: &PagedArena,
    ) -> Result<(), RenderError>;
}
