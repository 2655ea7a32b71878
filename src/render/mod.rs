// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The tile-parallel render loop (§4.11). Grounded on the teacher's
//! `renderer::pt::PTRenderer::render` (tiles, per-tile arena + sampler,
//! `tiles.par_iter_mut()`), generalized from one fixed integrator to any
//! `config::IntegratorKind` and from a single `Film` to the
//! `Σ_workers`-merged `RenderTarget`.

use arena::PagedArena;
use config::{IntegratorKind, RenderConfig, SamplerKind};
use error::RenderError;
use geometry::prelude::*;
use integrator::prelude::*;
use rayon::prelude::*;
use render::sensor::Sensor;
use render::target::{Measurement, RenderTarget};
use sample::pixel::PixelSampler;
use scene::Scene;
use std::sync::atomic::{AtomicUsize, Ordering};

pub mod sensor;
pub mod target;

/// Bump-allocator page size for both the pixel- and sample-lifetime
/// arenas; big enough that a typical bsdf/priority-stack allocation set
/// never spills across more than a couple of pages.
const ARENA_PAGE_SIZE: usize = 64 * 1024;

const TILE_SIZE: u32 = 32;

fn build_integrator(config: &RenderConfig) -> Box<dyn Integrator> {
    match config.integrator {
        IntegratorKind::Forward => Box::new(ForwardIntegrator::new(config.max_path_length)),
        IntegratorKind::Backward => Box::new(BackwardIntegrator::new(config.max_path_length)),
        IntegratorKind::Bidirectional => Box::new(BidirectionalIntegrator::new(config.max_path_length)),
    }
}

fn build_sampler(config: &RenderConfig, resolution: Point2<u32>) -> PixelSampler {
    match config.sampler {
        SamplerKind::Random => PixelSampler::new_unstratified(resolution),
        SamplerKind::Stratified { jitter } => PixelSampler::new(resolution, jitter),
    }
}

/// Renders one `TILE_SIZE x TILE_SIZE` tile into its own `RenderTarget`,
/// using a sampler/arena pair private to this tile so tiles never
/// contend with each other.
fn render_tile(
    tile_index: u32,
    tiles_x: u32,
    config: &RenderConfig,
    scene: &Scene,
    sensor: &Sensor,
    integrator: &dyn Integrator,
) -> Result<RenderTarget, RenderError> {
    let (width, height) = config.camera.resolution;
    let mut target = RenderTarget::new((width, height));

    let tile_x = tile_index % tiles_x;
    let tile_y = tile_index / tiles_x;
    let x0 = tile_x * TILE_SIZE;
    let y0 = tile_y * TILE_SIZE;
    let x1 = (x0 + TILE_SIZE).min(width);
    let y1 = (y0 + TILE_SIZE).min(height);

    let mut sampler = build_sampler(config, Point2::new(width, height));
    integrator.declare_streams(&mut sampler);
    sampler.seed(config.base_seed.wrapping_add(tile_index as u64), tile_index as u64);

    let pixel_arena = PagedArena::new(ARENA_PAGE_SIZE);
    let sample_arena = PagedArena::new(ARENA_PAGE_SIZE);
    let n = sampler.round_up_sample_count(config.samples_per_pixel);

    for y in y0..y1 {
        for x in x0..x1 {
            sampler.begin_pixel(Point2::new(x, y), n);
            loop {
                let mut measurement = Measurement::new(&mut target, (x, y));
                integrator.run_once(&mut measurement, scene, sensor, &mut sampler, &sample_arena)?;
                sample_arena.clear();
                if !sampler.next_sample() {
                    break;
                }
            }
            pixel_arena.clear();
        }
    }
    Ok(target)
}

/// Renders the whole image: dispatches every tile across a pool sized
/// to `config.worker_count`, logging progress at decile boundaries, and
/// folds every tile's `RenderTarget` into one `Σ_workers` result.
pub fn render(config: &RenderConfig, scene: &Scene) -> Result<RenderTarget, RenderError> {
    let integrator = build_integrator(config);
    let sensor = Sensor::new(&config.camera);
    let (tiles_x, tiles_y) = config.tile_count();
    let tile_count = tiles_x * tiles_y;
    let completed = AtomicUsize::new(0);

    log::info!(
        "rendering {}x{} across {} tiles on {} workers, {} spp",
        config.camera.resolution.0,
        config.camera.resolution.1,
        tile_count,
        config.worker_count,
        config.samples_per_pixel,
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_count)
        .build()
        .expect("failed to build the render thread pool");

    let tiles: Result<Vec<RenderTarget>, RenderError> = pool.install(|| {
        (0..tile_count)
            .into_par_iter()
            .map(|tile_index| {
                let result = render_tile(tile_index, tiles_x, config, scene, &sensor, &*integrator);
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if done % (tile_count as usize / 10).max(1) == 0 {
                    log::info!("{}/{} tiles done", done, tile_count);
                }
                result
            })
            .collect()
    });
    let tiles = tiles?;

    let mut result = RenderTarget::new(config.camera.resolution);
    for tile in &tiles {
        result.merge(tile);
    }
    log::info!("render complete");
    Ok(result)
}
