// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! One typed assembly of everything a render job needs: resolution,
//! worker count, sample count, sampler/integrator choice, and the base
//! seed every tile's stream-seed derivation starts from.

use geometry::prelude::*;
use serde::{Deserialize, Serialize};

/// Which underlying generator backs a pixel's declared sample streams.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SamplerKind {
    /// independent draws, no stratification
    Random,
    /// stratified-then-shuffled streams; `jitter` toggles whether the
    /// within-stratum offset is randomized or fixed at the cell center
    Stratified { jitter: bool },
}

/// Which integrator drives each pixel sample.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum IntegratorKind {
    /// unidirectional, MIS-weighted next-event estimation
    Forward,
    /// light -> sensor connections only, no MIS
    Backward,
    /// sensor and light subpaths connected at every valid strategy
    Bidirectional,
}

/// The camera: a fixed eye transform, vertical FOV, and the resolution
/// it shares with every worker's render target.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct CameraConfig {
    /// camera-to-world transform; camera space looks down `+z`, `+y` up
    pub camera_to_world: Matrix4f,
    /// vertical field of view, in radians
    pub fov_y: Float,
    pub resolution: (u32, u32),
}

/// Everything needed to construct and run one render job.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct RenderConfig {
    pub camera: CameraConfig,
    pub worker_count: usize,
    pub samples_per_pixel: u32,
    pub sampler: SamplerKind,
    pub integrator: IntegratorKind,
    pub max_path_length: usize,
    /// every tile derives its stream seed as
    /// `base_seed + tile_index * stream_count + stream_within_tile`
    pub base_seed: u64,
}

impl RenderConfig {
    pub fn tile_count(&self) -> (u32, u32) {
        const TILE: u32 = 32;
        let (w, h) = self.camera.resolution;
        ((w + TILE - 1) / TILE, (h + TILE - 1) / TILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_count_covers_a_non_multiple_resolution() {
        let config = RenderConfig {
            camera: CameraConfig {
                camera_to_world: Matrix4f::from_scale(1.0 as Float),
                fov_y: 1.0 as Float,
                resolution: (100, 65),
            },
            worker_count: 1,
            samples_per_pixel: 4,
            sampler: SamplerKind::Stratified { jitter: true },
            integrator: IntegratorKind::Forward,
            max_path_length: 5,
            base_seed: 0,
        };
        assert_eq!(config.tile_count(), (4, 3));
    }
}
