// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The per-pixel sampler: multiplexes a set of named 1D/2D streams an
//! integrator declares up front, routing film-pixel jitter for any
//! stream declared `measurement_direction` through to normalized film
//! coordinates.

use std::collections::HashMap;
use geometry::prelude::*;
use super::pcg32::Pcg32;
use super::generators::{Stratified1D, Stratified2D};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Kind {
    D1,
    D2,
    MeasurementDirection,
}

enum Stream {
    D1(Stratified1D),
    D2(Stratified2D),
}

/// Multiplexes named sample streams for a single pixel.
///
/// An integrator declares every stream it draws from via `declare_1d`,
/// `declare_2d`, or `declare_measurement_direction` before rendering
/// starts. The renderer then asks `round_up_sample_count` for the
/// realised per-pixel sample count (the max across every declared
/// stream) and drives the pixel with `begin_pixel`/`next_sample`.
pub struct PixelSampler {
    streams: HashMap<String, Stream>,
    kinds: HashMap<String, Kind>,
    rng: Pcg32,
    pixel: Point2<u32>,
    resolution: Point2<u32>,
    jitter: bool,
    /// when `false` (`config::SamplerKind::Random`), declared streams are
    /// never actually stratified: `get_1d`/`get_2d` fall straight through
    /// to independent `rng` draws, and `round_up_sample_count` reports the
    /// requested count unchanged. Measurement-direction remapping still
    /// applies either way, since it only depends on `kinds`.
    stratify: bool,
}

impl PixelSampler {
    pub fn new(resolution: Point2<u32>, jitter: bool) -> PixelSampler {
        PixelSampler {
            streams: HashMap::new(),
            kinds: HashMap::new(),
            rng: Pcg32::new(),
            pixel: Point2::new(0, 0),
            resolution,
            jitter,
            stratify: true,
        }
    }

    /// A sampler that never stratifies: every declared stream draws
    /// straight from `rng`, used for `config::SamplerKind::Random`.
    pub fn new_unstratified(resolution: Point2<u32>) -> PixelSampler {
        let mut s = PixelSampler::new(resolution, true);
        s.stratify = false;
        s
    }

    /// Reseed the underlying generator, e.g. from the renderer's
    /// deterministic `tile_index * stream_count + stream_within_tile`
    /// derivation.
    pub fn seed(&mut self, seed: u64, stream: u64) {
        self.rng = Pcg32::from_seed(seed, stream);
    }

    pub fn declare_1d(&mut self, name: &str, dims: u32) {
        if self.stratify {
            self.streams.insert(name.to_owned(), Stream::D1(Stratified1D::new(dims, self.jitter)));
        }
        self.kinds.insert(name.to_owned(), Kind::D1);
    }

    pub fn declare_2d(&mut self, name: &str, dims: u32) {
        if self.stratify {
            self.streams.insert(name.to_owned(), Stream::D2(Stratified2D::new(dims, self.jitter)));
        }
        self.kinds.insert(name.to_owned(), Kind::D2);
    }

    /// Declares a single 2D stream whose raw `[0,1)^2` samples are
    /// remapped as `(pixel + s) / resolution` before being handed out.
    pub fn declare_measurement_direction(&mut self, name: &str) {
        if self.stratify {
            self.streams.insert(name.to_owned(), Stream::D2(Stratified2D::new(1, self.jitter)));
        }
        self.kinds.insert(name.to_owned(), Kind::MeasurementDirection);
    }

    /// The pixel's realised sample count: the maximum, over every
    /// declared stream, of that stream's own rounding policy applied
    /// to the integrator's requested `n`.
    pub fn round_up_sample_count(&self, n: u32) -> u32 {
        self.streams
            .values()
            .map(|s| match *s {
                Stream::D1(_) => Stratified1D::round_up_sample_count(n),
                Stream::D2(_) => Stratified2D::round_up_sample_count(n),
            })
            .max()
            .unwrap_or(n)
    }

    /// Begin a new pixel with `n` realised samples (already passed
    /// through `round_up_sample_count`).
    pub fn begin_pixel(&mut self, pixel: Point2<u32>, n: u32) {
        self.pixel = pixel;
        let rng = &mut self.rng;
        for stream in self.streams.values_mut() {
            match *stream {
                Stream::D1(ref mut s) => s.begin_pixel(n, rng),
                Stream::D2(ref mut s) => s.begin_pixel(n, rng),
            }
        }
    }

    /// Advance every stream to its next sample. `false` once the
    /// realised sample count for this pixel is exhausted.
    pub fn next_sample(&mut self) -> bool {
        let mut more = true;
        for stream in self.streams.values_mut() {
            let this = match *stream {
                Stream::D1(ref mut s) => s.next_sample(),
                Stream::D2(ref mut s) => s.next_sample(),
            };
            more &= this;
        }
        more
    }

    /// Next 1D value from the named stream. Falls back to a plain
    /// uniform draw if `name` was never declared.
    pub fn get_1d(&mut self, name: &str) -> Float {
        match self.streams.get_mut(name) {
            Some(Stream::D1(s)) => s.get(),
            _ => self.rng.next_float(),
        }
    }

    /// Next 2D value from the named stream, remapped into film
    /// coordinates first if it was declared `measurement_direction`.
    pub fn get_2d(&mut self, name: &str) -> Point2f {
        let raw = match self.streams.get_mut(name) {
            Some(Stream::D2(s)) => s.get(),
            _ => self.rng.next_float_2d(),
        };
        if self.kinds.get(name) == Some(&Kind::MeasurementDirection) {
            let res = Point2f::new(self.resolution.x as Float, self.resolution.y as Float);
            let px = Point2f::new(self.pixel.x as Float, self.pixel.y as Float);
            Point2f::new((px.x + raw.x) / res.x, (px.y + raw.y) / res.y)
        } else {
            raw
        }
    }

    /// A fresh 1D/2D draw outside of any declared stream (e.g. for
    /// russian-roulette termination, which doesn't need stratification).
    #[inline]
    pub fn get_1d_free(&mut self) -> Float {
        self.rng.next_float()
    }

    #[inline]
    pub fn get_2d_free(&mut self) -> Point2f {
        self.rng.next_float_2d()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurement_direction_stays_within_its_pixel_cell() {
        let resolution = Point2::new(64u32, 48u32);
        let mut sampler = PixelSampler::new(resolution, true);
        sampler.declare_measurement_direction("measurement-direction");
        sampler.seed(1, 1);
        let n = sampler.round_up_sample_count(4);
        let pixel = Point2::new(10u32, 20u32);
        sampler.begin_pixel(pixel, n);
        loop {
            let s = sampler.get_2d("measurement-direction");
            assert!(s.x >= 10.0 as Float / 64.0 as Float && s.x < 11.0 as Float / 64.0 as Float);
            assert!(s.y >= 20.0 as Float / 48.0 as Float && s.y < 21.0 as Float / 48.0 as Float);
            if !sampler.next_sample() {
                break;
            }
        }
    }

    #[test]
    fn round_up_takes_the_max_across_streams() {
        let mut sampler = PixelSampler::new(Point2::new(16u32, 16u32), true);
        sampler.declare_1d("a", 1);
        sampler.declare_2d("b", 1);
        assert_eq!(sampler.round_up_sample_count(10), 16);
    }
}
