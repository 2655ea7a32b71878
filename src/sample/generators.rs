// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Sample generators: a plain `Random` generator around `Pcg32`, and
//! `Stratified1D`/`Stratified2D` generators that stratify a pixel's `N`
//! samples across each of `dims` independent columns before shuffling.
//!
//! Every generator exposes `round_up_sample_count`, a static rounding
//! policy a caller must go through rather than inlining its own
//! `ceil(sqrt(n))²`-style arithmetic, so the rounding lives in one place.

use geometry::prelude::*;
use super::pcg32::Pcg32;

/// Fisher-Yates, walking from the back, using `rng` for the swap index.
fn shuffle<T>(values: &mut [T], rng: &mut Pcg32) {
    let n = values.len();
    if n < 2 {
        return;
    }
    for i in (1..n).rev() {
        let j = rng.next_bounded_u32((i + 1) as u32) as usize;
        values.swap(i, j);
    }
}

/// Plain independent uniform generator: no stratification, any sample
/// count is already "rounded".
#[derive(Copy, Clone, Debug)]
pub struct Random;

impl Random {
    #[inline]
    pub fn round_up_sample_count(n: u32) -> u32 {
        n
    }

    #[inline]
    pub fn get(rng: &mut Pcg32) -> Float {
        rng.next_float()
    }

    #[inline]
    pub fn get_2d(rng: &mut Pcg32) -> Point2f {
        rng.next_float_2d()
    }
}

/// A stratified 1D generator serving `dims` independently-stratified
/// columns of `samples` values each, for one pixel.
#[derive(Clone, Debug)]
pub struct Stratified1D {
    dims: u32,
    samples: u32,
    values: Vec<Float>,
    sample_index: u32,
    cursor: u32,
    jitter: bool,
}

impl Stratified1D {
    pub fn new(dims: u32, jitter: bool) -> Stratified1D {
        Stratified1D {
            dims,
            samples: 0,
            values: Vec::new(),
            sample_index: 0,
            cursor: 0,
            jitter,
        }
    }

    /// A 1D column can realise any `N` exactly; no rounding needed.
    #[inline]
    pub fn round_up_sample_count(n: u32) -> u32 {
        n
    }

    /// (Re)generate this pixel's `dims` columns of `samples` stratified
    /// values, each independently jittered then shuffled.
    pub fn begin_pixel(&mut self, samples: u32, rng: &mut Pcg32) {
        self.samples = samples.max(1);
        self.values = vec![0.0 as Float; (self.dims * self.samples) as usize];
        let inv_n = 1.0 as Float / self.samples as Float;
        for d in 0..self.dims {
            let start = (d * self.samples) as usize;
            let end = start + self.samples as usize;
            let column = &mut self.values[start..end];
            for (k, v) in column.iter_mut().enumerate() {
                let jitter = if self.jitter { rng.next_float() } else { 0.5 as Float };
                *v = (k as Float + jitter) * inv_n;
            }
            shuffle(column, rng);
        }
        self.sample_index = 0;
        self.cursor = 0;
    }

    /// Next value, walking across this stream's declared dimensions
    /// for the current sample.
    pub fn get(&mut self) -> Float {
        if self.samples == 0 {
            return 0.5 as Float;
        }
        let d = self.cursor % self.dims.max(1);
        self.cursor += 1;
        self.values[(d * self.samples + self.sample_index) as usize]
    }

    /// Advance to the next sample. Returns `false` once the pixel's
    /// realised sample count has been exhausted.
    pub fn next_sample(&mut self) -> bool {
        self.cursor = 0;
        self.sample_index += 1;
        self.sample_index < self.samples
    }
}

/// A stratified 2D generator: each dimension's column is a `side x side`
/// jittered grid (`side = sqrt(samples)`), shuffled as a whole.
#[derive(Clone, Debug)]
pub struct Stratified2D {
    dims: u32,
    samples: u32,
    side: u32,
    values: Vec<Point2f>,
    sample_index: u32,
    cursor: u32,
    jitter: bool,
}

impl Stratified2D {
    pub fn new(dims: u32, jitter: bool) -> Stratified2D {
        Stratified2D {
            dims,
            samples: 0,
            side: 0,
            values: Vec::new(),
            sample_index: 0,
            cursor: 0,
            jitter,
        }
    }

    /// The smallest perfect square `>= n`.
    #[inline]
    pub fn round_up_sample_count(n: u32) -> u32 {
        let n = n.max(1);
        let side = (n as Float).sqrt().ceil() as u32;
        side * side
    }

    pub fn begin_pixel(&mut self, samples: u32, rng: &mut Pcg32) {
        let samples = Self::round_up_sample_count(samples);
        self.samples = samples;
        self.side = (samples as Float).sqrt().round() as u32;
        debug_assert_eq!(self.side * self.side, self.samples);
        self.values = vec![Point2f::new(0.0 as Float, 0.0 as Float); (self.dims * self.samples) as usize];
        let inv_side = 1.0 as Float / self.side as Float;
        for d in 0..self.dims {
            let start = (d * self.samples) as usize;
            let end = start + self.samples as usize;
            let column = &mut self.values[start..end];
            let mut i = 0;
            for x in 0..self.side {
                for y in 0..self.side {
                    let jx = if self.jitter { rng.next_float() } else { 0.5 as Float };
                    let jy = if self.jitter { rng.next_float() } else { 0.5 as Float };
                    column[i] = Point2f::new((x as Float + jx) * inv_side, (y as Float + jy) * inv_side);
                    i += 1;
                }
            }
            shuffle(column, rng);
        }
        self.sample_index = 0;
        self.cursor = 0;
    }

    pub fn get(&mut self) -> Point2f {
        if self.samples == 0 {
            return Point2f::new(0.5 as Float, 0.5 as Float);
        }
        let d = self.cursor % self.dims.max(1);
        self.cursor += 1;
        self.values[(d * self.samples + self.sample_index) as usize]
    }

    pub fn next_sample(&mut self) -> bool {
        self.cursor = 0;
        self.sample_index += 1;
        self.sample_index < self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stratified_1d_round_trips_every_stratum() {
        let mut rng = Pcg32::from_seed(3, 0);
        let mut gen = Stratified1D::new(1, true);
        gen.begin_pixel(16, &mut rng);
        let mut seen = vec![false; 16];
        loop {
            let v = gen.get();
            let stratum = (v * 16.0 as Float) as usize;
            seen[stratum] = true;
            if !gen.next_sample() {
                break;
            }
        }
        assert!(seen.iter().all(|&b| b));
    }

    #[test]
    fn stratified_2d_round_up_is_a_perfect_square() {
        assert_eq!(Stratified2D::round_up_sample_count(10), 16);
        assert_eq!(Stratified2D::round_up_sample_count(16), 16);
        assert_eq!(Stratified2D::round_up_sample_count(17), 25);
    }

    #[test]
    fn stratified_2d_values_stay_in_unit_square() {
        let mut rng = Pcg32::from_seed(11, 2);
        let mut gen = Stratified2D::new(1, true);
        gen.begin_pixel(9, &mut rng);
        loop {
            let v = gen.get();
            assert!(v.x >= 0.0 as Float && v.x < 1.0 as Float);
            assert!(v.y >= 0.0 as Float && v.y < 1.0 as Float);
            if !gen.next_sample() {
                break;
            }
        }
    }
}
