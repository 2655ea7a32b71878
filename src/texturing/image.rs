// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A texture backed by an already-decoded `width x height` buffer.
//! Decoding image files into such a buffer is the caller's job.

use geometry::prelude::*;
use spectrum::RGBSpectrumf;
use super::Texture2D;

/// How an out-of-`[0,1)` uv coordinate is brought back in range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
    Clamp,
}

impl WrapMode {
    #[inline]
    fn wrap(&self, mut x: Float) -> Float {
        match self {
            WrapMode::Repeat => {
                x -= x.floor();
                x
            }
            WrapMode::Clamp => float::clamp(x, 0.0 as Float, (1.0 as Float) - ::std::f32::EPSILON as Float),
        }
    }
}

/// Reconstruction kernel used by `evaluate`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reconstruction {
    Nearest,
    Bilinear,
}

/// A 2D image, row-major, `(0, 0)` at the top-left texel.
pub struct Image {
    width: usize,
    height: usize,
    texels: Vec<RGBSpectrumf>,
    wrap: WrapMode,
    reconstruction: Reconstruction,
}

impl Image {
    pub fn new(width: usize, height: usize, texels: Vec<RGBSpectrumf>) -> Image {
        assert_eq!(texels.len(), width * height, "texel buffer doesn't match width*height");
        Image { width, height, texels, wrap: WrapMode::Repeat, reconstruction: Reconstruction::Bilinear }
    }

    pub fn with_wrap(mut self, wrap: WrapMode) -> Image {
        self.wrap = wrap;
        self
    }

    pub fn with_reconstruction(mut self, reconstruction: Reconstruction) -> Image {
        self.reconstruction = reconstruction;
        self
    }

    #[inline]
    fn texel(&self, x: i64, y: i64) -> RGBSpectrumf {
        let x = (x.rem_euclid(self.width as i64)) as usize;
        let y = (y.rem_euclid(self.height as i64)) as usize;
        self.texels[y * self.width + x]
    }

    fn sample_bilinear(&self, u: Float, v: Float) -> RGBSpectrumf {
        let x = u * self.width as Float - 0.5 as Float;
        let y = v * self.height as Float - 0.5 as Float;
        let x0 = x.floor();
        let y0 = y.floor();
        let dx = x - x0;
        let dy = y - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);
        let c00 = self.texel(x0, y0);
        let c10 = self.texel(x0 + 1, y0);
        let c01 = self.texel(x0, y0 + 1);
        let c11 = self.texel(x0 + 1, y0 + 1);
        c00 * ((1.0 as Float - dx) * (1.0 as Float - dy))
            + c10 * (dx * (1.0 as Float - dy))
            + c01 * ((1.0 as Float - dx) * dy)
            + c11 * (dx * dy)
    }

    fn sample_nearest(&self, u: Float, v: Float) -> RGBSpectrumf {
        let x = (u * self.width as Float) as i64;
        let y = (v * self.height as Float) as i64;
        self.texel(x, y)
    }
}

impl Texture2D<RGBSpectrumf> for Image {
    fn evaluate(&self, uv: Point2f) -> RGBSpectrumf {
        let u = self.wrap.wrap(uv.x);
        let v = self.wrap.wrap(uv.y);
        match self.reconstruction {
            Reconstruction::Nearest => self.sample_nearest(u, v),
            Reconstruction::Bilinear => self.sample_bilinear(u, v),
        }
    }

    /// average of all texels whose centers fall in `[uv0, uv1)`,
    /// wrapping per `Repeat`; degenerates to a point sample if the
    /// rectangle covers less than one texel
    fn integrate(&self, uv0: Point2f, uv1: Point2f) -> RGBSpectrumf {
        let x0 = (uv0.x * self.width as Float).floor() as i64;
        let x1 = ((uv1.x * self.width as Float).ceil() as i64).max(x0 + 1);
        let y0 = (uv0.y * self.height as Float).floor() as i64;
        let y1 = ((uv1.y * self.height as Float).ceil() as i64).max(y0 + 1);

        let mut sum = RGBSpectrumf::new(0.0 as Float, 0.0 as Float, 0.0 as Float);
        let mut count: Float = 0.0 as Float;
        for y in y0..y1 {
            for x in x0..x1 {
                sum += self.texel(x, y);
                count += 1.0 as Float;
            }
        }
        sum * (1.0 as Float / count)
    }
}
