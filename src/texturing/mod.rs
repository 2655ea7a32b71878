// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! 2D textures over uv coordinates. Asset decoding (image/mesh file
//! formats) is out of scope; `Image` wraps an already-decoded linear
//! buffer.
//!
//! No ray-differential footprint tracking: reconstruction is plain
//! bilinear or nearest, and `integrate` box-filters over a uv
//! rectangle, which is all `light::InfinityAreaLight`'s importance
//! distribution needs.

use geometry::prelude::*;
use std::sync::Arc;

/// A value sampleable over the unit uv square.
pub trait Texture2D<T>: Send + Sync {
    /// point-sample the texture at `uv`
    fn evaluate(&self, uv: Point2f) -> T;

    /// box-filtered average over the axis-aligned rectangle
    /// `[uv0, uv1)`, wrapping at the uv boundary
    fn integrate(&self, uv0: Point2f, uv1: Point2f) -> T;
}

impl<T, U: Texture2D<T> + ?Sized> Texture2D<T> for Arc<U> {
    #[inline]
    fn evaluate(&self, uv: Point2f) -> T {
        (**self).evaluate(uv)
    }

    #[inline]
    fn integrate(&self, uv0: Point2f, uv1: Point2f) -> T {
        (**self).integrate(uv0, uv1)
    }
}

pub mod constant;
pub mod image;
pub mod prelude;
