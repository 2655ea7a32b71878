// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A texture that is the same value everywhere.

use geometry::prelude::*;
use super::Texture2D;

#[derive(Copy, Clone, Debug)]
pub struct Constant<T>(pub T);

impl<T: Copy + Send + Sync> Texture2D<T> for Constant<T> {
    #[inline]
    fn evaluate(&self, _uv: Point2f) -> T {
        self.0
    }

    #[inline]
    fn integrate(&self, _uv0: Point2f, _uv1: Point2f) -> T {
        self.0
    }
}
