// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Fundamental definition preludes

pub use super::foundamental::*;
pub use super::ray::{Ray, RawRay, RayDifferential};
pub use super::transform::TransformExt;
pub use super::bbox::{BBox2, BBox3, BBox2f, BBox3f};
pub use super::frame::Frame;
pub use super::surface_point::SurfacePoint;
pub use super::float;
