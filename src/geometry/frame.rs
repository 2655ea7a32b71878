// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An orthonormal shading frame, used to move directions between world
//! space and the y-up local space the `bxdf` layer evaluates lobes in.

use geometry::prelude::*;
use geometry::foundamental::coordinate_system;

/// An orthonormal basis `(tangent, normal, bitangent)`. `world_to_local`
/// maps a world direction into the y-up local space where `normal` is
/// the `y` axis; `local_to_world` is its inverse.
#[derive(Copy, Clone, Debug)]
pub struct Frame {
    tangent: Vector3f,
    normal: Vector3f,
    bitangent: Vector3f,
}

impl Frame {
    /// Builds a frame from a single normal, picking an arbitrary
    /// orthogonal tangent/bitangent pair.
    #[inline]
    pub fn from_normal(normal: Vector3f) -> Frame {
        let (tangent, bitangent) = coordinate_system(normal);
        Frame { tangent, normal, bitangent }
    }

    /// Builds a frame from an explicit, already-orthonormal basis.
    #[inline]
    pub fn new(tangent: Vector3f, normal: Vector3f, bitangent: Vector3f) -> Frame {
        Frame { tangent, normal, bitangent }
    }

    #[inline]
    pub fn tangent(&self) -> Vector3f { self.tangent }

    #[inline]
    pub fn normal(&self) -> Vector3f { self.normal }

    #[inline]
    pub fn bitangent(&self) -> Vector3f { self.bitangent }

    /// World direction `w` expressed in this frame's local space, `y`
    /// being the component along `normal`.
    #[inline]
    pub fn world_to_local(&self, w: Vector3f) -> Vector3f {
        Vector3f::new(
            w.dot(self.tangent),
            w.dot(self.normal),
            w.dot(self.bitangent),
        )
    }

    /// Local direction `w` (`y` along `normal`) expressed in world space.
    #[inline]
    pub fn local_to_world(&self, w: Vector3f) -> Vector3f {
        self.tangent * w.x + self.normal * w.y + self.bitangent * w.z
    }
}
