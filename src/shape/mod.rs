// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Defines `Surface`, a geometric entity that may expose several
//! intersectable primitives (e.g. one `TriangleMesh` is one `Surface`
//! holding many triangle primitives) under a single world transform.

use arena::PagedArena;
use geometry::prelude::*;

/// A geometric entity holding `primitive_count()` intersectable
/// primitives, all in the same local frame. `accel` builds one BVH
/// leaf per `(surface, primitive)` pair rather than per `Surface`, so
/// a mesh's triangles interleave with other surfaces' primitives in
/// the same tree.
pub trait Surface: Sync + Send {
    /// number of independently intersectable primitives this surface
    /// exposes (`1` for a sphere/plane, the triangle count for a mesh)
    fn primitive_count(&self) -> usize;

    /// bounding box of one primitive, in local space
    fn bounds(&self, primitive: usize) -> BBox3f;

    /// surface area of one primitive, in local space
    fn area(&self, primitive: usize) -> Float;

    /// cheap hit test against one primitive: does `ray` hit it before
    /// `t_max`? Used for BVH occlusion queries that never need the
    /// full `SurfacePoint`.
    fn raycast(&self, primitive: usize, ray: &RawRay, t_max: Float) -> Option<Float>;

    /// full hit test against one primitive, building a `SurfacePoint`
    /// out of `arena`. Returns the hit distance alongside it.
    fn raycast_surface_point<'a>(
        &'a self,
        primitive: usize,
        ray: &RawRay,
        t_max: Float,
        arena: &'a PagedArena,
    ) -> Option<(Float, SurfacePoint<'a>)>;

    /// sample a point and outward-facing normal on one primitive,
    /// uniformly by area
    fn sample_p(&self, primitive: usize, u: Point2f) -> (Point3f, Vector3f);

    /// the outward-facing normal at `p`, a point already known to lie
    /// on `primitive` (e.g. from a prior `raycast`). Cheaper than
    /// `raycast_surface_point` when only the normal is needed, as when
    /// `AreaLight::pdf_wi` recovers the incidence cosine.
    fn normal_at(&self, primitive: usize, p: Point3f) -> Vector3f;

    /// pdf (wrt area) of a point sampled by `sample_p`; defaults to
    /// `1 / area`, correct for uniform-by-area sampling
    #[inline]
    fn pdf_p(&self, primitive: usize, _p: Point3f) -> Float {
        1.0 as Float / self.area(primitive)
    }
}

pub mod sphere;
pub mod plane;
pub mod triangle;
pub mod transformed;
pub mod prelude;
#[cfg(test)]
mod tests;
