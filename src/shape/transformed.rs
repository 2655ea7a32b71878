// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Places an inner `Surface` into world space under a fixed
//! `local_to_world` transform, mirroring the teacher's
//! `component::transformed` wrapper but holding the matrix pair by
//! value rather than by borrow, since `scene::Entity` owns its surfaces
//! for the whole render rather than borrowing them per frame.

use arena::PagedArena;
use geometry::prelude::*;
use super::Surface;

/// `S` placed in world space by `local_to_world`. Rays are pulled back
/// into `S`'s local frame, hits are pushed back out to world space.
pub struct TransformedSurface<S> {
    inner: S,
    local_to_world: Matrix4f,
    world_to_local: Matrix4f,
    /// inverse-transpose of `local_to_world`, precomputed once so
    /// per-hit normal transforms don't re-invert
    normal_to_world: Matrix4f,
}

impl<S: Surface> TransformedSurface<S> {
    pub fn new(inner: S, local_to_world: Matrix4f) -> TransformedSurface<S> {
        let world_to_local = local_to_world.invert().expect("entity transform must be invertible");
        let normal_to_world = world_to_local.transpose();
        TransformedSurface { inner, local_to_world, world_to_local, normal_to_world }
    }

    fn to_local_ray(&self, ray: &RawRay) -> RawRay {
        RawRay::new(
            self.world_to_local.transform_point(ray.origin()),
            self.world_to_local.transform_vector(ray.direction()),
            ray.max_extend(),
        )
    }

    fn to_world_normal(&self, n: Vector3f) -> Vector3f {
        self.normal_to_world.transform_vector(n).normalize()
    }

    fn to_world_bounds(&self, b: BBox3f) -> BBox3f {
        let mut out: Option<BBox3f> = None;
        for i in 0..8 {
            let p = self.local_to_world.transform_point(b.corner(i));
            out = Some(match out {
                Some(o) => o.extend(p),
                None => BBox3f::new(p, p),
            });
        }
        out.unwrap()
    }
}

impl<S: Surface> Surface for TransformedSurface<S> {
    #[inline]
    fn primitive_count(&self) -> usize {
        self.inner.primitive_count()
    }

    fn bounds(&self, primitive: usize) -> BBox3f {
        self.to_world_bounds(self.inner.bounds(primitive))
    }

    /// exact under rigid transforms and uniform scale; the interface has
    /// no general area-under-transform, so non-uniform scale biases
    /// area-based light sampling slightly. Entities are expected to be
    /// placed with rigid/uniform transforms.
    fn area(&self, primitive: usize) -> Float {
        self.inner.area(primitive)
    }

    fn raycast(&self, primitive: usize, ray: &RawRay, t_max: Float) -> Option<Float> {
        let local_ray = self.to_local_ray(ray);
        self.inner.raycast(primitive, &local_ray, t_max)
    }

    fn raycast_surface_point<'a>(
        &'a self,
        primitive: usize,
        ray: &RawRay,
        t_max: Float,
        arena: &'a PagedArena,
    ) -> Option<(Float, SurfacePoint<'a>)> {
        let local_ray = self.to_local_ray(ray);
        let (t, mut sp) = self.inner.raycast_surface_point(primitive, &local_ray, t_max, arena)?;
        sp.position = self.local_to_world.transform_point(sp.position);
        sp.normal = self.to_world_normal(sp.normal);
        let tangent = self.local_to_world.transform_vector(sp.shading.tangent()).normalize();
        let bitangent = self.local_to_world.transform_vector(sp.shading.bitangent()).normalize();
        let normal = self.to_world_normal(sp.shading.normal());
        sp.shading = Frame::new(tangent, normal, bitangent);
        Some((t, sp))
    }

    fn sample_p(&self, primitive: usize, u: Point2f) -> (Point3f, Vector3f) {
        let (p, n) = self.inner.sample_p(primitive, u);
        (self.local_to_world.transform_point(p), self.to_world_normal(n))
    }

    fn normal_at(&self, primitive: usize, p: Point3f) -> Vector3f {
        let local_p = self.world_to_local.transform_point(p);
        self.to_world_normal(self.inner.normal_at(primitive, local_p))
    }

    fn pdf_p(&self, primitive: usize, p: Point3f) -> Float {
        let local_p = self.world_to_local.transform_point(p);
        self.inner.pdf_p(primitive, local_p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shape::sphere::Sphere;

    #[test]
    fn translated_sphere_hits_at_offset_center() {
        let local_to_world = Matrix4f::from_translation(Vector3f::new(5.0 as Float, 0.0 as Float, 0.0 as Float));
        let sphere = TransformedSurface::new(Sphere::new(1.0 as Float), local_to_world);
        let ray = RawRay::from_od(Point3f::new(5.0 as Float, 0.0 as Float, -10.0 as Float), Vector3f::new(0.0 as Float, 0.0 as Float, 1.0 as Float));
        let t = sphere.raycast(0, &ray, float::infinity()).expect("ray should hit translated sphere");
        assert!((t - 9.0 as Float).abs() < 1e-4 as Float);
    }

    #[test]
    fn translated_sphere_normal_points_outward() {
        let local_to_world = Matrix4f::from_translation(Vector3f::new(5.0 as Float, 0.0 as Float, 0.0 as Float));
        let sphere = TransformedSurface::new(Sphere::new(1.0 as Float), local_to_world);
        let n = sphere.normal_at(0, Point3f::new(6.0 as Float, 0.0 as Float, 0.0 as Float));
        assert!((n - Vector3f::new(1.0 as Float, 0.0 as Float, 0.0 as Float)).magnitude() < 1e-4 as Float);
    }
}
