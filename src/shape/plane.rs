// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A finite rectangular plane in the local-space `z = 0` plane,
//! spanning `[-half_extent.x, half_extent.x] x [-half_extent.y, half_extent.y]`,
//! with `+z` as its outward normal.

use arena::PagedArena;
use geometry::prelude::*;
use super::Surface;

#[derive(Copy, Clone, PartialEq)]
pub struct Plane {
    pub half_extent: Vector2f,
}

impl Plane {
    pub fn new(half_extent: Vector2f) -> Plane {
        Plane { half_extent }
    }
}

impl Surface for Plane {
    #[inline]
    fn primitive_count(&self) -> usize {
        1
    }

    fn bounds(&self, _primitive: usize) -> BBox3f {
        BBox3f::new(
            Point3f::new(-self.half_extent.x, -self.half_extent.y, 0.0 as Float),
            Point3f::new(self.half_extent.x, self.half_extent.y, 0.0 as Float),
        )
    }

    #[inline]
    fn area(&self, _primitive: usize) -> Float {
        4.0 as Float * self.half_extent.x * self.half_extent.y
    }

    fn raycast(&self, _primitive: usize, ray: &RawRay, t_max: Float) -> Option<Float> {
        let o = ray.origin();
        let d = ray.direction();
        if d.z.abs() < float::epsilon() {
            return None;
        }
        let t = -o.z / d.z;
        if t <= 0.0 as Float || t > t_max {
            return None;
        }
        let p = ray.evaluate(t);
        if p.x.abs() > self.half_extent.x || p.y.abs() > self.half_extent.y {
            return None;
        }
        Some(t)
    }

    fn raycast_surface_point<'a>(
        &'a self,
        primitive: usize,
        ray: &RawRay,
        t_max: Float,
        arena: &'a PagedArena,
    ) -> Option<(Float, SurfacePoint<'a>)> {
        let t = self.raycast(primitive, ray, t_max)?;
        let p = ray.evaluate(t);
        let normal = Vector3f::new(0.0 as Float, 0.0 as Float, 1.0 as Float);
        let u = (p.x + self.half_extent.x) / (2.0 as Float * self.half_extent.x);
        let v = (p.y + self.half_extent.y) / (2.0 as Float * self.half_extent.y);
        let shading = Frame::new(
            Vector3f::new(1.0 as Float, 0.0 as Float, 0.0 as Float),
            normal,
            Vector3f::new(0.0 as Float, 1.0 as Float, 0.0 as Float),
        );
        let _ = arena;
        Some((t, SurfacePoint::new(p, normal, Point2f::new(u, v), shading)))
    }

    fn sample_p(&self, _primitive: usize, u: Point2f) -> (Point3f, Vector3f) {
        let p = Point3f::new(
            (u.x * 2.0 as Float - 1.0 as Float) * self.half_extent.x,
            (u.y * 2.0 as Float - 1.0 as Float) * self.half_extent.y,
            0.0 as Float,
        );
        (p, Vector3f::new(0.0 as Float, 0.0 as Float, 1.0 as Float))
    }

    #[inline]
    fn normal_at(&self, _primitive: usize, _p: Point3f) -> Vector3f {
        Vector3f::new(0.0 as Float, 0.0 as Float, 1.0 as Float)
    }
}
