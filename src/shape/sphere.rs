// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A full sphere, centered at the local-space origin.

use arena::PagedArena;
use geometry::prelude::*;
use sample::sample_uniform_sphere;
use super::Surface;

/// A full sphere of radius `radius`, centered at the local-space
/// origin. One primitive.
#[derive(Copy, Clone, PartialEq)]
pub struct Sphere {
    pub radius: Float,
}

impl Sphere {
    #[inline]
    pub fn new(radius: Float) -> Sphere {
        assert!(radius > 0.0 as Float, "sphere radius must be positive");
        Sphere { radius }
    }

    #[inline]
    pub fn bounding(&self) -> BBox3f {
        BBox3f::new(
            Point3f::new(-self.radius, -self.radius, -self.radius),
            Point3f::new(self.radius, self.radius, self.radius),
        )
    }

    /// numerically stable quadratic solve for the nearer root within
    /// `(0, t_max]`, following the `q = -1/2(b +/- sqrt(delta))` form
    /// (avoids cancellation that the naive `(-b +/- sqrt(delta))/2a`
    /// form suffers from)
    pub fn intersect_ray(&self, ray: &RawRay, t_max: Float) -> Option<Float> {
        let o = ray.origin().to_vec();
        let d = ray.direction();
        let a = d.magnitude2();
        let b = (2.0 as Float) * o.dot(d);
        let c = o.magnitude2() - self.radius * self.radius;
        let delta = b * b - (4.0 as Float) * a * c;
        if delta < 0.0 as Float {
            return None;
        }
        let sqrt_delta = delta.sqrt();
        let q = if b < 0.0 as Float {
            -0.5 as Float * (b - sqrt_delta)
        } else {
            -0.5 as Float * (b + sqrt_delta)
        };
        let (mut t0, mut t1) = (q / a, c / q);
        if t0 > t1 {
            ::std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > t_max || t1 < 0.0 as Float {
            return None;
        }
        if t0 > 0.0 as Float {
            Some(t0)
        } else if t1 <= t_max {
            Some(t1)
        } else {
            None
        }
    }

    fn uv_and_derivatives(&self, p: Point3f) -> (Point2f, Vector3f, Vector3f) {
        let mut phi = p.y.atan2(p.x);
        if phi < 0.0 as Float {
            phi += float::pi() * 2.0 as Float;
        }
        let theta = float::clamp(p.z / self.radius, -1.0 as Float, 1.0 as Float).acos();
        let u = phi / (float::pi() * 2.0 as Float);
        let v = theta / float::pi();
        let z_radius = (p.x * p.x + p.y * p.y).sqrt();
        let (cos_phi, sin_phi) = if z_radius == 0.0 as Float {
            (1.0 as Float, 0.0 as Float)
        } else {
            (p.x / z_radius, p.y / z_radius)
        };
        let dpdu = Vector3f::new(-2.0 as Float * float::pi() * p.y, 2.0 as Float * float::pi() * p.x, 0.0 as Float);
        let dpdv = float::pi() * Vector3f::new(p.z * cos_phi, p.z * sin_phi, -self.radius * theta.sin());
        (Point2f::new(u, v), dpdu, dpdv)
    }
}

impl Surface for Sphere {
    #[inline]
    fn primitive_count(&self) -> usize {
        1
    }

    #[inline]
    fn bounds(&self, _primitive: usize) -> BBox3f {
        self.bounding()
    }

    #[inline]
    fn area(&self, _primitive: usize) -> Float {
        4.0 as Float * float::pi() * self.radius * self.radius
    }

    fn raycast(&self, _primitive: usize, ray: &RawRay, t_max: Float) -> Option<Float> {
        self.intersect_ray(ray, t_max)
    }

    fn raycast_surface_point<'a>(
        &'a self,
        _primitive: usize,
        ray: &RawRay,
        t_max: Float,
        arena: &'a PagedArena,
    ) -> Option<(Float, SurfacePoint<'a>)> {
        let t = self.intersect_ray(ray, t_max)?;
        let p = ray.evaluate(t);
        let normal = (p.to_vec() / self.radius).normalize();
        let (uv, dpdu, dpdv) = self.uv_and_derivatives(p);
        let shading = Frame::new(dpdu.normalize(), normal, dpdv.normalize());
        let _ = arena;
        Some((t, SurfacePoint::new(p, normal, uv, shading)))
    }

    fn sample_p(&self, _primitive: usize, u: Point2f) -> (Point3f, Vector3f) {
        let n = sample_uniform_sphere(u);
        (Point3f::from_vec(n * self.radius), n)
    }

    #[inline]
    fn normal_at(&self, _primitive: usize, p: Point3f) -> Vector3f {
        (p.to_vec() / self.radius).normalize()
    }
}
