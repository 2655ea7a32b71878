// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The single point-on-a-surface record threaded through raycasting,
//! shading and light sampling.

use geometry::prelude::*;
use light::AreaLight;
use material::Material;
use medium::Medium;
use shape::Surface;
use std::any::Any;

/// Everything known about a point where a ray met a surface: enough
/// geometry to build a shading frame, enough back-references to look up
/// material/light/medium behavior, and room for the measurement
/// (sensor) side to stash an opaque payload (e.g. a pixel/lens
/// coordinate) without this type knowing about sensors at all.
///
/// Non-owning: every reference borrows from scene-lifetime data, so a
/// `SurfacePoint` never outlives the scene it was raycast against.
pub struct SurfacePoint<'a> {
    pub position: Point3f,
    pub normal: Vector3f,
    pub uv: Point2f,

    /// shading frame; may differ from the geometric `normal` under
    /// shading-normal/bump mapping
    pub shading: Frame,

    pub surface: Option<&'a (dyn Surface + Send + Sync)>,
    pub material: Option<&'a (dyn Material + Send + Sync)>,
    pub light: Option<&'a (dyn AreaLight + Send + Sync)>,
    pub medium: Option<&'a Medium>,

    /// opaque, measurement-side payload (e.g. which pixel/lens sample
    /// produced this point); the core never interprets it
    pub measurement_data: Option<&'a (dyn Any + Send + Sync)>,

    /// nested-dielectric priority; higher wins when multiple dielectric
    /// interfaces overlap at this point. `0` for opaque/non-dielectric
    /// surfaces.
    pub priority: i32,
    /// index of refraction on the side the geometric `normal` points
    /// toward; `0.0` marks a non-dielectric surface
    pub ior: Float,
}

impl<'a> SurfacePoint<'a> {
    pub fn new(position: Point3f, normal: Vector3f, uv: Point2f, shading: Frame) -> SurfacePoint<'a> {
        SurfacePoint {
            position,
            normal,
            uv,
            shading,
            surface: None,
            material: None,
            light: None,
            medium: None,
            measurement_data: None,
            priority: 0,
            ior: 0.0 as Float,
        }
    }

    /// is this point on a dielectric interface?
    #[inline]
    pub fn is_dielectric(&self) -> bool {
        self.ior != 0.0 as Float
    }

    /// shadow/scattering-ray origin offset along the geometric normal,
    /// toward the side `w` leaves on
    #[inline]
    pub fn offset_origin(&self, w: Vector3f) -> Point3f {
        const EPSILON: Float = 1e-4;
        if self.normal.dot(w) >= 0.0 as Float {
            self.position + self.normal * EPSILON
        } else {
            self.position - self.normal * EPSILON
        }
    }

    /// spawn a ray leaving this point toward `w`
    pub fn spawn_ray(&self, w: Vector3f) -> RawRay {
        RawRay::from_od(self.offset_origin(w), w)
    }

    /// spawn a shadow ray toward another surface point, clipped just
    /// short of it
    pub fn spawn_ray_to(&self, target: Point3f) -> RawRay {
        let d = target - self.position;
        let origin = self.offset_origin(d);
        RawRay::spawn(origin, target)
    }
}
