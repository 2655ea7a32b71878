// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A pinhole perspective sensor: generates primary camera rays from a
//! film-space sample, and (for the backward/bidirectional integrators)
//! projects an arbitrary world point back onto the film to connect a
//! light subpath to the eye. Grounded on the teacher's
//! `filming::perspective::PerspecCam`, stripped of its thin-lens and
//! ray-differential machinery (no depth of field, no texture filtering
//! in this spec) and of its own `Film`/tiling (the renderer owns tiling
//! and per-worker accumulation instead, per §4.11).

use config::CameraConfig;
use geometry::prelude::*;
use spectrum::RGBSpectrumf;

/// A connection from a light-subpath vertex back to the sensor: which
/// pixel it lands on, the direction and distance to the eye, and the
/// importance/pdf needed to weight the contribution.
pub struct SensorConnection {
    pub pixel: (u32, u32),
    /// unit direction from the light-subpath vertex toward the eye
    pub wi: Vector3f,
    pub distance: Float,
    /// `We`, the sensor's directional importance for this connection
    pub importance: RGBSpectrumf,
}

/// A pinhole camera: `eye` is a single point, so `pdf_p0 = 1` always
/// and every camera-side pdf collapses into `importance`.
pub struct Sensor {
    eye: Point3f,
    camera_to_world: Matrix4f,
    world_to_camera: Matrix4f,
    tan_half_fov_y: Float,
    aspect: Float,
    resolution: (u32, u32),
    /// area of the sensor's virtual screen window at `z = 1` in camera
    /// space; `1/(screen_area * cos^4)` is the pinhole importance that
    /// makes a primary ray's throughput seed to exactly `1`
    screen_area: Float,
}

impl Sensor {
    pub fn new(config: &CameraConfig) -> Sensor {
        let camera_to_world = config.camera_to_world;
        let world_to_camera = camera_to_world.invert().expect("camera transform must be invertible");
        let eye = camera_to_world.transform_point(Point3f::new(0.0 as Float, 0.0 as Float, 0.0 as Float));
        let tan_half_fov_y = (config.fov_y * 0.5 as Float).tan();
        let aspect = config.resolution.0 as Float / config.resolution.1 as Float;
        let screen_area = (2.0 as Float * tan_half_fov_y * aspect) * (2.0 as Float * tan_half_fov_y);
        Sensor {
            eye,
            camera_to_world,
            world_to_camera,
            tan_half_fov_y,
            aspect,
            resolution: config.resolution,
            screen_area,
        }
    }

    #[inline]
    pub fn eye(&self) -> Point3f {
        self.eye
    }

    #[inline]
    pub fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    /// world-space direction the film plane faces, i.e. camera-space `+z`
    /// carried through `camera_to_world`; the cosine a primary ray's
    /// throughput is weighted by is measured against this.
    #[inline]
    pub fn forward(&self) -> Vector3f {
        self.camera_to_world
            .transform_vector(Vector3f::new(0.0 as Float, 0.0 as Float, 1.0 as Float))
            .normalize()
    }

    /// Generates the primary ray through film-space sample `s` (`[0,1)^2`,
    /// `(0,0)` top-left). Returns `(ray, p0, pdf_p0, pdf_wi, we)`: the
    /// pinhole's `p0` is the fixed eye point (`pdf_p0 = 1`), and `we`,
    /// `pdf_wi` are chosen so the seeded path throughput
    /// `we * |n0.wi| / (pdf_p0 * pdf_wi)` is exactly `1`, as is standard
    /// for an idealized pinhole (no depth of field to importance-sample).
    pub fn generate_primary(&self, s: Point2f) -> (RawRay, Point3f, Float, Float, RGBSpectrumf) {
        let sx = (2.0 as Float * s.x - 1.0 as Float) * self.tan_half_fov_y * self.aspect;
        let sy = (1.0 as Float - 2.0 as Float * s.y) * self.tan_half_fov_y;
        let dir_camera = Vector3f::new(sx, sy, 1.0 as Float).normalize();
        let dir_world = self.camera_to_world.transform_vector(dir_camera).normalize();
        let costheta = dir_camera.z;
        let we_scalar = 1.0 as Float / (self.screen_area * costheta.powi(4));
        let pdf_wi = 1.0 as Float / (self.screen_area * costheta.powi(3));
        let we = RGBSpectrumf::new(we_scalar, we_scalar, we_scalar);
        (RawRay::from_od(self.eye, dir_world), self.eye, 1.0 as Float, pdf_wi, we)
    }

    /// Projects `reference` onto the film, for a light-subpath vertex
    /// attempting a sensor connection. `None` when the point falls
    /// behind the eye or outside the frustum.
    pub fn sample_p(&self, reference: Point3f) -> Option<SensorConnection> {
        let p_camera = self.world_to_camera.transform_point(reference);
        if p_camera.z <= 0.0 as Float {
            return None;
        }
        let sx = p_camera.x / p_camera.z;
        let sy = p_camera.y / p_camera.z;
        let half_x = self.tan_half_fov_y * self.aspect;
        if sx.abs() > half_x || sy.abs() > self.tan_half_fov_y {
            return None;
        }
        let px = ((sx / half_x + 1.0 as Float) * 0.5 as Float) * self.resolution.0 as Float;
        let py = ((1.0 as Float - sy / self.tan_half_fov_y) * 0.5 as Float) * self.resolution.1 as Float;
        let pixel = (
            (px as u32).min(self.resolution.0 - 1),
            (py as u32).min(self.resolution.1 - 1),
        );

        let delta = self.eye - reference;
        let distance2 = delta.magnitude2();
        let distance = distance2.sqrt();
        let wi = delta / distance;

        let costheta = p_camera.to_vec().normalize().z;
        let importance_scalar = 1.0 as Float / (self.screen_area * costheta.powi(4));
        let importance = RGBSpectrumf::new(importance_scalar, importance_scalar, importance_scalar);
        Some(SensorConnection { pixel, wi, distance, importance })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_config(resolution: (u32, u32)) -> CameraConfig {
        CameraConfig {
            camera_to_world: Matrix4f::from_scale(1.0 as Float),
            fov_y: float::frac_pi_2(),
            resolution,
        }
    }

    #[test]
    fn primary_ray_through_image_center_points_down_z() {
        let sensor = Sensor::new(&identity_config((64, 64)));
        let (ray, p0, pdf_p0, _, _) = sensor.generate_primary(Point2f::new(0.5 as Float, 0.5 as Float));
        assert_eq!(p0, Point3f::new(0.0 as Float, 0.0 as Float, 0.0 as Float));
        assert_eq!(pdf_p0, 1.0 as Float);
        assert!((ray.direction() - Vector3f::new(0.0 as Float, 0.0 as Float, 1.0 as Float)).magnitude() < 1e-5 as Float);
    }

    #[test]
    fn point_on_axis_projects_to_the_image_center() {
        let sensor = Sensor::new(&identity_config((64, 48)));
        let connection = sensor.sample_p(Point3f::new(0.0 as Float, 0.0 as Float, 5.0 as Float)).expect("point in front of the eye should project");
        assert_eq!(connection.pixel, (32, 24));
    }

    #[test]
    fn point_behind_the_eye_does_not_project() {
        let sensor = Sensor::new(&identity_config((64, 64)));
        assert!(sensor.sample_p(Point3f::new(0.0 as Float, 0.0 as Float, -5.0 as Float)).is_none());
    }
}
