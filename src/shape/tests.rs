// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// tests
use super::*;

#[cfg(test)]
mod test_sphere {
    use super::*;
    use super::sphere::*;

    #[test]
    fn test_intersect_hits_full_sphere() {
        let sphere = Sphere::new(1.0 as Float);
        let ray = RawRay::from_od(
            Point3f::new(0. as Float, 0. as Float, -10. as Float),
            Vector3f::new(0. as Float, 0. as Float, 1. as Float),
        );
        assert!(sphere.raycast(0, &ray, float::infinity()).is_some());

        let sphere = Sphere::new(20. as Float);
        let ray = RawRay::from_od(
            Point3f::new(0. as Float, 0. as Float, -30. as Float),
            Vector3f::new(0. as Float, 0. as Float, 1. as Float),
        );
        assert!(sphere.raycast(0, &ray, float::infinity()).is_some());
    }

    #[test]
    fn test_intersect_misses() {
        let sphere = Sphere::new(1.0 as Float);
        let ray = RawRay::from_od(
            Point3f::new(5. as Float, 5. as Float, -10. as Float),
            Vector3f::new(0. as Float, 0. as Float, 1. as Float),
        );
        assert!(sphere.raycast(0, &ray, float::infinity()).is_none());
    }

    #[test]
    fn test_area_matches_sphere_formula() {
        let sphere = Sphere::new(2.0 as Float);
        let expected = 4.0 as Float * float::pi() * 4.0 as Float;
        assert!((sphere.area(0) - expected).abs() < 1e-3);
    }
}

#[cfg(test)]
mod test_triangle {
    use super::*;
    use super::triangle::*;

    fn unit_triangle() -> TriangleMesh {
        TriangleMesh::new(
            vec![
                Point3f::new(0. as Float, 0. as Float, 0. as Float),
                Point3f::new(1. as Float, 0. as Float, 0. as Float),
                Point3f::new(0. as Float, 1. as Float, 0. as Float),
            ],
            vec![0, 1, 2],
            None,
            None,
        )
    }

    #[test]
    fn test_intersect_through_triangle() {
        let mesh = unit_triangle();
        let ray = RawRay::from_od(
            Point3f::new(0.2 as Float, 0.2 as Float, -1. as Float),
            Vector3f::new(0. as Float, 0. as Float, 1. as Float),
        );
        let t = mesh.raycast(0, &ray, float::infinity());
        assert!(t.is_some());
        assert!((t.unwrap() - 1.0 as Float).abs() < 1e-4);
    }

    #[test]
    fn test_intersect_outside_triangle_misses() {
        let mesh = unit_triangle();
        let ray = RawRay::from_od(
            Point3f::new(2.0 as Float, 2.0 as Float, -1. as Float),
            Vector3f::new(0. as Float, 0. as Float, 1. as Float),
        );
        assert!(mesh.raycast(0, &ray, float::infinity()).is_none());
    }

    #[test]
    fn test_area() {
        let mesh = unit_triangle();
        assert!((mesh.area(0) - 0.5 as Float).abs() < 1e-4);
    }
}
