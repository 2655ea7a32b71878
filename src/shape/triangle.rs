// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A triangle mesh, built directly from typed vertex/index buffers
//! (mesh asset decoding is out of scope; callers hand over already
//! decoded data). Each triangle is one `Surface` primitive.

use arena::PagedArena;
use geometry::prelude::*;
use sample::sample_uniform_triangle;
use super::Surface;

/// An indexed triangle mesh. `indices.len() / 3` is the triangle
/// count; `indices[3*i .. 3*i+3]` are the three vertex indices of
/// triangle `i`.
pub struct TriangleMesh {
    vertices: Vec<Point3f>,
    indices: Vec<usize>,
    normals: Option<Vec<Vector3f>>,
    uvs: Option<Vec<Point2f>>,
    bbox: BBox3f,
}

impl TriangleMesh {
    pub fn new(
        vertices: Vec<Point3f>,
        indices: Vec<usize>,
        normals: Option<Vec<Vector3f>>,
        uvs: Option<Vec<Point2f>>,
    ) -> TriangleMesh {
        assert!(indices.len() % 3 == 0, "triangle mesh index count must be a multiple of 3");
        let mut bbox = BBox3f::new(vertices[0], vertices[0]);
        for p in &vertices {
            bbox = bbox.extend(*p);
        }
        TriangleMesh { vertices, indices, normals, uvs, bbox }
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn bounding(&self) -> BBox3f {
        self.bbox
    }

    #[inline]
    fn vidx(&self, primitive: usize, corner: usize) -> usize {
        self.indices[3 * primitive + corner]
    }

    #[inline]
    fn positions(&self, primitive: usize) -> (Point3f, Point3f, Point3f) {
        (
            self.vertices[self.vidx(primitive, 0)],
            self.vertices[self.vidx(primitive, 1)],
            self.vertices[self.vidx(primitive, 2)],
        )
    }

    fn uvs_of(&self, primitive: usize) -> (Point2f, Point2f, Point2f) {
        if let Some(ref uvs) = self.uvs {
            (
                uvs[self.vidx(primitive, 0)],
                uvs[self.vidx(primitive, 1)],
                uvs[self.vidx(primitive, 2)],
            )
        } else {
            (
                Point2f::new(0.0 as Float, 0.0 as Float),
                Point2f::new(1.0 as Float, 0.0 as Float),
                Point2f::new(1.0 as Float, 1.0 as Float),
            )
        }
    }

    /// tangent-space derivatives of position wrt uv, falling back to an
    /// arbitrary basis around the geometric normal when the uv mapping
    /// is degenerate
    fn compute_dpduv(p0: Vector3f, p1: Vector3f, p2: Vector3f, uvs: (Point2f, Point2f, Point2f)) -> (Vector3f, Vector3f) {
        let duv02 = uvs.0.to_vec() - uvs.2.to_vec();
        let duv12 = uvs.1.to_vec() - uvs.2.to_vec();
        let dp02 = p0 - p2;
        let dp12 = p1 - p2;
        let determinant = duv02.x * duv12.y - duv02.y * duv12.x;
        if determinant == 0.0 as Float {
            let n = (p2 - p0).cross(p1 - p0);
            let (t, b) = ::geometry::foundamental::coordinate_system(n.normalize());
            (t, b)
        } else {
            let inv_det = 1.0 as Float / determinant;
            (
                (duv12.y * dp02 - duv02.y * dp12) * inv_det,
                (-duv12.x * dp02 + duv02.x * dp12) * inv_det,
            )
        }
    }

    fn shading_normal(&self, primitive: usize, b: Vector3f, geometric_normal: Vector3f) -> Vector3f {
        if let Some(ref normals) = self.normals {
            let n0 = normals[self.vidx(primitive, 0)];
            let n1 = normals[self.vidx(primitive, 1)];
            let n2 = normals[self.vidx(primitive, 2)];
            (b.x * n0 + b.y * n1 + b.z * n2).normalize()
        } else {
            geometric_normal
        }
    }
}

impl Surface for TriangleMesh {
    #[inline]
    fn primitive_count(&self) -> usize {
        self.triangle_count()
    }

    fn bounds(&self, primitive: usize) -> BBox3f {
        let (p0, p1, p2) = self.positions(primitive);
        BBox3f::new(p0, p1).extend(p2)
    }

    fn area(&self, primitive: usize) -> Float {
        let (p0, p1, p2) = self.positions(primitive);
        0.5 as Float * (p1 - p0).cross(p2 - p0).magnitude()
    }

    /// watertight ray-triangle test (Woop et al. 2013), via the ray's
    /// cached shearing transform
    fn raycast(&self, primitive: usize, ray: &RawRay, t_max: Float) -> Option<Float> {
        let (p0, p1, p2) = self.positions(primitive);
        let stc = ray.shearing_transform();
        let (mut p0t, mut p1t, mut p2t) = stc.apply(p0, p1, p2);
        let e0 = p1t.x * p2t.y - p1t.y * p2t.x;
        let e1 = p2t.x * p0t.y - p2t.y * p0t.x;
        let e2 = p0t.x * p1t.y - p0t.y * p1t.x;

        const ZERO: Float = 0.0 as Float;
        if (e0 < ZERO || e1 < ZERO || e2 < ZERO) && (e0 > ZERO || e1 > ZERO || e2 > ZERO) {
            return None;
        }
        let det = e0 + e1 + e2;
        if det == ZERO {
            return None;
        }

        p0t.z *= stc.shear.z;
        p1t.z *= stc.shear.z;
        p2t.z *= stc.shear.z;
        let tscaled = e0 * p0t.z + e1 * p1t.z + e2 * p2t.z;
        if det < ZERO && (tscaled >= ZERO || tscaled < t_max * det) {
            return None;
        } else if det > ZERO && (tscaled <= ZERO || tscaled > t_max * det) {
            return None;
        }

        Some(tscaled / det)
    }

    fn raycast_surface_point<'a>(
        &'a self,
        primitive: usize,
        ray: &RawRay,
        t_max: Float,
        arena: &'a PagedArena,
    ) -> Option<(Float, SurfacePoint<'a>)> {
        let (p0, p1, p2) = self.positions(primitive);
        let stc = ray.shearing_transform();
        let (mut p0t, mut p1t, mut p2t) = stc.apply(p0, p1, p2);
        let e0 = p1t.x * p2t.y - p1t.y * p2t.x;
        let e1 = p2t.x * p0t.y - p2t.y * p0t.x;
        let e2 = p0t.x * p1t.y - p0t.y * p1t.x;

        const ZERO: Float = 0.0 as Float;
        if (e0 < ZERO || e1 < ZERO || e2 < ZERO) && (e0 > ZERO || e1 > ZERO || e2 > ZERO) {
            return None;
        }
        let det = e0 + e1 + e2;
        if det == ZERO {
            return None;
        }
        p0t.z *= stc.shear.z;
        p1t.z *= stc.shear.z;
        p2t.z *= stc.shear.z;
        let tscaled = e0 * p0t.z + e1 * p1t.z + e2 * p2t.z;
        if det < ZERO && (tscaled >= ZERO || tscaled < t_max * det) {
            return None;
        } else if det > ZERO && (tscaled <= ZERO || tscaled > t_max * det) {
            return None;
        }

        let inv_det = 1.0 as Float / det;
        let b = Vector3f::new(e0 * inv_det, e1 * inv_det, e2 * inv_det);
        let t = tscaled * inv_det;

        let p0v = p0.to_vec();
        let p1v = p1.to_vec();
        let p2v = p2.to_vec();
        let phit = Point3f::from_vec(b.x * p0v + b.y * p1v + b.z * p2v);
        let uvs = self.uvs_of(primitive);
        let uvhit = Point2f::from_vec(b.x * uvs.0.to_vec() + b.y * uvs.1.to_vec() + b.z * uvs.2.to_vec());

        let geometric_normal = (p1v - p0v).cross(p2v - p0v).normalize();
        let shading_normal = self.shading_normal(primitive, b, geometric_normal);
        let (dpdu, _dpdv) = TriangleMesh::compute_dpduv(p0v, p1v, p2v, uvs);
        let tangent = (dpdu - shading_normal * dpdu.dot(shading_normal)).normalize();
        let bitangent = shading_normal.cross(tangent);
        let shading = Frame::new(tangent, shading_normal, bitangent);

        let _ = arena;
        Some((t, SurfacePoint::new(phit, geometric_normal, uvhit, shading)))
    }

    fn sample_p(&self, primitive: usize, u: Point2f) -> (Point3f, Vector3f) {
        let (p0, p1, p2) = self.positions(primitive);
        let b = sample_uniform_triangle(u);
        let p = Point3f::from_vec(b.x * p0.to_vec() + b.y * p1.to_vec() + b.z * p2.to_vec());
        let n = self.shading_normal(primitive, b, (p1 - p0).cross(p2 - p0).normalize());
        (p, n)
    }

    /// flat geometric normal; independent of where on the triangle `p`
    /// actually lies, since a single triangle is planar
    #[inline]
    fn normal_at(&self, primitive: usize, _p: Point3f) -> Vector3f {
        let (p0, p1, p2) = self.positions(primitive);
        (p1 - p0).cross(p2 - p0).normalize()
    }
}
