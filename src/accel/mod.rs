// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! SAH binned BVH over `(entity, primitive)` pairs.
//!
//! The tree itself knows nothing about `Surface`/`Entity`: it stores
//! bounds and `PrimitiveRef`s, and traversal is driven by a caller-supplied
//! test closure. `scene` is the only thing that knows how to turn a
//! `PrimitiveRef` into an actual intersection.

use geometry::prelude::*;
use std::mem;

/// identifies one intersectable primitive: which entity it belongs to,
/// and which primitive within that entity's surface
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PrimitiveRef {
    pub entity: u32,
    pub primitive: u32,
}

const BUCKET_COUNT: usize = 12;
const STACK_DEPTH: usize = 64;

/// one flat node; either a leaf (`first_primitive`, `primitive_count`)
/// or an interior node (`second_child`, `split_axis`). The first child
/// of an interior node is implicitly `self_index + 1` (DFS pre-order).
#[derive(Copy, Clone)]
struct Node {
    bounds: BBox3f,
    /// leaf: index of the first primitive in `Bvh::primitives`.
    /// interior: index of the second child.
    offset: u32,
    /// leaf: primitive count. interior: split axis (0/1/2).
    count_or_axis: u16,
    is_interior: bool,
}

impl Node {
    fn leaf(bounds: BBox3f, first_primitive: u32, primitive_count: u16) -> Node {
        Node { bounds, offset: first_primitive, count_or_axis: primitive_count, is_interior: false }
    }

    fn interior(bounds: BBox3f, second_child: u32, split_axis: usize) -> Node {
        Node { bounds, offset: second_child, count_or_axis: split_axis as u16, is_interior: true }
    }
}

struct PrimitiveInfo {
    primitive: PrimitiveRef,
    bounds: BBox3f,
    centroid: Point3f,
}

/// an acceleration structure over a fixed set of `PrimitiveRef`s, built
/// once at scene-construction time and immutable afterward
pub struct Bvh {
    nodes: Vec<Node>,
    primitives: Vec<PrimitiveRef>,
}

impl Bvh {
    /// builds a BVH over `primitives`, looking up each one's bounds
    /// through `bounds_of`. Returns an empty (always-miss) tree when
    /// `primitives` is empty.
    pub fn build<F>(primitives: Vec<PrimitiveRef>, bounds_of: F) -> Bvh
        where F: Fn(PrimitiveRef) -> BBox3f
    {
        if primitives.is_empty() {
            return Bvh { nodes: Vec::new(), primitives: Vec::new() };
        }

        let mut infos: Vec<PrimitiveInfo> = primitives.iter().map(|&p| {
            let bounds = bounds_of(p);
            let centroid = bounds.pmin + bounds.pmax.to_vec();
            let centroid = Point3f::new(centroid.x * 0.5 as Float, centroid.y * 0.5 as Float, centroid.z * 0.5 as Float);
            PrimitiveInfo { primitive: p, bounds, centroid }
        }).collect();

        let mut nodes = Vec::with_capacity(2 * infos.len());
        let mut ordered = Vec::with_capacity(infos.len());
        let n = infos.len();
        build_recursive(&mut infos, 0, n, &mut nodes, &mut ordered);

        Bvh { nodes, primitives: ordered }
    }

    /// nearest-hit traversal. `test` is called once per candidate
    /// primitive with the current `t_max`; it returns the hit distance
    /// on a successful intersection.
    pub fn raycast<F>(&self, ray: &RawRay, t_max: Float, mut test: F) -> Option<(Float, PrimitiveRef)>
        where F: FnMut(PrimitiveRef, Float) -> Option<Float>
    {
        if self.nodes.is_empty() {
            return None;
        }

        let cache = BBox3f::construct_ray_cache(ray);
        let dir_is_neg = [cache.2.x, cache.2.y, cache.2.z];

        let mut stack = [0u32; STACK_DEPTH];
        let mut stack_size = 1usize;
        let mut t_max = t_max;
        let mut best: Option<(Float, PrimitiveRef)> = None;

        while stack_size > 0 {
            stack_size -= 1;
            let node_index = stack[stack_size] as usize;
            let node = &self.nodes[node_index];

            if node.bounds.intersect_ray_cached(&cache).is_none() {
                continue;
            }

            if !node.is_interior {
                let first = node.offset as usize;
                let count = node.count_or_axis as usize;
                for &primitive in &self.primitives[first..first + count] {
                    if let Some(t) = test(primitive, t_max) {
                        t_max = t;
                        best = Some((t, primitive));
                    }
                }
            } else {
                let axis = node.count_or_axis as usize;
                if dir_is_neg[axis] {
                    stack[stack_size] = node_index as u32 + 1;
                    stack[stack_size + 1] = node.offset;
                } else {
                    stack[stack_size] = node.offset;
                    stack[stack_size + 1] = node_index as u32 + 1;
                }
                stack_size += 2;
            }
        }

        best
    }

    /// occlusion query: stops at the first hit, if any
    pub fn raycast_any<F>(&self, ray: &RawRay, t_max: Float, mut test: F) -> bool
        where F: FnMut(PrimitiveRef, Float) -> bool
    {
        if self.nodes.is_empty() {
            return false;
        }

        let cache = BBox3f::construct_ray_cache(ray);
        let dir_is_neg = [cache.2.x, cache.2.y, cache.2.z];

        let mut stack = [0u32; STACK_DEPTH];
        let mut stack_size = 1usize;

        while stack_size > 0 {
            stack_size -= 1;
            let node_index = stack[stack_size] as usize;
            let node = &self.nodes[node_index];

            if node.bounds.intersect_ray_cached(&cache).is_none() {
                continue;
            }

            if !node.is_interior {
                let first = node.offset as usize;
                let count = node.count_or_axis as usize;
                for &primitive in &self.primitives[first..first + count] {
                    if test(primitive, t_max) {
                        return true;
                    }
                }
            } else {
                let axis = node.count_or_axis as usize;
                if dir_is_neg[axis] {
                    stack[stack_size] = node_index as u32 + 1;
                    stack[stack_size + 1] = node.offset;
                } else {
                    stack[stack_size] = node.offset;
                    stack[stack_size + 1] = node_index as u32 + 1;
                }
                stack_size += 2;
            }
        }

        false
    }
}

fn bounds_union_all(infos: &[PrimitiveInfo]) -> BBox3f {
    let mut b = infos[0].bounds;
    for info in &infos[1..] {
        b = b.union(&info.bounds);
    }
    b
}

fn centroid_bounds(infos: &[PrimitiveInfo]) -> BBox3f {
    let mut b = BBox3f::new(infos[0].centroid, infos[0].centroid);
    for info in &infos[1..] {
        b = b.extend(info.centroid);
    }
    b
}

/// recurses over `infos[begin..end)`, appending to `nodes`/`ordered`,
/// returning the index of the node just built
fn build_recursive(
    infos: &mut [PrimitiveInfo],
    begin: usize,
    end: usize,
    nodes: &mut Vec<Node>,
    ordered: &mut Vec<PrimitiveRef>,
) -> u32 {
    let bounds = bounds_union_all(&infos[begin..end]);
    let count = end - begin;

    if count == 1 {
        return build_leaf(infos, begin, end, bounds, nodes, ordered);
    }

    let cbounds = centroid_bounds(&infos[begin..end]);
    let axis = cbounds.max_extent();
    let extent = cbounds.diagonal()[axis];

    if extent == 0.0 as Float {
        return build_leaf(infos, begin, end, bounds, nodes, ordered);
    }

    let middle;
    if count <= 4 {
        infos[begin..end].sort_by(|a, b| {
            a.centroid[axis].partial_cmp(&b.centroid[axis]).unwrap()
        });
        middle = begin + count / 2;
    } else {
        let cmin = cbounds.pmin[axis];

        let mut bucket_count = [0u32; BUCKET_COUNT];
        let mut bucket_bounds: Vec<Option<BBox3f>> = vec![None; BUCKET_COUNT];

        let bucket_of = |centroid: Float| -> usize {
            let offset = (centroid - cmin) / extent;
            ((offset * BUCKET_COUNT as Float) as usize).min(BUCKET_COUNT - 1)
        };

        for info in &infos[begin..end] {
            let b = bucket_of(info.centroid[axis]);
            bucket_count[b] += 1;
            bucket_bounds[b] = Some(match bucket_bounds[b] {
                Some(existing) => existing.union(&info.bounds),
                None => info.bounds,
            });
        }

        let mut costs = [0.0 as Float; BUCKET_COUNT - 1];
        for i in 0..BUCKET_COUNT - 1 {
            let mut n0 = 0u32;
            let mut b0: Option<BBox3f> = None;
            for j in 0..=i {
                n0 += bucket_count[j];
                if let Some(bb) = bucket_bounds[j] {
                    b0 = Some(match b0 { Some(e) => e.union(&bb), None => bb });
                }
            }
            let mut n1 = 0u32;
            let mut b1: Option<BBox3f> = None;
            for j in (i + 1)..BUCKET_COUNT {
                n1 += bucket_count[j];
                if let Some(bb) = bucket_bounds[j] {
                    b1 = Some(match b1 { Some(e) => e.union(&bb), None => bb });
                }
            }
            let area0 = b0.map(|b| b.surface_area()).unwrap_or(0.0 as Float);
            let area1 = b1.map(|b| b.surface_area()).unwrap_or(0.0 as Float);
            costs[i] = 0.125 as Float + (n0 as Float * area0 + n1 as Float * area1) / bounds.surface_area();
        }

        let mut min_cost = costs[0];
        let mut min_index = 0usize;
        for i in 1..BUCKET_COUNT - 1 {
            if costs[i] < min_cost {
                min_cost = costs[i];
                min_index = i;
            }
        }

        let leaf_cost = count as Float;
        if min_cost < leaf_cost {
            let partition_point = cmin + extent / BUCKET_COUNT as Float * (min_index + 1) as Float;
            let mut lo = begin;
            let mut hi = end;
            while lo < hi {
                if infos[lo].centroid[axis] < partition_point {
                    lo += 1;
                } else {
                    hi -= 1;
                    infos.swap(lo, hi);
                }
            }
            middle = lo;
            if middle == begin || middle == end {
                return build_leaf(infos, begin, end, bounds, nodes, ordered);
            }
        } else {
            return build_leaf(infos, begin, end, bounds, nodes, ordered);
        }
    }

    let index = nodes.len();
    nodes.push(Node::leaf(bounds, 0, 0)); // placeholder, patched below

    build_recursive(infos, begin, middle, nodes, ordered);
    let right_child = build_recursive(infos, middle, end, nodes, ordered);

    nodes[index] = Node::interior(bounds, right_child, axis);
    index as u32
}

fn build_leaf(
    infos: &[PrimitiveInfo],
    begin: usize,
    end: usize,
    bounds: BBox3f,
    nodes: &mut Vec<Node>,
    ordered: &mut Vec<PrimitiveRef>,
) -> u32 {
    let first = ordered.len() as u32;
    for info in &infos[begin..end] {
        ordered.push(info.primitive);
    }
    let index = nodes.len();
    nodes.push(Node::leaf(bounds, first, (end - begin) as u16));
    index as u32
}

// keep the node size assumption honest: bounds (24) + offset (4) +
// count_or_axis (2) + is_interior (1, padded) = 32 bytes
#[test]
fn node_size_is_32_bytes() {
    assert_eq!(mem::size_of::<Node>(), 32);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_ref(i: u32) -> PrimitiveRef {
        PrimitiveRef { entity: i, primitive: 0 }
    }

    fn unit_box_at(x: Float) -> BBox3f {
        BBox3f::new(
            Point3f::new(x, 0.0 as Float, 0.0 as Float),
            Point3f::new(x + 1.0 as Float, 1.0 as Float, 1.0 as Float),
        )
    }

    #[test]
    fn empty_bvh_always_misses() {
        let bvh = Bvh::build(Vec::new(), |_| unit_box_at(0.0 as Float));
        let ray = RawRay::from_od(Point3f::new(0.0 as Float, 0.5 as Float, 0.5 as Float), Vector3f::new(1.0 as Float, 0.0 as Float, 0.0 as Float));
        assert!(bvh.raycast(&ray, float::infinity(), |_, _| None).is_none());
        assert!(!bvh.raycast_any(&ray, float::infinity(), |_, _| false));
    }

    #[test]
    fn finds_nearest_of_several_boxes_along_axis() {
        let refs: Vec<PrimitiveRef> = (0..20).map(leaf_ref).collect();
        let bounds: Vec<BBox3f> = (0..20).map(|i| unit_box_at(i as Float * 3.0 as Float)).collect();
        let bvh = Bvh::build(refs.clone(), |p| bounds[p.entity as usize]);

        let ray = RawRay::from_od(Point3f::new(-5.0 as Float, 0.5 as Float, 0.5 as Float), Vector3f::new(1.0 as Float, 0.0 as Float, 0.0 as Float));
        let hit = bvh.raycast(&ray, float::infinity(), |p, t_max| {
            let b = bounds[p.entity as usize];
            b.intersect_ray(&ray).and_then(|(t0, _)| if t0 < t_max { Some(t0) } else { None })
        });
        let (_, prim) = hit.expect("ray should hit the first box");
        assert_eq!(prim.entity, 0);
    }

    #[test]
    fn occlusion_query_short_circuits() {
        let refs: Vec<PrimitiveRef> = (0..8).map(leaf_ref).collect();
        let bounds: Vec<BBox3f> = (0..8).map(|i| unit_box_at(i as Float * 2.0 as Float)).collect();
        let bvh = Bvh::build(refs, |p| bounds[p.entity as usize]);

        let ray = RawRay::from_od(Point3f::new(-5.0 as Float, 0.5 as Float, 0.5 as Float), Vector3f::new(1.0 as Float, 0.0 as Float, 0.0 as Float));
        assert!(bvh.raycast_any(&ray, float::infinity(), |p, t_max| {
            bounds[p.entity as usize].intersect_ray(&ray).map_or(false, |(t0, _)| t0 < t_max)
        }));
    }
}
