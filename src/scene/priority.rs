// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The nested-dielectric priority stack: resolves overlapping
//! transparent volumes (e.g. a glass ball submerged in water) to a
//! single well-defined `(eta_a, eta_b)` pair per real interface, by
//! skipping entries into already-nested lower-or-equal priority
//! dielectrics instead of treating them as hits.
//!
//! Implemented as a loop rather than recursion: `stack` is caller-owned
//! and lives for one integrator path, tied to the same arena lifetime
//! as the `SurfacePoint`s it is built from.

use arena::PagedArena;
use error::RenderError;
use geometry::prelude::*;
use medium::Medium;
use spectrum::{RGBSpectrumf, Spectrum};
use super::Scene;

pub const PRIORITY_STACK_CAPACITY: usize = 10;

struct Frame<'a> {
    priority: i32,
    ior: Float,
    medium: Option<&'a Medium>,
}

/// One path's nested-dielectric state. Starts empty (vacuum, `ior = 1`).
pub struct PriorityStack<'a> {
    frames: Vec<Frame<'a>>,
}

impl<'a> PriorityStack<'a> {
    pub fn new() -> PriorityStack<'a> {
        PriorityStack { frames: Vec::new() }
    }

    fn top_ior(&self) -> Float {
        self.frames.last().map(|f| f.ior).unwrap_or(1.0 as Float)
    }

    fn top_priority(&self) -> i32 {
        self.frames.last().map(|f| f.priority).unwrap_or(i32::min_value())
    }

    /// the medium currently surrounding the path's last vertex: the
    /// innermost pushed dielectric's interior, or `None` (vacuum)
    pub fn current_medium(&self) -> Option<&'a Medium> {
        self.frames.last().and_then(|f| f.medium)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// The outcome of one `raycast_nested` call: a real interface (or
/// opaque surface) the path should scatter at, with the `(eta_a, eta_b)`
/// pair the BSDF at that interface should be evaluated with, and the
/// Beer-Lambert transmittance accumulated while skipping past
/// lower-priority entries along the way.
pub struct NestedHit<'a> {
    pub surface: SurfacePoint<'a>,
    pub eta_a: Float,
    pub eta_b: Float,
    pub transmittance: RGBSpectrumf,
}

/// Casts `ray` through `scene`, transparently walking past any
/// dielectric interface that doesn't change which volume has priority
/// (entering a lower-or-equal-priority dielectric while already nested
/// deeper, or exiting something that isn't the current top), until it
/// reaches either a non-dielectric surface, a priority-raising entry, a
/// priority-matching exit, or the scene's edge.
pub fn raycast_nested<'a>(
    scene: &'a Scene,
    stack: &mut PriorityStack<'a>,
    mut ray: RawRay,
    arena: &'a PagedArena,
) -> Result<Option<NestedHit<'a>>, RenderError> {
    let origin = ray.origin();
    loop {
        let t_max = ray.max_extend();
        let hit = match scene.raycast(&ray, t_max, arena) {
            Some(hit) => hit,
            None => return Ok(None),
        };

        if !hit.is_dielectric() {
            let eta = stack.top_ior();
            let transmittance = segment_transmittance(stack, origin, hit.position);
            return Ok(Some(NestedHit { surface: hit, eta_a: eta, eta_b: eta, transmittance }));
        }

        let entering = ray.direction().dot(hit.normal) < 0.0 as Float;
        if entering {
            if hit.priority > stack.top_priority() {
                if stack.frames.len() >= PRIORITY_STACK_CAPACITY {
                    return Err(RenderError::PriorityStackOverflow { capacity: PRIORITY_STACK_CAPACITY });
                }
                let eta_a = stack.top_ior();
                let eta_b = hit.ior;
                let transmittance = segment_transmittance(stack, origin, hit.position);
                let priority = hit.priority;
                let ior = hit.ior;
                let medium = hit.medium;
                stack.frames.push(Frame { priority, ior, medium });
                return Ok(Some(NestedHit { surface: hit, eta_a, eta_b, transmittance }));
            }
            ray = hit.spawn_ray(ray.direction());
        } else {
            if hit.priority == stack.top_priority() {
                let eta_a = hit.ior;
                let transmittance = segment_transmittance(stack, origin, hit.position);
                stack.frames.pop();
                let eta_b = stack.top_ior();
                return Ok(Some(NestedHit { surface: hit, eta_a, eta_b, transmittance }));
            }
            ray = hit.spawn_ray(ray.direction());
        }
    }
}

/// Beer-Lambert attenuation of the straight segment `a -> b` through
/// whatever medium currently surrounds the path (vacuum if the stack is
/// empty), used both for the final reported segment and for skip-past
/// segments that stay inside the same volume.
fn segment_transmittance<'a>(stack: &PriorityStack<'a>, a: Point3f, b: Point3f) -> RGBSpectrumf {
    match stack.current_medium() {
        Some(m) => m.transmittance(a, b),
        None => RGBSpectrumf::grey_scale(1.0 as Float),
    }
}
