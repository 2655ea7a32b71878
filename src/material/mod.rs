// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The material interface: turns a `SurfacePoint` into a `Bsdf` built
//! out of the `bxdf` lobes that make up this material's response.

use arena::PagedArena;
use bxdf::normalmap::NormalMapped;
use bxdf::BxDf;
use geometry::prelude::*;
use std::sync::Arc;

pub mod bsdf;
pub mod matte;
pub mod plastic;
pub mod glass;
pub mod conductor;
pub mod prelude;

/// Arena-allocates `lobe` and registers it with `bsdf`, wrapping it in
/// `bxdf::normalmap::NormalMapped` first when a bump-mapped normal `p`
/// (local macro frame) is supplied. Concrete materials go through this
/// rather than repeating the wrap/coerce dance themselves.
pub(crate) fn add_lobe<'a, B: BxDf + Send + Sync + 'a>(
    bsdf: &mut bsdf::Bsdf<'a>,
    arena: &'a PagedArena,
    lobe: B,
    bump: Option<Vector3f>,
    scale: Float,
    weight: Float,
) {
    match bump {
        Some(p) => {
            let wrapped: &'a (dyn BxDf + Send + Sync) = arena.emplace(NormalMapped::new(lobe, p));
            bsdf.add(wrapped, scale, weight);
        }
        None => {
            let plain: &'a (dyn BxDf + Send + Sync) = arena.emplace(lobe);
            bsdf.add(plain, scale, weight);
        }
    }
}

/// The material interface. Implementations borrow their lobes out of
/// `arena`, so the returned `Bsdf` is tied to the arena's lifetime and
/// never outlives the per-hit scratch space it was built in.
pub trait Material: Sync + Send {
    fn compute_scattering<'a>(&self, surface: &SurfacePoint<'a>, arena: &'a PagedArena) -> bsdf::Bsdf<'a>;
}

impl<T: Material + ?Sized> Material for Arc<T> {
    #[inline]
    fn compute_scattering<'a>(&self, surface: &SurfacePoint<'a>, arena: &'a PagedArena) -> bsdf::Bsdf<'a> {
        <T as Material>::compute_scattering(&**self, surface, arena)
    }
}
