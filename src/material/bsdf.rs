// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The BSDF container: a fixed-capacity mixture of arena-allocated
//! `BxDf` lobes, plus the shading-frame world<->local plumbing and the
//! shading-normal guard every material builds its response through.

use bxdf::{BxDf, BxdfKind};
use geometry::prelude::*;
use spectrum::{RGBSpectrumf, Spectrum};

/// Largest concrete material in `material::*` needs two lobes (rough
/// plastic's diffuse+specular is already folded into one `BxDf`, so in
/// practice this covers one material lobe plus an optional
/// normal-mapping wrapper).
pub const MAX_LOBES: usize = 3;

struct Lobe<'a> {
    bxdf: &'a (dyn BxDf + Send + Sync),
    /// multiplies the lobe's contribution to `f`
    scale: Float,
    /// probability of picking this lobe when importance-sampling
    weight: Float,
}

/// Outcome of `Bsdf::sample_wi`.
pub struct BsdfSample {
    pub wi: Vector3f,
    pub f: RGBSpectrumf,
    pub pdf: Float,
    pub kind: BxdfKind,
}

/// A surface's full scattering response: a mixture of lobes evaluated
/// in a shared shading frame. Built fresh per hit in the per-sample
/// arena; never destroyed individually (`PagedArena::clear` just
/// rewinds).
pub struct Bsdf<'a> {
    frame: Frame,
    geometric_normal: Vector3f,
    lobes: [Option<Lobe<'a>>; MAX_LOBES],
    count: usize,
}

impl<'a> Bsdf<'a> {
    pub fn new(frame: Frame, geometric_normal: Vector3f) -> Bsdf<'a> {
        Bsdf {
            frame,
            geometric_normal,
            lobes: [None, None, None],
            count: 0,
        }
    }

    /// Register a lobe with sampling weight `weight` and contribution
    /// scale `scale`. Panics if the fixed capacity is exceeded -- a
    /// programmer bug (too many lobes for a material), not a
    /// caller-triggerable configuration error.
    pub fn add(&mut self, bxdf: &'a (dyn BxDf + Send + Sync), scale: Float, weight: Float) {
        assert!(self.count < MAX_LOBES, "Bsdf lobe capacity exceeded");
        self.lobes[self.count] = Some(Lobe { bxdf, scale, weight });
        self.count += 1;
    }

    fn lobes(&self) -> impl Iterator<Item = &Lobe<'a>> {
        self.lobes[..self.count].iter().filter_map(|l| l.as_ref())
    }

    fn total_weight(&self) -> Float {
        self.lobes().map(|l| l.weight).sum()
    }

    /// rejects directions whose geometric and shading hemispheres
    /// disagree (§4.5.4's shading-normal guard)
    fn consistent(&self, w: Vector3f) -> bool {
        let geom = w.dot(self.geometric_normal);
        let shade = w.dot(self.frame.normal());
        geom * shade > 0.0 as Float
    }

    /// `|wi.n_shade|/|wi.n_geom|`, the reciprocity-preserving rescale
    /// applied to radiance transported across a shading/geometric
    /// normal mismatch
    fn shading_rescale(&self, wi_world: Vector3f) -> Float {
        let geom = wi_world.dot(self.geometric_normal).abs();
        if geom == 0.0 as Float {
            return 0.0 as Float;
        }
        wi_world.dot(self.frame.normal()).abs() / geom
    }

    pub fn evaluate(&self, wo_world: Vector3f, wi_world: Vector3f, eta_a: Float, eta_b: Float) -> RGBSpectrumf {
        if !self.consistent(wo_world) || !self.consistent(wi_world) {
            return RGBSpectrumf::black();
        }
        let i = self.frame.world_to_local(wo_world);
        let o = self.frame.world_to_local(wi_world);
        let mut f = RGBSpectrumf::black();
        for lobe in self.lobes() {
            if lobe.bxdf.kind() == BxdfKind::Standard {
                f += lobe.bxdf.evaluate(i, o, eta_a, eta_b) * lobe.scale;
            }
        }
        f * self.shading_rescale(wi_world)
    }

    pub fn pdf(&self, wo_world: Vector3f, wi_world: Vector3f, eta_a: Float, eta_b: Float) -> Float {
        if !self.consistent(wo_world) || !self.consistent(wi_world) {
            return 0.0 as Float;
        }
        let i = self.frame.world_to_local(wo_world);
        let o = self.frame.world_to_local(wi_world);
        let total = self.total_weight();
        if total == 0.0 as Float {
            return 0.0 as Float;
        }
        let mut pdf = 0.0 as Float;
        for lobe in self.lobes() {
            if lobe.bxdf.kind() == BxdfKind::Standard {
                pdf += lobe.weight * lobe.bxdf.pdf(i, o, eta_a, eta_b);
            }
        }
        pdf / total
    }

    /// `u_lobe` picks which lobe to sample (by its mixture weight);
    /// `u` is handed to that lobe's own `sample`.
    pub fn sample_wi(&self, wo_world: Vector3f, eta_a: Float, eta_b: Float, u_lobe: Float, u: Point2f) -> Option<BsdfSample> {
        if !self.consistent(wo_world) {
            return None;
        }
        let total = self.total_weight();
        if total == 0.0 as Float {
            return None;
        }
        let i = self.frame.world_to_local(wo_world);
        let mut remaining = u_lobe * total;
        let mut picked_index = self.count.saturating_sub(1);
        for (index, lobe) in self.lobes().enumerate() {
            if remaining < lobe.weight {
                picked_index = index;
                break;
            }
            remaining -= lobe.weight;
        }
        let picked = self.lobes[picked_index].as_ref()?;

        let sample = picked.bxdf.sample(i, eta_a, eta_b, u)?;
        let wi_world = self.frame.local_to_world(sample.o);
        if !self.consistent(wi_world) {
            return None;
        }

        if picked.bxdf.kind() == BxdfKind::Delta {
            let f = sample.f * (picked.scale / picked.weight) * self.shading_rescale(wi_world);
            return Some(BsdfSample { wi: wi_world, f, pdf: picked.weight / total, kind: BxdfKind::Delta });
        }

        let mut f = sample.f * picked.scale;
        let mut pdf = picked.weight * sample.pdf_o;
        for (index, lobe) in self.lobes().enumerate() {
            if index == picked_index {
                continue;
            }
            if lobe.bxdf.kind() == BxdfKind::Standard {
                f += lobe.bxdf.evaluate(i, sample.o, eta_a, eta_b) * lobe.scale;
                pdf += lobe.weight * lobe.bxdf.pdf(i, sample.o, eta_a, eta_b);
            }
        }
        Some(BsdfSample {
            wi: wi_world,
            f: f * self.shading_rescale(wi_world),
            pdf: pdf / total,
            kind: BxdfKind::Standard,
        })
    }
}
