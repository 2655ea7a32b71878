// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Glass material: a single dielectric reflection+transmission lobe.
//! Smooth below the roughness texture's `0.001` threshold resolves to
//! `bxdf::specular::SpecularGlass` (a delta lobe); rough resolves to
//! `bxdf::microfacet_bxdf::MicrofacetGlass`. The interface's `eta_a`/
//! `eta_b` are supplied per-call by the nested-dielectric helper, not
//! stored here -- this material only shapes the response, never the
//! index of refraction the ray sees.

use arena::PagedArena;
use bxdf::microfacet::{Microfacet, Roughness};
use bxdf::microfacet_bxdf::MicrofacetGlass;
use bxdf::specular::SpecularGlass;
use geometry::prelude::*;
use spectrum::RGBSpectrumf;
use std::sync::Arc;
use texturing::Texture2D;
use super::{bsdf::Bsdf, Material};

const SMOOTH_THRESHOLD: Float = 0.001;

#[derive(Clone)]
pub struct GlassMaterial {
    pub reflectance: Arc<dyn Texture2D<RGBSpectrumf>>,
    pub transmittance: Arc<dyn Texture2D<RGBSpectrumf>>,
    pub roughness: Arc<dyn Texture2D<Float>>,
}

impl GlassMaterial {
    pub fn new(
        reflectance: Arc<dyn Texture2D<RGBSpectrumf>>,
        transmittance: Arc<dyn Texture2D<RGBSpectrumf>>,
        roughness: Arc<dyn Texture2D<Float>>,
    ) -> GlassMaterial {
        GlassMaterial { reflectance, transmittance, roughness }
    }
}

impl Material for GlassMaterial {
    fn compute_scattering<'a>(&self, surface: &SurfacePoint<'a>, arena: &'a PagedArena) -> Bsdf<'a> {
        let reflectance = self.reflectance.evaluate(surface.uv);
        let transmittance = self.transmittance.evaluate(surface.uv);
        let roughness = self.roughness.evaluate(surface.uv);
        let mut bsdf = Bsdf::new(surface.shading, surface.normal);
        if roughness < SMOOTH_THRESHOLD {
            let lobe = arena.emplace(SpecularGlass::new(reflectance, transmittance));
            bsdf.add(lobe, 1.0 as Float, 1.0 as Float);
        } else {
            let microfacet = Microfacet::new(Roughness::isotropic(roughness));
            let lobe = arena.emplace(MicrofacetGlass::new(reflectance, transmittance, microfacet));
            bsdf.add(lobe, 1.0 as Float, 1.0 as Float);
        }
        bsdf
    }
}
