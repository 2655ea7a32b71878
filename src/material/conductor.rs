// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Conductor material: a single rough (or, below the roughness
//! texture's `0.001` threshold, perfectly specular) metallic lobe.

use arena::PagedArena;
use bxdf::conductor::RoughConductor;
use bxdf::fresnel::Conductor;
use bxdf::microfacet::{Microfacet, Roughness};
use bxdf::specular::SpecularReflection;
use geometry::prelude::*;
use spectrum::{RGBSpectrumf, Spectrum};
use std::sync::Arc;
use texturing::Texture2D;
use super::{bsdf::Bsdf, Material};

const SMOOTH_THRESHOLD: Float = 0.001;

#[derive(Clone)]
pub struct ConductorMaterial {
    pub eta: RGBSpectrumf,
    pub k: RGBSpectrumf,
    pub roughness: Arc<dyn Texture2D<Float>>,
}

impl ConductorMaterial {
    pub fn new(eta: RGBSpectrumf, k: RGBSpectrumf, roughness: Arc<dyn Texture2D<Float>>) -> ConductorMaterial {
        ConductorMaterial { eta, k, roughness }
    }
}

impl Material for ConductorMaterial {
    fn compute_scattering<'a>(&self, surface: &SurfacePoint<'a>, arena: &'a PagedArena) -> Bsdf<'a> {
        let roughness = self.roughness.evaluate(surface.uv);
        let fresnel = Conductor::new(RGBSpectrumf::grey_scale(1.0 as Float), self.eta, self.k);
        let mut bsdf = Bsdf::new(surface.shading, surface.normal);
        if roughness < SMOOTH_THRESHOLD {
            let lobe = arena.emplace(SpecularReflection::new(RGBSpectrumf::grey_scale(1.0 as Float), fresnel));
            bsdf.add(lobe, 1.0 as Float, 1.0 as Float);
        } else {
            let microfacet = Microfacet::new(Roughness::isotropic(roughness));
            let lobe = arena.emplace(RoughConductor::new(fresnel, microfacet));
            bsdf.add(lobe, 1.0 as Float, 1.0 as Float);
        }
        bsdf
    }
}
