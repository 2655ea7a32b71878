// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rough plastic material: one additive diffuse+specular lobe, built
//! on `bxdf::plastic::RoughPlastic`.

use arena::PagedArena;
use bxdf::fresnel::Dielectric;
use bxdf::microfacet::{Microfacet, Roughness};
use bxdf::plastic::RoughPlastic;
use geometry::prelude::*;
use spectrum::RGBSpectrumf;
use std::sync::Arc;
use texturing::Texture2D;
use super::{add_lobe, bsdf::Bsdf, Material};

#[derive(Clone)]
pub struct PlasticMaterial {
    pub diffuse: Arc<dyn Texture2D<RGBSpectrumf>>,
    pub specular: Arc<dyn Texture2D<RGBSpectrumf>>,
    pub roughness: Arc<dyn Texture2D<Float>>,
    pub eta: Float,
    pub normal_map: Option<Arc<dyn Texture2D<Vector3f>>>,
}

impl PlasticMaterial {
    pub fn new(
        diffuse: Arc<dyn Texture2D<RGBSpectrumf>>,
        specular: Arc<dyn Texture2D<RGBSpectrumf>>,
        roughness: Arc<dyn Texture2D<Float>>,
        eta: Float,
    ) -> PlasticMaterial {
        PlasticMaterial { diffuse, specular, roughness, eta, normal_map: None }
    }

    pub fn with_normal_map(mut self, normal_map: Arc<dyn Texture2D<Vector3f>>) -> PlasticMaterial {
        self.normal_map = Some(normal_map);
        self
    }
}

impl Material for PlasticMaterial {
    fn compute_scattering<'a>(&self, surface: &SurfacePoint<'a>, arena: &'a PagedArena) -> Bsdf<'a> {
        let diffuse = self.diffuse.evaluate(surface.uv);
        let specular = self.specular.evaluate(surface.uv);
        let alpha = self.roughness.evaluate(surface.uv).max(1e-3 as Float);
        let microfacet = Microfacet::new(Roughness::isotropic(alpha));
        let fresnel = Dielectric::new(1.0 as Float, self.eta);
        let bump = self.normal_map.as_ref().map(|t| t.evaluate(surface.uv));
        let mut bsdf = Bsdf::new(surface.shading, surface.normal);
        add_lobe(&mut bsdf, arena, RoughPlastic::new(diffuse, specular, fresnel, microfacet), bump, 1.0 as Float, 1.0 as Float);
        bsdf
    }
}
