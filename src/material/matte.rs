// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Matte material: a single Lambertian lobe tinted by a diffuse texture,
//! optionally perturbed by a normal map.

use arena::PagedArena;
use bxdf::lambertian::LambertianReflection;
use geometry::prelude::*;
use spectrum::RGBSpectrumf;
use std::sync::Arc;
use texturing::Texture2D;
use super::{add_lobe, bsdf::Bsdf, Material};

#[derive(Clone)]
pub struct MatteMaterial {
    pub diffuse: Arc<dyn Texture2D<RGBSpectrumf>>,
    pub normal_map: Option<Arc<dyn Texture2D<Vector3f>>>,
}

impl MatteMaterial {
    pub fn new(diffuse: Arc<dyn Texture2D<RGBSpectrumf>>) -> MatteMaterial {
        MatteMaterial { diffuse, normal_map: None }
    }

    pub fn with_normal_map(mut self, normal_map: Arc<dyn Texture2D<Vector3f>>) -> MatteMaterial {
        self.normal_map = Some(normal_map);
        self
    }
}

impl Material for MatteMaterial {
    fn compute_scattering<'a>(&self, surface: &SurfacePoint<'a>, arena: &'a PagedArena) -> Bsdf<'a> {
        let rho = self.diffuse.evaluate(surface.uv);
        let bump = self.normal_map.as_ref().map(|t| t.evaluate(surface.uv));
        let mut bsdf = Bsdf::new(surface.shading, surface.normal);
        add_lobe(&mut bsdf, arena, LambertianReflection::new(rho), bump, 1.0 as Float, 1.0 as Float);
        bsdf
    }
}
