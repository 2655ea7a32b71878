// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The scene: an immutable-after-construction table of entities and
//! lights, the acceleration structure over them, and the power-weighted
//! light distribution used by one-light-sample MIS. Grounded on the
//! teacher's `renderer::scene::Scene` (aggregate + lights +
//! `light_distribution`), generalized from its single `Composable`
//! aggregate to the `accel::Bvh` over `(entity, primitive)` pairs.

use accel::{Bvh, PrimitiveRef};
use arena::PagedArena;
use geometry::prelude::*;
use light;
use light::area::AreaLight as ConcreteAreaLight;
use light::infinity::InfinityAreaLight;
use material::Material;
use medium::Medium;
use sample::distribution::Distribution1D;
use shape::Surface;
use std::sync::Arc;

pub mod priority;
pub mod prelude;

/// One placed object: a surface, the material covering it, the light it
/// emits as (if any), the medium filling its interior (if any, for a
/// closed dielectric), and the nested-dielectric bookkeeping `priority`/
/// `ior` carried onto every `SurfacePoint` built from it.
pub struct Entity {
    pub surface: Arc<dyn Surface>,
    pub material: Arc<dyn Material>,
    pub light: Option<Arc<ConcreteAreaLight>>,
    pub medium: Option<Arc<dyn Medium + Send + Sync>>,
    pub priority: i32,
    pub ior: Float,
}

impl Entity {
    pub fn new(surface: Arc<dyn Surface>, material: Arc<dyn Material>) -> Entity {
        Entity { surface, material, light: None, medium: None, priority: 0, ior: 0.0 as Float }
    }

    pub fn emissive(mut self, light: Arc<ConcreteAreaLight>) -> Entity {
        self.light = Some(light);
        self
    }

    pub fn dielectric(mut self, priority: i32, ior: Float, medium: Option<Arc<dyn Medium + Send + Sync>>) -> Entity {
        self.priority = priority;
        self.ior = ior;
        self.medium = medium;
        self
    }
}

/// An ordered, immutable scene: entities, the acceleration structure
/// over their primitives, every light (area lights bound to an entity
/// plus the optional environment), and the power-proportional
/// distribution `sample_one_light` draws from.
pub struct Scene {
    entities: Vec<Entity>,
    bvh: Bvh,
    lights: Vec<Arc<dyn light::AreaLight>>,
    environment: Option<Arc<InfinityAreaLight>>,
    light_distribution: Distribution1D,
    bounds: BBox3f,
}

impl Scene {
    /// Builds the acceleration structure and light distribution over
    /// `entities`. `environment` (if given) has its scene-bounds
    /// already populated from the entities' union bbox.
    pub fn build(entities: Vec<Entity>, mut environment: Option<InfinityAreaLight>) -> Scene {
        assert!(!entities.is_empty(), "a scene needs at least one entity");

        let mut bounds: Option<BBox3f> = None;
        let mut primitives = Vec::new();
        for (entity_index, entity) in entities.iter().enumerate() {
            for primitive in 0..entity.surface.primitive_count() {
                let b = entity.surface.bounds(primitive);
                bounds = Some(match bounds {
                    Some(existing) => existing.union(&b),
                    None => b,
                });
                primitives.push(PrimitiveRef { entity: entity_index as u32, primitive: primitive as u32 });
            }
        }
        let bounds = bounds.expect("a scene needs at least one primitive");

        let bvh = Bvh::build(primitives, |p| {
            entities[p.entity as usize].surface.bounds(p.primitive as usize)
        });

        let mut lights: Vec<Arc<dyn light::AreaLight>> = Vec::new();
        for entity in &entities {
            if let Some(ref l) = entity.light {
                lights.push(l.clone() as Arc<dyn light::AreaLight>);
            }
        }
        let environment = environment.take().map(|mut env| {
            env.set_scene_bounds(bounds);
            let env = Arc::new(env);
            lights.push(env.clone() as Arc<dyn light::AreaLight>);
            env
        });

        let powers: Vec<Float> = lights.iter().map(|l| {
            let p = l.power();
            p.r() + p.g() + p.b()
        }).collect();
        let light_distribution = Distribution1D::new(powers);

        Scene { entities, bvh, lights, environment, light_distribution, bounds }
    }

    #[inline]
    pub fn bounds(&self) -> BBox3f {
        self.bounds
    }

    #[inline]
    pub fn environment(&self) -> Option<&Arc<InfinityAreaLight>> {
        self.environment.as_ref()
    }

    #[inline]
    pub fn entity(&self, index: usize) -> &Entity {
        &self.entities[index]
    }

    /// nearest-hit raycast against every entity, building the full
    /// `SurfacePoint` (back-pointers included) out of `arena`.
    pub fn raycast<'a>(&'a self, ray: &RawRay, t_max: Float, arena: &'a PagedArena) -> Option<SurfacePoint<'a>> {
        let (_, primitive) = self.bvh.raycast(ray, t_max, |p, t_max| {
            self.entities[p.entity as usize].surface.raycast(p.primitive as usize, ray, t_max)
        })?;
        let entity = &self.entities[primitive.entity as usize];
        let (_, mut sp) = entity.surface.raycast_surface_point(primitive.primitive as usize, ray, t_max, arena)?;
        sp.surface = Some(&*entity.surface);
        sp.material = Some(&*entity.material);
        sp.light = entity.light.as_ref().map(|l| &**l as &(dyn light::AreaLight + Send + Sync));
        sp.medium = entity.medium.as_ref().map(|m| &**m as &dyn Medium);
        sp.priority = entity.priority;
        sp.ior = entity.ior;
        Some(sp)
    }

    /// occlusion-only query: any hit before `t_max`?
    pub fn raycast_any(&self, ray: &RawRay, t_max: Float) -> bool {
        self.bvh.raycast_any(ray, t_max, |p, t_max| {
            self.entities[p.entity as usize].surface.raycast(p.primitive as usize, ray, t_max).is_some()
        })
    }

    /// shadow-ray visibility test between two already-offset points
    /// (see `SurfacePoint::spawn_ray_to`): `true` when nothing occludes
    /// the straight segment between them.
    pub fn visible(&self, from: Point3f, to: Point3f) -> bool {
        let ray = RawRay::spawn(from, to);
        let t_max = ray.max_extend() * (1.0 as Float - 1e-3 as Float);
        !self.raycast_any(&ray, t_max)
    }

    /// pick one light proportional to its total power; returns the
    /// light plus the discrete probability it was picked with.
    pub fn sample_one_light(&self, u: Float) -> Option<(&(dyn light::AreaLight), Float)> {
        if self.lights.is_empty() {
            return None;
        }
        let (index, pdf, _) = self.light_distribution.sample_discrete(u);
        Some((&*self.lights[index], pdf))
    }

    /// the picking pdf `sample_one_light` would report for `light`,
    /// used to recompute its contribution when the caller already holds
    /// a reference (e.g. the entity a primary ray just hit).
    pub fn pdf_one_light(&self, light: &(dyn light::AreaLight)) -> Float {
        for (index, l) in self.lights.iter().enumerate() {
            if Arc::as_ptr(l) as *const () == light as *const _ as *const () {
                return self.light_distribution.discrete_pdf(index);
            }
        }
        0.0 as Float
    }

    pub fn lights(&self) -> &[Arc<dyn light::AreaLight>] {
        &self.lights
    }
}
