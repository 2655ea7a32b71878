// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An offline, physically based Monte-Carlo path tracer.
//!
//! The crate is organized bottom-up, matching the data flow of one sample:
//! sampler -> integrator -> sensor/light -> scene raycast -> nested-dielectric
//! helper -> material/bsdf -> sampling continues -> sensor.add_sample.

#[macro_use]
extern crate cgmath;
#[macro_use]
extern crate lazy_static;

pub mod error;
pub mod geometry;
pub mod spectrum;
pub mod arena;
pub mod sample;
pub mod texturing;
pub mod bxdf;
pub mod medium;
pub mod material;
pub mod shape;
pub mod accel;
pub mod light;
pub mod scene;
pub mod integrator;
pub mod config;
pub mod render;
pub mod prelude;
