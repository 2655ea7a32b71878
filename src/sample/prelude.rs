// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

pub use super::distribution::{Distribution1D, Distribution2D};
pub use super::pcg32::Pcg32;
pub use super::generators::{Random, Stratified1D, Stratified2D};
pub use super::pixel::PixelSampler;
pub use super::power_heuristic;
