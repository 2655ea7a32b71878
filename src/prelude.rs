// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Common components prelude

pub use geometry::prelude::*;
pub use integrator::prelude::*;
pub use light::prelude::*;
pub use material::prelude::*;
pub use sample::prelude::*;
pub use scene::prelude::*;
pub use shape::prelude::*;
pub use spectrum::{RGBSpectrum, RGBSpectrumf, Spectrum};
pub use texturing::prelude::*;
