// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Lambertian reflection: the constant `f = ρ/π` lobe.

use super::*;
use super::local::sample_cosine_hemisphere;

/// A perfectly diffuse reflective lobe with reflectance `rho`.
#[derive(Copy, Clone, Debug)]
pub struct LambertianReflection {
    pub rho: RGBSpectrumf,
}

impl LambertianReflection {
    pub fn new(rho: RGBSpectrumf) -> LambertianReflection {
        LambertianReflection { rho }
    }
}

impl BxDf for LambertianReflection {
    fn kind(&self) -> BxdfKind {
        BxdfKind::Standard
    }

    fn evaluate(&self, i: Vector3f, o: Vector3f, _eta_a: Float, _eta_b: Float) -> RGBSpectrumf {
        if i.y * o.y <= 0.0 as Float {
            RGBSpectrumf::new(0.0 as Float, 0.0 as Float, 0.0 as Float)
        } else {
            self.rho * float::frac_1_pi()
        }
    }

    fn sample(&self, i: Vector3f, _eta_a: Float, _eta_b: Float, u: Point2f) -> Option<BxdfSample> {
        if i.y == 0.0 as Float {
            return None;
        }
        let mut o = sample_cosine_hemisphere(u);
        if i.y < 0.0 as Float {
            o.y = -o.y;
        }
        Some(BxdfSample {
            o,
            f: self.rho * float::frac_1_pi(),
            pdf_o: o.y.abs() * float::frac_1_pi(),
        })
    }

    fn pdf(&self, i: Vector3f, o: Vector3f, _eta_a: Float, _eta_b: Float) -> Float {
        if i.y * o.y <= 0.0 as Float {
            0.0 as Float
        } else {
            o.y.abs() * float::frac_1_pi()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_is_zero_across_the_surface() {
        let lobe = LambertianReflection::new(RGBSpectrumf::new(0.5 as Float, 0.5 as Float, 0.5 as Float));
        let i = Vector3f::new(0.0 as Float, 1.0 as Float, 0.0 as Float);
        let o = Vector3f::new(0.0 as Float, -1.0 as Float, 0.0 as Float);
        assert_eq!(lobe.evaluate(i, o, 1.0 as Float, 1.0 as Float), RGBSpectrumf::new(0.0 as Float, 0.0 as Float, 0.0 as Float));
    }

    #[test]
    fn sample_stays_on_i_s_side() {
        let lobe = LambertianReflection::new(RGBSpectrumf::new(0.8 as Float, 0.8 as Float, 0.8 as Float));
        let i = Vector3f::new(0.3 as Float, -0.8 as Float, 0.1 as Float).normalize();
        let sample = lobe.sample(i, 1.0 as Float, 1.0 as Float, Point2f::new(0.25 as Float, 0.6 as Float)).unwrap();
        assert!(sample.o.y < 0.0 as Float);
        assert!(sample.pdf_o > 0.0 as Float);
    }
}
