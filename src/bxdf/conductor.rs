// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rough conductor: microfacet reflection whose Fresnel term is the
//! complex-IOR conductor formula rather than a constant reflectance.

use super::*;
use super::fresnel::Conductor;
use super::microfacet::Microfacet;
use spectrum::Spectrum;

#[derive(Copy, Clone, Debug)]
pub struct RoughConductor {
    pub fresnel: Conductor,
    pub microfacet: Microfacet,
}

impl RoughConductor {
    pub fn new(fresnel: Conductor, microfacet: Microfacet) -> RoughConductor {
        RoughConductor { fresnel, microfacet }
    }
}

impl BxDf for RoughConductor {
    fn kind(&self) -> BxdfKind {
        BxdfKind::Standard
    }

    fn evaluate(&self, i: Vector3f, o: Vector3f, _eta_a: Float, _eta_b: Float) -> RGBSpectrumf {
        if i.y <= 0.0 as Float || o.y <= 0.0 as Float {
            return RGBSpectrumf::black();
        }
        let m = (i + o).normalize();
        let d = self.microfacet.distribution(m);
        let g = self.microfacet.g2(i, o);
        let f = self.fresnel.evaluate(i.dot(m));
        f * (d * g / (4.0 as Float * i.y * o.y))
    }

    fn sample(&self, i: Vector3f, _eta_a: Float, _eta_b: Float, u: Point2f) -> Option<BxdfSample> {
        if i.y <= 0.0 as Float {
            return None;
        }
        let m = self.microfacet.sample_m(i, u);
        let i_m = i.dot(m);
        let o = m * (2.0 as Float * i_m) - i;
        if o.y <= 0.0 as Float {
            return None;
        }

        let d = self.microfacet.distribution(m);
        let g = self.microfacet.g2(i, o);
        let f = self.fresnel.evaluate(i_m);
        let o_m = o.dot(m);
        let pdf_m = self.microfacet.g1(i) * i_m * d / i.y;
        let pdf_o = pdf_m / (4.0 as Float * o_m);

        Some(BxdfSample {
            o,
            f: f * (d * g / (4.0 as Float * i.y * o.y)),
            pdf_o,
        })
    }

    fn pdf(&self, i: Vector3f, o: Vector3f, _eta_a: Float, _eta_b: Float) -> Float {
        if i.y <= 0.0 as Float || o.y <= 0.0 as Float {
            return 0.0 as Float;
        }
        let m = (i + o).normalize();
        let d = self.microfacet.distribution(m);
        let i_m = i.dot(m);
        let o_m = o.dot(m);
        let pdf_m = self.microfacet.g1(i) * i_m * d / i.y;
        pdf_m / (4.0 as Float * o_m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::microfacet::Roughness;

    #[test]
    fn smooth_limit_concentrates_near_mirror_direction() {
        let lobe = RoughConductor::new(
            Conductor::new(
                RGBSpectrumf::new(1.0 as Float, 1.0 as Float, 1.0 as Float),
                RGBSpectrumf::new(0.2 as Float, 0.2 as Float, 0.3 as Float),
                RGBSpectrumf::new(3.0 as Float, 2.5 as Float, 2.0 as Float),
            ),
            Microfacet::new(Roughness::isotropic(0.02 as Float)),
        );
        let i = Vector3f::new(0.1 as Float, 0.95 as Float, 0.05 as Float).normalize();
        let mirror = local::reflect(i);
        let f_at_mirror = lobe.evaluate(i, mirror, 1.0 as Float, 1.0 as Float);
        assert!(f_at_mirror.r() > 0.0 as Float);
    }
}
