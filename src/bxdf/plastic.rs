// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rough plastic: an additive diffuse + microfacet-specular lobe,
//! with the diffuse component Schlick-weighted by `1 - F(|i·n|)` so
//! the two halves don't double-count the energy the specular coat
//! already reflects.

use super::*;
use super::fresnel::Dielectric;
use super::local::sample_cosine_hemisphere;
use super::microfacet::Microfacet;
use spectrum::Spectrum;

/// `f = diffuse·(1 - F(i·n))·(1 - F(o·n))/π + specular·G2·D·F/(4·|i·n|·|o·n|)`.
/// Sampling picks either lobe with probability 1/2 and reports the
/// MIS-combined pdf over both.
#[derive(Copy, Clone, Debug)]
pub struct RoughPlastic {
    pub diffuse: RGBSpectrumf,
    pub specular: RGBSpectrumf,
    pub fresnel: Dielectric,
    pub microfacet: Microfacet,
}

impl RoughPlastic {
    pub fn new(diffuse: RGBSpectrumf, specular: RGBSpectrumf, fresnel: Dielectric, microfacet: Microfacet) -> RoughPlastic {
        RoughPlastic { diffuse, specular, fresnel, microfacet }
    }

    fn diffuse_term(&self, i: Vector3f, o: Vector3f) -> RGBSpectrumf {
        let fi = self.fresnel.evaluate(i.y).r();
        let fo = self.fresnel.evaluate(o.y).r();
        self.diffuse * ((1.0 as Float - fi) * (1.0 as Float - fo) * float::frac_1_pi())
    }

    fn specular_term(&self, i: Vector3f, o: Vector3f) -> RGBSpectrumf {
        let m = (i + o).normalize();
        let d = self.microfacet.distribution(m);
        let g = self.microfacet.g2(i, o);
        let f = self.fresnel.evaluate(i.dot(m));
        f * self.specular * (d * g / (4.0 as Float * i.y * o.y))
    }

    fn specular_pdf(&self, i: Vector3f, o: Vector3f) -> Float {
        let m = (i + o).normalize();
        let i_m = i.dot(m);
        let o_m = o.dot(m);
        let d = self.microfacet.distribution(m);
        let pdf_m = self.microfacet.g1(i) * i_m * d / i.y;
        pdf_m / (4.0 as Float * o_m)
    }
}

impl BxDf for RoughPlastic {
    fn kind(&self) -> BxdfKind {
        BxdfKind::Standard
    }

    fn evaluate(&self, i: Vector3f, o: Vector3f, _eta_a: Float, _eta_b: Float) -> RGBSpectrumf {
        if i.y <= 0.0 as Float || o.y <= 0.0 as Float {
            return RGBSpectrumf::black();
        }
        self.diffuse_term(i, o) + self.specular_term(i, o)
    }

    fn sample(&self, i: Vector3f, _eta_a: Float, _eta_b: Float, u: Point2f) -> Option<BxdfSample> {
        if i.y <= 0.0 as Float {
            return None;
        }
        let (o, remapped_u) = if u.x < 0.5 as Float {
            let remapped = Point2f::new((u.x * 2.0 as Float).min(1.0 as Float - 1e-7 as Float), u.y);
            (sample_cosine_hemisphere(remapped), remapped)
        } else {
            let remapped = Point2f::new(((u.x - 0.5 as Float) * 2.0 as Float).min(1.0 as Float - 1e-7 as Float), u.y);
            let m = self.microfacet.sample_m(i, remapped);
            let o = m * (2.0 as Float * i.dot(m)) - i;
            (o, remapped)
        };
        let _ = remapped_u;
        if o.y <= 0.0 as Float {
            return None;
        }

        let pdf_diffuse = o.y * float::frac_1_pi();
        let pdf_specular = self.specular_pdf(i, o);
        let pdf_o = 0.5 as Float * (pdf_diffuse + pdf_specular);
        if pdf_o <= 0.0 as Float {
            return None;
        }

        Some(BxdfSample {
            o,
            f: self.diffuse_term(i, o) + self.specular_term(i, o),
            pdf_o,
        })
    }

    fn pdf(&self, i: Vector3f, o: Vector3f, _eta_a: Float, _eta_b: Float) -> Float {
        if i.y <= 0.0 as Float || o.y <= 0.0 as Float {
            return 0.0 as Float;
        }
        let pdf_diffuse = o.y * float::frac_1_pi();
        let pdf_specular = self.specular_pdf(i, o);
        0.5 as Float * (pdf_diffuse + pdf_specular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::microfacet::Roughness;

    fn sample_plastic() -> RoughPlastic {
        RoughPlastic::new(
            RGBSpectrumf::new(0.6 as Float, 0.5 as Float, 0.4 as Float),
            RGBSpectrumf::new(0.04 as Float, 0.04 as Float, 0.04 as Float),
            Dielectric::new(1.0 as Float, 1.5 as Float),
            Microfacet::new(Roughness::isotropic(0.2 as Float)),
        )
    }

    #[test]
    fn evaluate_is_zero_below_the_surface() {
        let lobe = sample_plastic();
        let i = Vector3f::new(0.0 as Float, 1.0 as Float, 0.0 as Float);
        let o = Vector3f::new(0.0 as Float, -1.0 as Float, 0.0 as Float);
        assert_eq!(lobe.evaluate(i, o, 1.0 as Float, 1.0 as Float), RGBSpectrumf::black());
    }

    #[test]
    fn sample_pdf_matches_evaluate_pdf() {
        let lobe = sample_plastic();
        let i = Vector3f::new(0.1 as Float, 0.95 as Float, 0.2 as Float).normalize();
        let sample = lobe.sample(i, 1.0 as Float, 1.0 as Float, Point2f::new(0.2 as Float, 0.7 as Float)).unwrap();
        let pdf = lobe.pdf(i, sample.o, 1.0 as Float, 1.0 as Float);
        assert!((pdf - sample.pdf_o).abs() < 1e-4 as Float);
    }
}
