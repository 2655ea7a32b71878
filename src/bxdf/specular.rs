// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Delta (perfectly specular) lobes: Fresnel-weighted mirror reflection
//! and combined dielectric reflection+refraction.

use super::*;
use super::fresnel::Fresnel;
use spectrum::Spectrum;

/// A perfect mirror weighted by an arbitrary Fresnel term (dielectric or
/// conductor). `f = F(i·n)·ρ/|o·n|`.
#[derive(Copy, Clone, Debug)]
pub struct SpecularReflection<F: Fresnel> {
    pub rho: RGBSpectrumf,
    pub fresnel: F,
}

impl<F: Fresnel> SpecularReflection<F> {
    pub fn new(rho: RGBSpectrumf, fresnel: F) -> SpecularReflection<F> {
        SpecularReflection { rho, fresnel }
    }
}

impl<F: Fresnel> BxDf for SpecularReflection<F> {
    fn kind(&self) -> BxdfKind {
        BxdfKind::Delta
    }

    fn evaluate(&self, _i: Vector3f, _o: Vector3f, _eta_a: Float, _eta_b: Float) -> RGBSpectrumf {
        RGBSpectrumf::black()
    }

    fn sample(&self, i: Vector3f, _eta_a: Float, _eta_b: Float, _u: Point2f) -> Option<BxdfSample> {
        if i.y == 0.0 as Float {
            return None;
        }
        let o = local::reflect(i);
        let f = self.fresnel.evaluate(i.y) * self.rho / o.y.abs();
        Some(BxdfSample { o, f, pdf_o: 1.0 as Float })
    }

    fn pdf(&self, _i: Vector3f, _o: Vector3f, _eta_a: Float, _eta_b: Float) -> Float {
        0.0 as Float
    }
}

/// Combined specular reflection+refraction across a dielectric interface.
/// `sample` picks one branch by comparing `u.x` against the dielectric
/// Fresnel term.
#[derive(Copy, Clone, Debug)]
pub struct SpecularGlass {
    pub reflectance: RGBSpectrumf,
    pub transmittance: RGBSpectrumf,
}

impl SpecularGlass {
    pub fn new(reflectance: RGBSpectrumf, transmittance: RGBSpectrumf) -> SpecularGlass {
        SpecularGlass { reflectance, transmittance }
    }
}

impl BxDf for SpecularGlass {
    fn kind(&self) -> BxdfKind {
        BxdfKind::Delta
    }

    fn evaluate(&self, _i: Vector3f, _o: Vector3f, _eta_a: Float, _eta_b: Float) -> RGBSpectrumf {
        RGBSpectrumf::black()
    }

    fn sample(&self, i: Vector3f, eta_a: Float, eta_b: Float, u: Point2f) -> Option<BxdfSample> {
        let cos_theta_i = i.y;
        let fr = fresnel::dielectric(cos_theta_i, eta_a, eta_b);

        if u.x < fr {
            let o = local::reflect(i);
            let f = self.reflectance * (fr / o.y.abs());
            Some(BxdfSample { o, f, pdf_o: fr })
        } else {
            let eta = eta_a / eta_b;
            let o = local::refract(i, eta)?;
            let f = self.transmittance * ((1.0 as Float - fr) * (eta * eta) / o.y.abs());
            Some(BxdfSample { o, f, pdf_o: 1.0 as Float - fr })
        }
    }

    fn pdf(&self, _i: Vector3f, _o: Vector3f, _eta_a: Float, _eta_b: Float) -> Float {
        0.0 as Float
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::fresnel::Dielectric;

    #[test]
    fn mirror_sample_is_deterministic_reflection() {
        let mirror = SpecularReflection::new(RGBSpectrumf::new(1.0 as Float, 1.0 as Float, 1.0 as Float), Dielectric::new(1.0 as Float, 1.5 as Float));
        let i = Vector3f::new(0.3 as Float, 0.9 as Float, 0.1 as Float).normalize();
        let sample = mirror.sample(i, 1.0 as Float, 1.5 as Float, Point2f::new(0.0 as Float, 0.0 as Float)).unwrap();
        assert!((sample.o.x + i.x).abs() < 1e-5 as Float);
        assert!((sample.o.y - i.y).abs() < 1e-5 as Float);
        assert!((sample.o.z + i.z).abs() < 1e-5 as Float);
    }

    #[test]
    fn glass_picks_reflection_for_small_u() {
        let glass = SpecularGlass::new(
            RGBSpectrumf::new(1.0 as Float, 1.0 as Float, 1.0 as Float),
            RGBSpectrumf::new(1.0 as Float, 1.0 as Float, 1.0 as Float),
        );
        let i = Vector3f::new(0.0 as Float, 1.0 as Float, 0.0 as Float);
        let sample = glass.sample(i, 1.0 as Float, 1.5 as Float, Point2f::new(0.0 as Float, 0.0 as Float)).unwrap();
        assert!(sample.o.y > 0.0 as Float);
    }

    #[test]
    fn glass_refracts_for_large_u_at_normal_incidence() {
        let glass = SpecularGlass::new(
            RGBSpectrumf::new(1.0 as Float, 1.0 as Float, 1.0 as Float),
            RGBSpectrumf::new(1.0 as Float, 1.0 as Float, 1.0 as Float),
        );
        let i = Vector3f::new(0.0 as Float, 1.0 as Float, 0.0 as Float);
        let sample = glass.sample(i, 1.0 as Float, 1.5 as Float, Point2f::new(0.999 as Float, 0.0 as Float)).unwrap();
        assert!(sample.o.y < 0.0 as Float);
    }
}
