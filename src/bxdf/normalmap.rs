// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Normal-mapping wrapper (Ashikhmin-Premoze shadowing split), applied
//! on top of any other lobe. `p` is the bump-mapped shading normal,
//! already expressed in the macro (geometric) local frame, so `p.y` is
//! its cosine with the geometric normal `(0, 1, 0)`.
//!
//! Below a `0.001` tangential offset, `p` is indistinguishable from the
//! macro normal and every call is forwarded to `inner` untouched.

use super::*;

const FLAT_THRESHOLD: Float = 0.001;

/// Wraps `inner`, whose lobe would otherwise be evaluated directly
/// against the geometric macro normal, so that it instead responds to
/// the bump-mapped normal `p`.
pub struct NormalMapped<B> {
    pub inner: B,
    /// bump-mapped shading normal, local macro frame
    pub p: Vector3f,
}

impl<B: BxDf> NormalMapped<B> {
    pub fn new(inner: B, p: Vector3f) -> NormalMapped<B> {
        NormalMapped { inner, p }
    }

    fn is_flat(&self) -> bool {
        self.p.x.abs() < FLAT_THRESHOLD && self.p.z.abs() < FLAT_THRESHOLD
    }

    fn tangent(&self) -> Vector3f {
        Vector3f::new(-self.p.x, 0.0 as Float, -self.p.z).normalize()
    }

    /// Ashikhmin-Premoze responsibility weight of facet `p` for a
    /// direction `w` given its opposite facet `t`.
    fn lambda_p(&self, w: Vector3f, t: Vector3f) -> Float {
        let sin_p = (1.0 as Float - self.p.y * self.p.y).max(0.0 as Float).sqrt();
        let alpha_p = w.dot(self.p).max(0.0 as Float) / self.p.y;
        let alpha_t = w.dot(t).max(0.0 as Float) * sin_p / self.p.y;
        let denom = alpha_p + alpha_t;
        if denom <= 0.0 as Float { 0.0 as Float } else { alpha_p / denom }
    }

    /// Microfacet shadowing of the mirror facet `m` by the other
    /// facet `other`, as seen from `w`.
    fn shadow(&self, m: Vector3f, other: Vector3f, w: Vector3f) -> Float {
        let sin_p = (1.0 as Float - self.p.y * self.p.y).max(0.0 as Float).sqrt();
        let num = w.y.max(0.0 as Float) * self.p.y.max(0.0 as Float);
        let denom = w.dot(m).max(0.0 as Float) + w.dot(other).max(0.0 as Float) * sin_p;
        if denom <= 0.0 as Float {
            1.0 as Float
        } else {
            (num / denom).min(1.0 as Float)
        }
    }

    fn frame_around(&self, n: Vector3f) -> Frame {
        Frame::from_normal(n)
    }
}

impl<B: BxDf> BxDf for NormalMapped<B> {
    fn kind(&self) -> BxdfKind {
        self.inner.kind()
    }

    fn evaluate(&self, i: Vector3f, o: Vector3f, eta_a: Float, eta_b: Float) -> RGBSpectrumf {
        if self.is_flat() {
            return self.inner.evaluate(i, o, eta_a, eta_b);
        }

        let p = self.p;
        let t = self.tangent();
        let frame_p = self.frame_around(p);
        let frame_t = self.frame_around(t);

        let lambda_p_i = self.lambda_p(i, t);
        let lambda_p_o = self.lambda_p(o, t);
        let lambda_t_i = 1.0 as Float - lambda_p_i;
        let lambda_t_o = 1.0 as Float - lambda_p_o;

        let mut f = RGBSpectrumf::black();

        // direct i -> p -> o
        {
            let i_p = frame_p.world_to_local(i);
            let o_p = frame_p.world_to_local(o);
            f = f + self.inner.evaluate(i_p, o_p, eta_a, eta_b) * (lambda_p_i * lambda_p_o);
        }

        // i -> p -> t -> o, only when o leaves through the tangent facet
        if o.dot(t) > 0.0 as Float {
            let i_p = frame_p.world_to_local(i);
            let o_t = frame_t.world_to_local(o);
            let shadow = 1.0 as Float - self.shadow(t, p, o);
            f = f + self.inner.evaluate(i_p, o_t, eta_a, eta_b) * (lambda_p_i * lambda_t_o * shadow);
        }

        // i -> t -> p -> o, only when i entered through the tangent facet
        if i.dot(t) > 0.0 as Float {
            let i_t = frame_t.world_to_local(i);
            let o_p = frame_p.world_to_local(o);
            let shadow = 1.0 as Float - self.shadow(t, p, i);
            f = f + self.inner.evaluate(i_t, o_p, eta_a, eta_b) * (lambda_t_i * lambda_p_o * shadow);
        }

        if o.y.abs() > 0.0 as Float {
            f * (1.0 as Float / o.y.abs())
        } else {
            RGBSpectrumf::black()
        }
    }

    fn sample(&self, i: Vector3f, eta_a: Float, eta_b: Float, u: Point2f) -> Option<BxdfSample> {
        if self.is_flat() {
            return self.inner.sample(i, eta_a, eta_b, u);
        }

        let p = self.p;
        let t = self.tangent();
        let frame_p = self.frame_around(p);
        let frame_t = self.frame_around(t);

        let lambda_p_i = self.lambda_p(i, t);
        let facet_is_p = u.x < lambda_p_i;
        let remapped = if facet_is_p {
            Point2f::new((u.x / lambda_p_i.max(1e-7 as Float)).min(1.0 as Float - 1e-7 as Float), u.y)
        } else {
            Point2f::new(((u.x - lambda_p_i) / (1.0 as Float - lambda_p_i).max(1e-7 as Float)).min(1.0 as Float - 1e-7 as Float), u.y)
        };

        let frame_in = if facet_is_p { &frame_p } else { &frame_t };
        let i_local = frame_in.world_to_local(i);
        let inner_sample = self.inner.sample(i_local, eta_a, eta_b, remapped)?;
        let o_world = frame_in.local_to_world(inner_sample.o);

        let pdf = self.pdf(i, o_world, eta_a, eta_b);
        if pdf <= 0.0 as Float {
            return None;
        }
        let f = self.evaluate(i, o_world, eta_a, eta_b);
        Some(BxdfSample { o: o_world, f, pdf_o: pdf })
    }

    fn pdf(&self, i: Vector3f, o: Vector3f, eta_a: Float, eta_b: Float) -> Float {
        if self.is_flat() {
            return self.inner.pdf(i, o, eta_a, eta_b);
        }
        let p = self.p;
        let t = self.tangent();
        let frame_p = self.frame_around(p);
        let frame_t = self.frame_around(t);

        let lambda_p_i = self.lambda_p(i, t);
        let i_p = frame_p.world_to_local(i);
        let o_p = frame_p.world_to_local(o);
        let i_t = frame_t.world_to_local(i);
        let o_t = frame_t.world_to_local(o);

        lambda_p_i * self.inner.pdf(i_p, o_p, eta_a, eta_b)
            + (1.0 as Float - lambda_p_i) * self.inner.pdf(i_t, o_t, eta_a, eta_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::lambertian::LambertianReflection;

    #[test]
    fn flat_normal_forwards_to_inner_unchanged() {
        let inner = LambertianReflection::new(RGBSpectrumf::new(0.5 as Float, 0.5 as Float, 0.5 as Float));
        let wrapped = NormalMapped::new(inner, Vector3f::new(0.0 as Float, 1.0 as Float, 0.0 as Float));
        let i = Vector3f::new(0.1 as Float, 0.9 as Float, 0.2 as Float).normalize();
        let o = Vector3f::new(-0.1 as Float, 0.95 as Float, 0.1 as Float).normalize();
        assert_eq!(wrapped.evaluate(i, o, 1.0 as Float, 1.0 as Float), inner.evaluate(i, o, 1.0 as Float, 1.0 as Float));
    }

    #[test]
    fn tilted_normal_stays_non_negative() {
        let inner = LambertianReflection::new(RGBSpectrumf::new(0.5 as Float, 0.5 as Float, 0.5 as Float));
        let p = Vector3f::new(0.3 as Float, 0.95 as Float, 0.0 as Float).normalize();
        let wrapped = NormalMapped::new(inner, p);
        let i = Vector3f::new(0.1 as Float, 0.9 as Float, 0.2 as Float).normalize();
        let o = Vector3f::new(-0.1 as Float, 0.95 as Float, 0.1 as Float).normalize();
        let f = wrapped.evaluate(i, o, 1.0 as Float, 1.0 as Float);
        assert!(f.r() >= 0.0 as Float && f.g() >= 0.0 as Float && f.b() >= 0.0 as Float);
    }
}
