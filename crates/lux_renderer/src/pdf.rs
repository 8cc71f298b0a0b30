//! Probability density functions over directions.
//!
//! Every PDF answers two questions in world space: how likely a direction is
//! ([`Pdf::value`], a solid-angle density) and a random direction drawn
//! according to that density ([`Pdf::generate`]). Frames are built from a pole
//! vector with [`Onb`].

use crate::hittable::Hittable;
use crate::sampling::{gen_f32, random_cosine_direction, random_hemisphere_direction};
use lux_math::{Onb, Vec3};
use rand::RngCore;
use std::f32::consts::PI;

/// Cosine threshold inside which a direction matches a delta distribution.
pub const DELTA_COSINE_TOLERANCE: f32 = 0.9999;

/// A distribution over directions on the unit sphere.
pub trait Pdf: Send + Sync {
    /// Density of `direction` (need not be normalized).
    fn value(&self, direction: Vec3) -> f32;

    /// Draw a direction from this distribution.
    fn generate(&self, rng: &mut dyn RngCore) -> Vec3;
}

/// Cosine-weighted hemisphere around a normal. Matches a Lambertian BRDF.
pub struct CosinePdf {
    uvw: Onb,
}

impl CosinePdf {
    pub fn new(w: Vec3) -> Self {
        Self { uvw: Onb::from_w(w) }
    }
}

impl Pdf for CosinePdf {
    fn value(&self, direction: Vec3) -> f32 {
        let cosine = direction.normalize().dot(self.uvw.w());
        (cosine / PI).max(0.0)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        self.uvw.local(random_cosine_direction(rng))
    }
}

/// Phong-style lobe `(n+1)/(2π) cos^n θ` around a pole, used by glossy metal.
pub struct CosinePowerPdf {
    uvw: Onb,
    exponent: f32,
}

impl CosinePowerPdf {
    pub fn new(w: Vec3, exponent: f32) -> Self {
        Self {
            uvw: Onb::from_w(w),
            exponent,
        }
    }

    /// Lobe exponent for a roughness-like fuzz value: `n = 2/fuzz² − 2`.
    pub fn exponent_from_fuzz(fuzz: f32) -> f32 {
        (2.0 / (fuzz * fuzz) - 2.0).max(0.0)
    }

    /// Density of the lobe for a given cosine to its pole.
    pub fn lobe(exponent: f32, cosine: f32) -> f32 {
        if cosine <= 0.0 {
            return 0.0;
        }
        (exponent + 1.0) / (2.0 * PI) * cosine.min(1.0).powf(exponent)
    }
}

impl Pdf for CosinePowerPdf {
    fn value(&self, direction: Vec3) -> f32 {
        let cosine = direction.normalize().dot(self.uvw.w());
        Self::lobe(self.exponent, cosine)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        let r1 = gen_f32(rng);
        let r2 = gen_f32(rng);
        let phi = 2.0 * PI * r2;

        // CDF(θ) = 1 − cos^(n+1) θ, inverted with r1 in place of 1 − r1
        let cos_theta = r1.powf(1.0 / (self.exponent + 1.0));
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

        self.uvw.local(Vec3::new(
            phi.cos() * sin_theta,
            phi.sin() * sin_theta,
            cos_theta,
        ))
    }
}

/// Uniform hemisphere around a normal.
pub struct UniformPdf {
    uvw: Onb,
}

impl UniformPdf {
    pub fn new(w: Vec3) -> Self {
        Self { uvw: Onb::from_w(w) }
    }
}

impl Pdf for UniformPdf {
    /// Constant `1/(2π)`; the density does not look at the direction.
    fn value(&self, _direction: Vec3) -> f32 {
        1.0 / (2.0 * PI)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        self.uvw.local(random_hemisphere_direction(rng))
    }
}

/// Idealized distribution concentrated on a single direction.
///
/// `value` is 1 inside a tight cone and 0 elsewhere. This is not a density in
/// the measure-theoretic sense; it pairs with a mirror BRDF of
/// `albedo / cos θ` so that `brdf · cos θ / value` equals the albedo.
pub struct DeltaPdf {
    w: Vec3,
}

impl DeltaPdf {
    pub fn new(w: Vec3) -> Self {
        Self { w: w.normalize() }
    }

    /// Whether `direction` falls inside the delta's tolerance cone.
    pub fn matches(pole: Vec3, direction: Vec3) -> bool {
        direction.normalize().dot(pole.normalize()) > DELTA_COSINE_TOLERANCE
    }
}

impl Pdf for DeltaPdf {
    fn value(&self, direction: Vec3) -> f32 {
        if Self::matches(self.w, direction) {
            1.0
        } else {
            0.0
        }
    }

    fn generate(&self, _rng: &mut dyn RngCore) -> Vec3 {
        self.w
    }
}

/// Equal-weight blend of two PDFs.
pub struct MixturePdf<'a> {
    p: [&'a dyn Pdf; 2],
}

impl<'a> MixturePdf<'a> {
    pub fn new(p0: &'a dyn Pdf, p1: &'a dyn Pdf) -> Self {
        Self { p: [p0, p1] }
    }
}

impl Pdf for MixturePdf<'_> {
    fn value(&self, direction: Vec3) -> f32 {
        0.5 * self.p[0].value(direction) + 0.5 * self.p[1].value(direction)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        if gen_f32(rng) < 0.5 {
            self.p[0].generate(rng)
        } else {
            self.p[1].generate(rng)
        }
    }
}

/// Directions toward a hittable (usually the lights aggregate) as seen from
/// `origin`.
pub struct HittablePdf<'a> {
    objects: &'a dyn Hittable,
    origin: Vec3,
}

impl<'a> HittablePdf<'a> {
    pub fn new(objects: &'a dyn Hittable, origin: Vec3) -> Self {
        Self { objects, origin }
    }
}

impl Pdf for HittablePdf<'_> {
    fn value(&self, direction: Vec3) -> f32 {
        self.objects.pdf_value(self.origin, direction)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        self.objects.random(self.origin, rng)
    }
}
