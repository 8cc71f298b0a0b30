//! Random direction generators shared by the PDFs and primitives.
//!
//! All generators return directions in a local frame where `+Z` is the pole;
//! callers map them to world space with [`lux_math::Onb::local`].

use lux_math::Vec3;
use rand::{Rng, RngCore};
use std::f32::consts::PI;

/// Uniform random number in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Cosine-weighted direction on the +Z hemisphere (Malley's method).
pub fn random_cosine_direction(rng: &mut dyn RngCore) -> Vec3 {
    let r1 = gen_f32(rng);
    let r2 = gen_f32(rng);

    let phi = 2.0 * PI * r1;
    let r = r2.sqrt();
    let z = (1.0 - r2).max(0.0).sqrt();

    Vec3::new(phi.cos() * r, phi.sin() * r, z)
}

/// Uniformly distributed direction on the +Z hemisphere.
pub fn random_hemisphere_direction(rng: &mut dyn RngCore) -> Vec3 {
    let z = gen_f32(rng);
    let phi = 2.0 * PI * gen_f32(rng);
    let r = (1.0 - z * z).max(0.0).sqrt();

    Vec3::new(phi.cos() * r, phi.sin() * r, z)
}

/// Direction inside the cone subtended by a sphere of `radius` whose center
/// lies `sqrt(distance_squared)` away along +Z.
///
/// Directions are uniform in solid angle over the cone. An origin inside the
/// sphere degrades to the full +Z hemisphere.
pub fn random_to_sphere(radius: f32, distance_squared: f32, rng: &mut dyn RngCore) -> Vec3 {
    let r1 = gen_f32(rng);
    let r2 = gen_f32(rng);

    let cos_theta_max = cone_cos_theta_max(radius, distance_squared);
    let z = 1.0 + r2 * (cos_theta_max - 1.0);

    let phi = 2.0 * PI * r1;
    let sin_theta = (1.0 - z * z).max(0.0).sqrt();

    Vec3::new(phi.cos() * sin_theta, phi.sin() * sin_theta, z)
}

/// Cosine of the half-angle of the cone subtended by a sphere.
#[inline]
pub fn cone_cos_theta_max(radius: f32, distance_squared: f32) -> f32 {
    (1.0 - radius * radius / distance_squared).max(0.0).sqrt()
}

/// Sample a random point in the unit square [-0.5, 0.5] x [-0.5, 0.5].
pub fn sample_square(rng: &mut dyn RngCore) -> (f32, f32) {
    (gen_f32(rng) - 0.5, gen_f32(rng) - 0.5)
}
