//! Radiance estimation along a single ray.
//!
//! At every bounce the integrator may draw one direction from the material's
//! distribution and one toward the lights, weighting them with the balance
//! heuristic. Russian roulette trims long paths without biasing the result.

use crate::config::{RenderConfig, SamplingStrategy};
use crate::hittable::{Hittable, Scene};
use crate::pdf::{HittablePdf, MixturePdf, Pdf};
use crate::sampling::gen_f32;
use crate::Color;
use lux_math::{Interval, Ray};
use rand::RngCore;

/// Closest accepted hit distance; avoids self-intersection acne.
pub const RAY_T_MIN: f32 = 0.001;

/// Lower bound on the Russian roulette survival probability.
pub const RR_MIN_PROBABILITY: f32 = 0.1;

/// How a sampled direction is followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    /// One-bounce probe toward a light sample: report what it hits, no further sampling
    Probe,
    /// Full path continuation with this many bounces left
    Bounce(u32),
}

/// Path tracer over a world, with optional lights for next-event estimation.
pub struct Integrator<'a> {
    world: &'a dyn Hittable,
    lights: Option<&'a Scene>,
    config: &'a RenderConfig,
}

impl<'a> Integrator<'a> {
    /// An empty lights aggregate is treated the same as no lights.
    pub fn new(world: &'a dyn Hittable, lights: Option<&'a Scene>, config: &'a RenderConfig) -> Self {
        Self {
            world,
            lights: lights.filter(|lights| !lights.is_empty()),
            config,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        self.config
    }

    /// Compute the color seen by a ray with `depth` bounces left.
    pub fn ray_color(&self, ray: &Ray, depth: u32, rng: &mut dyn RngCore) -> Color {
        // If we've exceeded max depth, return black (no light)
        if depth == 0 {
            return Color::ZERO;
        }

        let Some(rec) = self.world.hit(ray, Interval::new(RAY_T_MIN, f32::INFINITY)) else {
            return self.background(ray);
        };

        let emitted = rec.material.emitted(ray, &rec);
        let Some(srec) = rec.material.scatter(ray, &rec) else {
            return emitted;
        };

        let mut rr_scale = 1.0;
        let rr_depth = self.config.max_depth.saturating_sub(self.config.rr_start_bounce);
        if self.config.russian_roulette && depth < rr_depth {
            let survival = srec.attenuation.max_element().clamp(RR_MIN_PROBABILITY, 1.0);
            if gen_f32(rng) > survival {
                return emitted;
            }
            rr_scale = 1.0 / survival;
        }

        // Delta lobes can't be hit by light sampling
        let light_pdf = match self.lights {
            Some(lights) if !srec.is_specular => Some(HittablePdf::new(lights, rec.p)),
            _ => None,
        };
        let material_pdf: &dyn Pdf = srec.pdf.as_ref();
        let mixture_pdf = match (self.config.strategy, &light_pdf) {
            (SamplingStrategy::Mixture, Some(light)) => Some(MixturePdf::new(light, material_pdf)),
            _ => None,
        };

        let next_depth = Continuation::Bounce(depth - 1);
        let strategies: [Option<(&dyn Pdf, Continuation)>; 2] =
            match (self.config.strategy, light_pdf.as_ref(), mixture_pdf.as_ref()) {
                (_, _, Some(mixture)) => [Some((mixture as &dyn Pdf, next_depth)), None],
                (SamplingStrategy::Mis, Some(light), _) => [
                    Some((light as &dyn Pdf, Continuation::Probe)),
                    Some((material_pdf, next_depth)),
                ],
                (SamplingStrategy::Light, Some(light), _) => {
                    [Some((light as &dyn Pdf, Continuation::Probe)), None]
                }
                // Material only, or light sampling unavailable here
                _ => [None, Some((material_pdf, next_depth))],
            };

        let mut color = emitted;
        for &(pdf, continuation) in strategies.iter().flatten() {
            let direction = pdf.generate(rng);
            let density = pdf.value(direction);
            if !(density > 0.0) {
                if cfg!(debug_assertions) {
                    log::warn!("discarding sample with density {density} at {:?}", rec.p);
                }
                continue;
            }

            let cos_theta = direction.normalize().dot(rec.normal);
            if cos_theta <= 0.0 {
                continue;
            }

            // Balance heuristic over every active strategy
            let density_sum: f32 = strategies
                .iter()
                .flatten()
                .map(|(other, _)| other.value(direction))
                .sum();
            let weight = density / density_sum;

            let scattered = Ray::new(rec.p, direction);
            let brdf = rec.material.brdf(ray, &rec, &scattered);
            let incoming = match continuation {
                Continuation::Probe => self.probe(&scattered),
                Continuation::Bounce(next) => self.ray_color(&scattered, next, rng),
            };

            color += weight * brdf * incoming * cos_theta * rr_scale / density;
        }

        color
    }

    /// Emission seen along a light sample direction. Occluders that don't
    /// emit contribute nothing.
    fn probe(&self, ray: &Ray) -> Color {
        match self.world.hit(ray, Interval::new(RAY_T_MIN, f32::INFINITY)) {
            Some(rec) => rec.material.emitted(ray, &rec),
            None => self.background(ray),
        }
    }

    /// Radiance arriving from directions that miss the world.
    pub fn background(&self, ray: &Ray) -> Color {
        if self.config.use_sky_gradient {
            sky_gradient(ray)
        } else {
            self.config.background
        }
    }
}

/// Compute sky gradient background.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}
