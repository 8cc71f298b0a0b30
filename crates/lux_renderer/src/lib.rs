//! Lux renderer - CPU path tracing
//!
//! A Monte Carlo path tracer that combines BSDF sampling with next-event
//! estimation toward a separate lights aggregate, weighted by multiple
//! importance sampling.

mod camera;
mod config;
mod error;
mod hittable;
mod image_buffer;
mod integrator;
mod material;
pub mod pdf;
mod quad;
mod renderer;
pub mod sampling;
mod sphere;

pub use camera::{Camera, CameraSettings};
pub use config::{ParseStrategyError, RenderConfig, SamplingStrategy, RR_START_BOUNCE};
pub use error::{RenderError, Result};
pub use hittable::{HitRecord, Hittable, Scene};
pub use image_buffer::{color_to_rgb, linear_to_gamma, ImageBuffer};
pub use integrator::{sky_gradient, Integrator, RAY_T_MIN, RR_MIN_PROBABILITY};
pub use material::{
    reflect, Color, DiffuseLight, Lambertian, Material, Metal, ScatterRecord, WrongLambertian,
};
pub use quad::Quad;
pub use renderer::{render, render_cancellable, render_pixel};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from lux_math
pub use lux_math::{Interval, Onb, Ray, Vec3};
