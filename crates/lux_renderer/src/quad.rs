//! Planar quadrilateral (parallelogram) primitive.

use crate::hittable::{HitRecord, Hittable};
use crate::sampling::gen_f32;
use crate::Material;
use lux_math::{Interval, Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Rays whose direction is this close to parallel with the plane miss.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Margin kept from the edges when sampling points on the quad.
const SAMPLE_EDGE_MARGIN: f32 = 0.00005;

/// A parallelogram defined by a corner `q` and two edge vectors `u`, `v`.
pub struct Quad {
    q: Vec3,
    u: Vec3,
    v: Vec3,
    material: Arc<dyn Material>,
    /// Unit plane normal (u x v direction)
    normal: Vec3,
    /// Plane constant: dot(normal, p) = d for points p on the plane
    d: f32,
    /// n / (n . n), used to project hit points onto the (u, v) basis
    w: Vec3,
    area: f32,
}

impl Quad {
    /// Create a new quad.
    pub fn new(q: Vec3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        let n = u.cross(v);
        let normal = n.normalize_or_zero();
        let d = normal.dot(q);
        let n_len_sq = n.length_squared();
        let w = if n_len_sq > 0.0 { n / n_len_sq } else { Vec3::ZERO };

        Self {
            q,
            u,
            v,
            material,
            normal,
            d,
            w,
            area: n.length(),
        }
    }

    pub fn area(&self) -> f32 {
        self.area
    }
}

impl Hittable for Quad {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let denom = self.normal.dot(ray.direction());

        // Ray is parallel to the plane (or the quad is degenerate)
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denom;
        if !ray_t.contains(t) {
            return None;
        }

        // Express the hit point in the (u, v) basis anchored at q
        let intersection = ray.at(t);
        let planar = intersection - self.q;
        let alpha = self.w.dot(planar.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar));

        let unit = Interval::new(0.0, 1.0);
        if !unit.contains(alpha) || !unit.contains(beta) {
            return None;
        }

        Some(HitRecord::new(
            ray,
            t,
            self.normal,
            self.material.as_ref(),
            (alpha, beta),
        ))
    }

    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32 {
        let Some(rec) = self.hit(
            &Ray::new(origin, direction),
            Interval::new(0.001, f32::INFINITY),
        ) else {
            return 0.0;
        };

        let distance_squared = rec.t * rec.t * direction.length_squared();
        let cosine = (direction.dot(rec.normal) / direction.length()).abs();
        if cosine < PARALLEL_EPSILON {
            return 0.0;
        }

        distance_squared / (cosine * self.area)
    }

    fn random(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        let span = 1.0 - 2.0 * SAMPLE_EDGE_MARGIN;
        let r1 = SAMPLE_EDGE_MARGIN + span * gen_f32(rng);
        let r2 = SAMPLE_EDGE_MARGIN + span * gen_f32(rng);
        let p = self.q + r1 * self.u + r2 * self.v;
        p - origin
    }
}
