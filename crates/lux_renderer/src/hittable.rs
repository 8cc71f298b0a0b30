//! Hittable trait, HitRecord, and the flat scene aggregate.

use crate::Material;
use lux_math::{Interval, Ray, Vec3};
use rand::{Rng, RngCore};
use std::sync::Arc;

/// Record of a ray-object intersection.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point, borrowed from the primitive
    pub material: &'a dyn Material,
    /// UV surface coordinates
    pub u: f32,
    pub v: f32,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record for a hit at parameter `t`, orienting the normal
    /// against the incoming ray.
    pub fn new(
        ray: &Ray,
        t: f32,
        outward_normal: Vec3,
        material: &'a dyn Material,
        (u, v): (f32, f32),
    ) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            material,
            u,
            v,
            t,
            front_face: true,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        // Normal always points against the ray
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays and sampled as light targets.
pub trait Hittable: Send + Sync {
    /// Find the nearest intersection with `t` inside `ray_t` (inclusive).
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;

    /// Solid-angle density of sampling `direction` from `origin` with
    /// [`Hittable::random`].
    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32;

    /// Random direction from `origin` toward this object.
    fn random(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3;
}

/// An unordered list of shared hittable objects.
///
/// The same primitive may live in a full scene and in a lights-only scene at
/// the same time; both hold an `Arc` to it.
#[derive(Clone, Default)]
pub struct Scene {
    objects: Vec<Arc<dyn Hittable>>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Arc<dyn Hittable>] {
        &self.objects
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in &self.objects {
            let max = closest.as_ref().map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = object.hit(ray, ray_t.with_max(max)) {
                closest = Some(rec);
            }
        }

        closest
    }

    /// Mean of the members' densities: each member is picked with equal
    /// probability by [`Scene::random`].
    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32 {
        if self.objects.is_empty() {
            return 0.0;
        }

        let sum: f32 = self
            .objects
            .iter()
            .map(|object| object.pdf_value(origin, direction))
            .sum();

        sum / self.objects.len() as f32
    }

    fn random(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        if self.objects.is_empty() {
            return Vec3::X;
        }

        let index = rng.gen_range(0..self.objects.len());
        self.objects[index].random(origin, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiffuseLight, Lambertian, Quad, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grey() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Vec3::splat(0.5)))
    }

    #[test]
    fn test_scene_returns_closest_hit() {
        let mut scene = Scene::new();
        scene.add(Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, grey())));
        scene.add(Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, grey())));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = scene
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("ray should hit the nearer sphere");

        assert!((rec.t - 1.5).abs() < 1e-4, "t = {}", rec.t);
    }

    #[test]
    fn test_scene_miss() {
        let mut scene = Scene::new();
        scene.add(Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, grey())));

        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(scene.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_empty_scene_sampling() {
        let scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(scene.is_empty());
        assert_eq!(scene.pdf_value(Vec3::ZERO, Vec3::Y), 0.0);
        assert_eq!(scene.random(Vec3::ZERO, &mut rng), Vec3::X);
    }

    #[test]
    fn test_scene_pdf_is_mean_of_members() {
        let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Vec3::ONE));
        let sphere = Arc::new(Sphere::new(Vec3::new(0.0, 5.0, 0.0), 1.0, light.clone()));
        let quad = Arc::new(Quad::new(
            Vec3::new(10.0, -1.0, -1.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
            light,
        ));

        let mut lights = Scene::new();
        lights.add(sphere.clone());
        lights.add(quad);

        // Direction only sees the sphere, so the mean halves its density
        let direction = Vec3::Y;
        let expected = 0.5 * sphere.pdf_value(Vec3::ZERO, direction);
        assert!((lights.pdf_value(Vec3::ZERO, direction) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_shared_primitive_in_two_scenes() {
        let sphere: Arc<dyn Hittable> =
            Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, grey()));

        let mut world = Scene::new();
        let mut lights = Scene::new();
        world.add(sphere.clone());
        lights.add(sphere.clone());

        assert_eq!(Arc::strong_count(&sphere), 3);
        assert_eq!(world.len(), 1);
        assert_eq!(lights.len(), 1);
    }
}
