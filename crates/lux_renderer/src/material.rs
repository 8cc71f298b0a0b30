//! Material trait for surface scattering.
//!
//! A material answers three questions at a hit point: which direction
//! distribution to sample next ([`Material::scatter`]), how much light it
//! reflects between a pair of directions ([`Material::brdf`]) and how much it
//! emits on its own ([`Material::emitted`]).

use crate::hittable::HitRecord;
use crate::pdf::{CosinePdf, CosinePowerPdf, DeltaPdf, Pdf, UniformPdf};
use lux_math::{Ray, Vec3};
use std::f32::consts::PI;

/// Color type alias (RGB values typically 0-1, lights may exceed 1)
pub type Color = Vec3;

/// Below this fuzz a metal is treated as a perfect mirror.
pub const MIRROR_FUZZ_THRESHOLD: f32 = 0.01;

/// Result of a successful scatter.
pub struct ScatterRecord {
    /// Surface colour, reported for Russian roulette
    pub attenuation: Color,
    /// Distribution for the material sampling strategy
    pub pdf: Box<dyn Pdf>,
    /// True for delta lobes, which light sampling cannot hit
    pub is_specular: bool,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` when the surface absorbs (or only emits).
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord) -> Option<ScatterRecord>;

    /// Reflectance from `scattered` toward the incoming ray.
    fn brdf(&self, ray_in: &Ray, rec: &HitRecord, scattered: &Ray) -> Color;

    /// Get emitted light from this material.
    ///
    /// Most materials return black (no emission).
    fn emitted(&self, _ray_in: &Ray, _rec: &HitRecord) -> Color {
        Color::ZERO
    }
}

/// Lambertian (diffuse) material.
#[derive(Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord) -> Option<ScatterRecord> {
        Some(ScatterRecord {
            attenuation: self.albedo,
            pdf: Box::new(CosinePdf::new(rec.normal)),
            is_specular: false,
        })
    }

    fn brdf(&self, _ray_in: &Ray, _rec: &HitRecord, _scattered: &Ray) -> Color {
        self.albedo / PI
    }
}

/// Diffuse BRDF paired with uniform hemisphere sampling.
///
/// Reflectance is the same as [`Lambertian`], only the sampling density
/// differs. Kept to compare noise between the two.
#[derive(Clone)]
pub struct WrongLambertian {
    albedo: Color,
}

impl WrongLambertian {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for WrongLambertian {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord) -> Option<ScatterRecord> {
        Some(ScatterRecord {
            attenuation: self.albedo,
            pdf: Box::new(UniformPdf::new(rec.normal)),
            is_specular: false,
        })
    }

    fn brdf(&self, _ray_in: &Ray, _rec: &HitRecord, _scattered: &Ray) -> Color {
        self.albedo / PI
    }
}

/// Metal (specular) material.
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    fn is_mirror(&self) -> bool {
        self.fuzz < MIRROR_FUZZ_THRESHOLD
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord) -> Option<ScatterRecord> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);

        let (pdf, is_specular): (Box<dyn Pdf>, bool) = if self.is_mirror() {
            (Box::new(DeltaPdf::new(reflected)), true)
        } else {
            let exponent = CosinePowerPdf::exponent_from_fuzz(self.fuzz);
            (Box::new(CosinePowerPdf::new(reflected, exponent)), false)
        };

        Some(ScatterRecord {
            attenuation: self.albedo,
            pdf,
            is_specular,
        })
    }

    fn brdf(&self, ray_in: &Ray, rec: &HitRecord, scattered: &Ray) -> Color {
        let out = scattered.direction().normalize();
        let cos_theta = out.dot(rec.normal);
        if cos_theta <= 0.0 {
            return Color::ZERO;
        }

        let reflected = reflect(ray_in.direction().normalize(), rec.normal);

        // Divide out cos θ so that brdf · cos θ / pdf reduces to the albedo
        if self.is_mirror() {
            if DeltaPdf::matches(reflected, out) {
                self.albedo / cos_theta
            } else {
                Color::ZERO
            }
        } else {
            let exponent = CosinePowerPdf::exponent_from_fuzz(self.fuzz);
            let lobe = CosinePowerPdf::lobe(exponent, out.dot(reflected.normalize()));
            self.albedo * lobe / cos_theta
        }
    }
}

/// Diffuse light emitter.
pub struct DiffuseLight {
    emit: Color,
}

impl DiffuseLight {
    /// Create a new diffuse light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self { emit }
    }

    /// Create a light whose emission is `color` scaled by `intensity`.
    pub fn with_intensity(color: Color, intensity: f32) -> Self {
        Self {
            emit: color * intensity,
        }
    }
}

impl Material for DiffuseLight {
    fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord) -> Option<ScatterRecord> {
        // Lights don't scatter rays
        None
    }

    fn brdf(&self, _ray_in: &Ray, _rec: &HitRecord, _scattered: &Ray) -> Color {
        Color::ZERO
    }

    fn emitted(&self, _ray_in: &Ray, _rec: &HitRecord) -> Color {
        self.emit
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::Hittable;
    use crate::Quad;
    use lux_math::Interval;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    /// Hit a 2x2 floor quad carrying `material` with `ray`.
    fn hit_floor(material: Arc<dyn Material>, ray: &Ray, f: impl FnOnce(&HitRecord)) {
        let floor = Quad::new(
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(2.0, 0.0, 0.0),
            material,
        );
        let rec = floor
            .hit(ray, Interval::new(0.001, f32::INFINITY))
            .expect("ray should hit the floor");
        f(&rec);
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz, 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).fuzz, 0.0);
    }

    #[test]
    fn test_perfect_mirror_throughput_equals_albedo() {
        let albedo = Color::new(0.9, 0.8, 0.7);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let mut rng = StdRng::seed_from_u64(42);

        hit_floor(Arc::new(Metal::new(albedo, 0.0)), &ray, |rec| {
            let srec = rec
                .material
                .scatter(&ray, rec)
                .expect("metal always scatters");
            assert!(srec.is_specular);

            let direction = srec.pdf.generate(&mut rng);
            let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
            assert!((direction.normalize() - expected).length() < 1e-5);

            let scattered = Ray::new(rec.p, direction);
            let cos_theta = direction.normalize().dot(rec.normal);
            let throughput =
                rec.material.brdf(&ray, rec, &scattered) * cos_theta / srec.pdf.value(direction);
            assert!(
                (throughput - albedo).length() < 1e-4,
                "throughput {throughput:?} vs albedo {albedo:?}"
            );
        });
    }

    #[test]
    fn test_mirror_brdf_zero_off_reflection() {
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        hit_floor(Arc::new(Metal::new(Color::ONE, 0.0)), &ray, |rec| {
            let off = Ray::new(rec.p, Vec3::Y);
            assert_eq!(rec.material.brdf(&ray, rec, &off), Color::ZERO);
        });
    }

    #[test]
    fn test_glossy_metal_sample_weight_equals_albedo() {
        let albedo = Color::new(0.95, 0.95, 0.95);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.3), Vec3::new(1.0, -1.0, -0.3));
        let mut rng = StdRng::seed_from_u64(7);

        hit_floor(Arc::new(Metal::new(albedo, 0.2)), &ray, |rec| {
            let srec = rec.material.scatter(&ray, rec).unwrap();
            assert!(!srec.is_specular);

            for _ in 0..200 {
                let direction = srec.pdf.generate(&mut rng);
                let cos_theta = direction.normalize().dot(rec.normal);
                let density = srec.pdf.value(direction);
                if cos_theta <= 0.0 || density <= 0.0 {
                    continue;
                }
                let scattered = Ray::new(rec.p, direction);
                let weight = rec.material.brdf(&ray, rec, &scattered) * cos_theta / density;
                assert!((weight - albedo).length() < 1e-3, "weight {weight:?}");
            }
        });
    }

    #[test]
    fn test_lambertian_and_wrong_lambertian_share_brdf() {
        let albedo = Color::new(0.73, 0.5, 0.2);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), -Vec3::Y);

        hit_floor(Arc::new(Lambertian::new(albedo)), &ray, |rec| {
            let scattered = Ray::new(rec.p, Vec3::new(0.3, 1.0, 0.0));
            assert_eq!(rec.material.brdf(&ray, rec, &scattered), albedo / PI);
            assert!(!rec.material.scatter(&ray, rec).unwrap().is_specular);
        });
        hit_floor(Arc::new(WrongLambertian::new(albedo)), &ray, |rec| {
            let scattered = Ray::new(rec.p, Vec3::new(0.3, 1.0, 0.0));
            assert_eq!(rec.material.brdf(&ray, rec, &scattered), albedo / PI);
        });
    }

    #[test]
    fn test_diffuse_light_emits_and_absorbs() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), -Vec3::Y);
        let light = DiffuseLight::with_intensity(Color::new(0.8, 0.2, 0.2), 5.0);

        hit_floor(Arc::new(light), &ray, |rec| {
            assert!(rec.material.scatter(&ray, rec).is_none());
            assert!((rec.material.emitted(&ray, rec) - Color::new(4.0, 1.0, 1.0)).length() < 1e-6);
            assert_eq!(rec.material.brdf(&ray, rec, &ray), Color::ZERO);
        });
    }
}
