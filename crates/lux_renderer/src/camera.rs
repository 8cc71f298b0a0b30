//! Camera for ray generation.

use lux_math::{Ray, Vec3};
use serde::{Deserialize, Serialize};

/// Pinhole camera mapping image-plane fractions to primary rays.
///
/// `(s, t) = (0, 0)` is the lower-left corner of the view, `(1, 1)` the
/// upper-right. Sub-pixel jitter is the caller's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "CameraSettings", into = "CameraSettings")]
pub struct Camera {
    settings: CameraSettings,

    // Cached computed values
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

/// User-facing camera parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Width / height
    pub aspect_ratio: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aspect_ratio: 16.0 / 9.0,
        }
    }
}

impl From<CameraSettings> for Camera {
    fn from(settings: CameraSettings) -> Self {
        let mut camera = Self {
            settings,
            origin: Vec3::ZERO,
            lower_left_corner: Vec3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
        };
        camera.initialize();
        camera
    }
}

impl From<Camera> for CameraSettings {
    fn from(camera: Camera) -> Self {
        camera.settings
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::from(CameraSettings::default())
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.settings.look_from = look_from;
        self.settings.look_at = look_at;
        self.settings.vup = vup;
        self.initialize();
        self
    }

    /// Set vertical field of view in degrees.
    pub fn with_lens(mut self, vfov: f32) -> Self {
        self.settings.vfov = vfov;
        self.initialize();
        self
    }

    /// Set the viewport aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.settings.aspect_ratio = aspect_ratio;
        self.initialize();
        self
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Recompute the view plane from the current settings.
    fn initialize(&mut self) {
        let s = &self.settings;

        let theta = s.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = s.aspect_ratio * viewport_height;

        // Camera basis
        let w = (s.look_from - s.look_at).normalize();
        let u = s.vup.cross(w).normalize();
        let v = w.cross(u);

        self.origin = s.look_from;
        self.horizontal = viewport_width * u;
        self.vertical = viewport_height * v;
        self.lower_left_corner = self.origin - self.horizontal / 2.0 - self.vertical / 2.0 - w;
    }

    /// Generate the ray through image-plane fractions `(s, t)`.
    pub fn get_ray(&self, s: f32, t: f32) -> Ray {
        Ray::new(
            self.origin,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - self.origin,
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
