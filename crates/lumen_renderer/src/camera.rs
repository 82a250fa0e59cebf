//! Camera for ray generation.

use lumen_core::CameraSettings;
use lumen_math::{Point3, Ray, Vec3};
use rand::RngCore;
use thiserror::Error;

use crate::sample_square;

/// Camera configurations that cannot produce an image.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("Aspect ratio must be a positive number, got {0}")]
    InvalidAspectRatio(f64),

    #[error("Image width must be at least 1 pixel")]
    ZeroWidth,

    #[error("At least one sample per pixel is required")]
    ZeroSamples,

    #[error("Vertical field of view must be between 0 and 180 degrees, got {0}")]
    InvalidFieldOfView(f64),

    #[error("Camera looks from and at the same point {0}")]
    CoincidentLookAt(Point3),

    #[error("Up vector {0} is parallel to the view direction")]
    DegenerateUp(Vec3),
}

/// Pinhole camera generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub aspect_ratio: f64,
    pub image_width: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,

    // Camera positioning
    pub vfov: f64, // Vertical field of view in degrees
    pub look_from: Point3,
    pub look_at: Point3,
    pub vup: Vec3,

    // Cached computed values (set by initialize())
    image_height: u32,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    samples_scale: f64,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::from_settings(&CameraSettings::default())
    }

    /// Create a camera from a scene file's camera block.
    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self {
            aspect_ratio: settings.aspect_ratio,
            image_width: settings.image_width,
            samples_per_pixel: settings.samples_per_pixel,
            max_depth: settings.max_depth,
            vfov: settings.vfov,
            look_from: settings.look_from,
            look_at: settings.look_at,
            vup: settings.vup,
            image_height: 0,
            center: Point3::ZERO,
            pixel00_loc: Point3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            samples_scale: 0.0,
        }
    }

    /// Set image width and aspect ratio (width over height).
    pub fn with_resolution(mut self, width: u32, aspect_ratio: f64) -> Self {
        self.image_width = width;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set vertical field of view in degrees.
    pub fn with_vfov(mut self, vfov: f64) -> Self {
        self.vfov = vfov;
        self
    }

    /// Validate the settings and derive the viewport (must be called before
    /// generating rays).
    pub fn initialize(&mut self) -> Result<(), CameraError> {
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(CameraError::InvalidAspectRatio(self.aspect_ratio));
        }
        if self.image_width == 0 {
            return Err(CameraError::ZeroWidth);
        }
        if self.samples_per_pixel == 0 {
            return Err(CameraError::ZeroSamples);
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(CameraError::InvalidFieldOfView(self.vfov));
        }

        let view = self.look_from - self.look_at;
        let focal_length = view.length();
        if !(focal_length.is_finite() && focal_length > 0.0) {
            return Err(CameraError::CoincidentLookAt(self.look_from));
        }
        let side = self.vup.cross(view);
        if side.length_squared() == 0.0 {
            return Err(CameraError::DegenerateUp(self.vup));
        }

        self.image_height = ((self.image_width as f64 / self.aspect_ratio) as u32).max(1);
        self.samples_scale = 1.0 / self.samples_per_pixel as f64;
        self.center = self.look_from;

        // Calculate viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * focal_length;
        let viewport_width =
            viewport_height * (self.image_width as f64 / self.image_height as f64);

        // Calculate camera basis vectors
        let w = view.normalize();
        let u = side.normalize();
        let v = w.cross(u);

        // Calculate viewport vectors; v is flipped so rows run downwards
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        // Calculate pixel delta vectors
        self.pixel_delta_u = viewport_u / self.image_width as f64;
        self.pixel_delta_v = viewport_v / self.image_height as f64;

        // Calculate upper left pixel location
        let viewport_upper_left =
            self.center - focal_length * w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        Ok(())
    }

    /// Generate a ray for pixel (i, j) jittered within the pixel's square.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let pixel_center = self.pixel00_loc
            + (i as f64) * self.pixel_delta_u
            + (j as f64) * self.pixel_delta_v;

        let (px, py) = sample_square(rng);
        let pixel_sample = pixel_center + px * self.pixel_delta_u + py * self.pixel_delta_v;

        Ray::new(self.center, pixel_sample - self.center)
    }

    /// Image height in pixels, valid after `initialize()`.
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Camera center, valid after `initialize()`.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f64 {
        self.samples_scale
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_defaults() {
        let camera = Camera::new();
        assert_eq!(camera.aspect_ratio, 1.0);
        assert_eq!(camera.image_width, 100);
        assert_eq!(camera.samples_per_pixel, 10);
        assert_eq!(camera.max_depth, 10);
        assert_eq!(camera.vfov, 90.0);
        assert_eq!(camera.look_from, Point3::new(0.0, 0.0, -1.0));
        assert_eq!(camera.look_at, Point3::ZERO);
        assert_eq!(camera.vup, Vec3::Y);
    }

    #[test]
    fn test_camera_initialize() {
        let mut camera = Camera::new()
            .with_resolution(400, 2.0)
            .with_quality(4, 5)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_vfov(90.0);

        camera.initialize().unwrap();

        assert_eq!(camera.image_height(), 200);
        assert_eq!(camera.center(), Vec3::ZERO);
        assert_eq!(camera.samples_scale(), 0.25);

        // Viewport is 2 units tall at focal length 1, aspect-matched width
        let height = camera.pixel_delta_v.length() * 200.0;
        let width = camera.pixel_delta_u.length() * 400.0;
        assert!((height - 2.0).abs() < 1e-9);
        assert!((width - 4.0).abs() < 1e-9);
        // Rows move down the image
        assert!(camera.pixel_delta_v.y < 0.0);
        assert!(camera.pixel_delta_u.x > 0.0);
    }

    #[test]
    fn test_image_height_is_at_least_one() {
        let mut camera = Camera::new().with_resolution(10, 100.0);
        camera.initialize().unwrap();
        assert_eq!(camera.image_height(), 1);
    }

    #[test]
    fn test_center_pixel_ray_points_at_target() {
        let mut camera = Camera::new()
            .with_resolution(101, 1.0)
            .with_position(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y);
        camera.initialize().unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let ray = camera.get_ray(50, 50, &mut rng);
        assert_eq!(ray.origin(), Vec3::new(0.0, 0.0, 3.0));

        // Jitter stays within half a pixel of the center ray
        let dir = ray.direction().normalize();
        let pixel = camera.pixel_delta_u.length();
        assert!(dir.z < 0.0);
        assert!(dir.x.abs() * 3.0 < pixel);
        assert!(dir.y.abs() * 3.0 < pixel);
    }

    #[test]
    fn test_invalid_configurations() {
        let cases = [
            (
                Camera::new().with_resolution(100, 0.0),
                CameraError::InvalidAspectRatio(0.0),
            ),
            (Camera::new().with_resolution(0, 1.0), CameraError::ZeroWidth),
            (Camera::new().with_quality(0, 10), CameraError::ZeroSamples),
            (
                Camera::new().with_vfov(180.0),
                CameraError::InvalidFieldOfView(180.0),
            ),
            (
                Camera::new().with_position(Vec3::ONE, Vec3::ONE, Vec3::Y),
                CameraError::CoincidentLookAt(Vec3::ONE),
            ),
            (
                Camera::new().with_position(Vec3::new(0.0, 2.0, 0.0), Vec3::ZERO, Vec3::Y),
                CameraError::DegenerateUp(Vec3::Y),
            ),
        ];

        for (mut camera, expected) in cases {
            assert_eq!(camera.initialize(), Err(expected));
        }
    }

    #[test]
    fn test_from_settings() {
        let settings = CameraSettings {
            image_width: 32,
            aspect_ratio: 2.0,
            look_from: Point3::new(1.0, 2.0, 3.0),
            ..CameraSettings::default()
        };
        let mut camera = Camera::from_settings(&settings);
        camera.initialize().unwrap();

        assert_eq!(camera.image_height(), 16);
        assert_eq!(camera.center(), Point3::new(1.0, 2.0, 3.0));
    }
}
