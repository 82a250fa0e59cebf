//! Sphere primitive for ray tracing.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use lumen_math::{Interval, Point3, Ray, Vec3};

/// A sphere primitive.
///
/// The center can be moved between frames with [`Sphere::translate`].
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Point3, radius: f64, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Move the sphere by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        self.center += offset;
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        // A zero or NaN radius would put NaN into the normal
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return None;
        }

        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        if a == 0.0 {
            return None;
        }
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(
            ray,
            root,
            outward_normal,
            self.material.as_ref(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sphere(center: Vec3, radius: f64) -> Sphere {
        Sphere::new(center, radius, Arc::new(Lambertian::new(Vec3::splat(0.5))))
    }

    fn default_interval() -> Interval {
        Interval::new(0.001, f64::INFINITY)
    }

    #[test]
    fn test_sphere_hit() {
        let s = sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = s.hit(&ray, default_interval()).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-12);
        assert_eq!(rec.p, Vec3::new(0.0, 0.0, -0.5));
        assert_eq!(rec.normal, Vec3::Z);
        assert!(rec.front_face);
    }

    #[test]
    fn test_sphere_miss() {
        let s = sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(s.hit(&ray, default_interval()).is_none());

        // Sphere entirely behind the ray
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert!(s.hit(&ray, default_interval()).is_none());
    }

    #[test]
    fn test_hit_from_inside_uses_far_root() {
        let s = sphere(Vec3::ZERO, 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = s.hit(&ray, default_interval()).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-12);
        assert!(!rec.front_face);
        // Normal flipped to face the ray
        assert_eq!(rec.normal, -Vec3::X);
    }

    #[test]
    fn test_roots_on_interval_boundary_are_rejected() {
        let s = sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        // Near root 0.5 excluded by the open bound, far root 1.5 taken
        let rec = s.hit(&ray, Interval::new(0.5, 10.0)).unwrap();
        assert!((rec.t - 1.5).abs() < 1e-12);

        // Both roots excluded
        assert!(s.hit(&ray, Interval::new(0.5, 1.5)).is_none());
    }

    #[test]
    fn test_hit_points_lie_on_surface() {
        let mut rng = StdRng::seed_from_u64(7);
        let center = Vec3::new(0.3, -0.2, -3.0);
        let s = sphere(center, 1.25);

        let mut hits = 0;
        for _ in 0..500 {
            let dir = Vec3::new(
                rng.gen_range(-0.5..0.5),
                rng.gen_range(-0.5..0.5),
                -1.0,
            );
            let ray = Ray::new(Vec3::ZERO, dir);
            if let Some(rec) = s.hit(&ray, default_interval()) {
                hits += 1;
                assert!(((rec.p - center).length() - 1.25).abs() < 1e-6);
                assert!((rec.normal.length() - 1.0).abs() < 1e-6);
                assert!(rec.normal.dot(dir) < 0.0);
            }
        }
        assert!(hits > 0);
    }

    #[test]
    fn test_degenerate_spheres_never_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let s = sphere(Vec3::new(0.0, 0.0, -1.0), radius);
            assert!(s.hit(&ray, default_interval()).is_none());
        }

        // Zero-length direction
        let s = sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(s.hit(&ray, default_interval()).is_none());
    }

    #[test]
    fn test_translate() {
        let mut s = sphere(Vec3::new(2.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(s.hit(&ray, default_interval()).is_none());

        s.translate(Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(s.center(), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(s.radius(), 0.5);
        assert!(s.hit(&ray, default_interval()).is_some());
    }
}
