//! Vector helpers that glam does not provide.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Coordinate axis used by [`Vec3Ext::rotate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    #[default]
    Y,
    Z,
}

/// Extra operations on [`DVec3`] used by the renderer.
pub trait Vec3Ext {
    /// True if every component is below `1e-8` in magnitude.
    fn near_zero(&self) -> bool;

    /// Rotate around a coordinate axis by a signed angle in degrees.
    fn rotate(&self, axis: Axis, degrees: f64) -> Self;
}

impl Vec3Ext for DVec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        const S: f64 = 1e-8;
        self.x.abs() < S && self.y.abs() < S && self.z.abs() < S
    }

    fn rotate(&self, axis: Axis, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        match axis {
            Axis::X => DVec3::new(
                self.x,
                self.y * cos - self.z * sin,
                self.y * sin + self.z * cos,
            ),
            Axis::Y => DVec3::new(
                self.x * cos + self.z * sin,
                self.y,
                -self.x * sin + self.z * cos,
            ),
            Axis::Z => DVec3::new(
                self.x * cos - self.y * sin,
                self.x * sin + self.y * cos,
                self.z,
            ),
        }
    }
}

/// Reflect `v` about the normal `n`.
#[inline]
pub fn reflect(v: DVec3, n: DVec3) -> DVec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with normal `n`.
///
/// `etai_over_etat` is the ratio of refractive indices (incident over
/// transmitted).
#[inline]
pub fn refract(uv: DVec3, n: DVec3, etai_over_etat: f64) -> DVec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_near_zero() {
        assert!(DVec3::new(1e-9, -1e-9, 0.0).near_zero());
        assert!(!DVec3::new(1e-9, 1e-7, 0.0).near_zero());
        assert!(!DVec3::new(0.0, 0.0, -1e-8).near_zero());
    }

    #[test]
    fn test_rotate_y_quarter_turn() {
        let v = DVec3::new(1.0, 2.0, 0.0);
        let r = v.rotate(Axis::Y, 90.0);
        assert!(approx_eq(r, DVec3::new(0.0, 2.0, -1.0)));
    }

    #[test]
    fn test_rotate_x_and_z() {
        let r = DVec3::Y.rotate(Axis::X, 90.0);
        assert!(approx_eq(r, DVec3::Z));

        let r = DVec3::X.rotate(Axis::Z, 90.0);
        assert!(approx_eq(r, DVec3::Y));

        let r = DVec3::X.rotate(Axis::Z, -90.0);
        assert!(approx_eq(r, -DVec3::Y));
    }

    #[test]
    fn test_rotate_preserves_length() {
        let v = DVec3::new(-2.0, 2.0, -5.0);
        let mut r = v;
        for _ in 0..72 {
            r = r.rotate(Axis::Y, 5.0);
        }
        assert!((r.length() - v.length()).abs() < 1e-9);
        // A full turn comes back to the start
        assert!((r - v).length() < 1e-9);
    }

    #[test]
    fn test_reflect() {
        let v = DVec3::new(1.0, -1.0, 0.0);
        let n = DVec3::Y;
        assert_eq!(reflect(v, n), DVec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_unit_ratio_is_straight() {
        let uv = DVec3::new(1.0, -2.0, 0.5).normalize();
        let n = DVec3::Y;
        let out = refract(uv, n, 1.0);
        assert!(approx_eq(out, uv));
    }

    #[test]
    fn test_refract_normal_incidence() {
        let out = refract(-DVec3::Y, DVec3::Y, 1.0 / 1.5);
        assert!(approx_eq(out, -DVec3::Y));
    }
}
