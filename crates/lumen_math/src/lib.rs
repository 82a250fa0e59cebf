//! Lumen math types.
//!
//! Points, directions and colors all share one double-precision vector
//! representation. The aliases below only document intent.

pub use glam::DVec3;

mod interval;
mod ray;
mod vec3;

pub use interval::Interval;
pub use ray::Ray;
pub use vec3::{reflect, refract, Axis, Vec3Ext};

/// General-purpose 3-component vector.
pub type Vec3 = DVec3;

/// A position in world space.
pub type Point3 = DVec3;

/// Linear-space RGB color (components conventionally in `[0, 1]`).
pub type Color = DVec3;
