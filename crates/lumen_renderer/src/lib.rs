//! Lumen Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer: rays are cast from a pinhole camera, bounced
//! off spheres and triangles by diffuse, metal and glass materials, and
//! averaged into a gamma-encoded pixel grid.
//!
//! Every function that needs randomness takes an explicit
//! `&mut dyn RngCore`, so a seeded generator gives byte-identical output.

mod camera;
mod hittable;
mod material;
mod ppm;
mod renderer;
mod sampling;
mod sphere;
mod triangle;
mod world;

pub use camera::{Camera, CameraError};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use ppm::{to_ppm_string, write_ppm};
pub use renderer::{color_to_rgb, linear_to_gamma, ray_color, render, render_pixel, ImageBuffer, T_MIN};
pub use sampling::{gen_f64, gen_range, random_in_unit_sphere, random_unit_vector, sample_square};
pub use sphere::Sphere;
pub use triangle::{barycentric, Triangle};
pub use world::{build_material, Frame, World, WorldError};

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Color, Interval, Point3, Ray, Vec3};
