//! Triangle primitive for ray tracing.
//!
//! Intersects the supporting plane first, then keeps the hit only if it
//! lies on the inner side of all three edges. Triangles built with vertex
//! normals report a barycentric blend of them instead of the face normal.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use lumen_math::{Interval, Point3, Ray, Vec3};

/// A triangle primitive.
pub struct Triangle {
    /// Vertices in winding order
    vertices: [Point3; 3],
    /// Unit vertex normals, one per vertex
    normals: Option<[Vec3; 3]>,
    material: Arc<dyn Material>,
}

impl Triangle {
    /// Create a flat-shaded triangle.
    pub fn new(v1: Point3, v2: Point3, v3: Point3, material: Arc<dyn Material>) -> Self {
        Self {
            vertices: [v1, v2, v3],
            normals: None,
            material,
        }
    }

    /// Create a triangle with per-vertex normals for smooth shading.
    ///
    /// The normals are normalized here.
    pub fn with_vertex_normals(
        vertices: [Point3; 3],
        normals: [Vec3; 3],
        material: Arc<dyn Material>,
    ) -> Self {
        Self {
            vertices,
            normals: Some(normals.map(|n| n.normalize_or_zero())),
            material,
        }
    }

    pub fn vertices(&self) -> &[Point3; 3] {
        &self.vertices
    }

    pub fn normals(&self) -> Option<&[Vec3; 3]> {
        self.normals.as_ref()
    }
}

impl Hittable for Triangle {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let [v1, v2, v3] = self.vertices;
        let n = (v2 - v1).cross(v3 - v1);

        // Parallel to the plane (also catches zero-area triangles)
        let n_dot_dir = n.dot(ray.direction());
        if n_dot_dir == 0.0 {
            return None;
        }

        let d = (-n).dot(v1);
        let t = -(n.dot(ray.origin()) + d) / n_dot_dir;
        if !ray_t.contains(t) {
            return None;
        }

        let p = ray.at(t);
        for (start, end) in [(v1, v2), (v2, v3), (v3, v1)] {
            let c = (end - start).cross(p - start);
            if n.dot(c) < 0.0 {
                return None;
            }
        }

        let outward_normal = match &self.normals {
            None => n.normalize(),
            Some([n1, n2, n3]) => {
                let (u, v, w) = barycentric(v1, v2, v3, p)?;
                let blended = u * *n1 + v * *n2 + w * *n3;
                let len_sq = blended.length_squared();
                if !(len_sq.is_finite() && len_sq > 0.0) {
                    return None;
                }
                blended / len_sq.sqrt()
            }
        };

        Some(HitRecord::new(ray, t, outward_normal, self.material.as_ref()))
    }
}

/// Barycentric weights `(u, v, w)` of `p` against the triangle `(a, b, c)`.
///
/// `u` pairs with `a`, `v` with `b` and `w` with `c`. Returns `None` for
/// a degenerate triangle.
pub fn barycentric(a: Point3, b: Point3, c: Point3, p: Point3) -> Option<(f64, f64, f64)> {
    let e0 = b - a;
    let e1 = c - a;
    let e2 = p - a;

    let d00 = e0.dot(e0);
    let d01 = e0.dot(e1);
    let d11 = e1.dot(e1);
    let d20 = e2.dot(e0);
    let d21 = e2.dot(e1);

    let denom = d00 * d11 - d01 * d01;
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    Some((1.0 - v - w, v, w))
}
