//! Triangle meshes resolved from parsed OBJ models.
//!
//! A [`Mesh`] is a flat list of triangles with world-ready positions and
//! optional per-vertex normals. The renderer turns each entry into one
//! intersectable triangle sharing the mesh's material.

use lumen_math::{Point3, Vec3};
use thiserror::Error;

use crate::obj::{FaceVertex, ObjModel};

/// Errors raised while resolving a model into triangles.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("Face {face} references vertex {index}, but the model has {count} vertices")]
    VertexOutOfRange { face: usize, index: i64, count: usize },

    #[error("Face {face} has {count} vertices, at least 3 are required")]
    TooFewVertices { face: usize, count: usize },

    #[error("OBJ file contains no models")]
    NoModels,
}

/// One triangle of a mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshTriangle {
    /// Vertex positions, in face winding order
    pub vertices: [Point3; 3],
    /// Per-vertex normals, present only if all three corners had one
    pub normals: Option<[Vec3; 3]>,
}

/// A triangle soup built from one OBJ model.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub name: String,
    pub triangles: Vec<MeshTriangle>,
}

impl Mesh {
    /// Resolve every face of `model` into triangles.
    ///
    /// Faces with more than three corners are split as a fan around their
    /// first corner. A triangle gets vertex normals only when every corner
    /// references an existing normal; otherwise it is flat shaded.
    pub fn from_obj_model(model: &ObjModel) -> Result<Self, MeshError> {
        let mut triangles = Vec::with_capacity(model.faces.len());
        let mut flat_fallbacks = 0;

        for (face_idx, face) in model.faces.iter().enumerate() {
            let corners = &face.vertices;
            if corners.len() < 3 {
                return Err(MeshError::TooFewVertices {
                    face: face_idx,
                    count: corners.len(),
                });
            }

            for k in 1..corners.len() - 1 {
                let fan = [corners[0], corners[k], corners[k + 1]];

                let vertices = [
                    resolve_vertex(model, face_idx, &fan[0])?,
                    resolve_vertex(model, face_idx, &fan[1])?,
                    resolve_vertex(model, face_idx, &fan[2])?,
                ];

                let normals = match (
                    resolve_normal(model, &fan[0]),
                    resolve_normal(model, &fan[1]),
                    resolve_normal(model, &fan[2]),
                ) {
                    (Some(n0), Some(n1), Some(n2)) => Some([n0, n1, n2]),
                    (None, None, None) => None,
                    _ => {
                        flat_fallbacks += 1;
                        None
                    }
                };

                triangles.push(MeshTriangle { vertices, normals });
            }
        }

        if flat_fallbacks > 0 {
            log::debug!(
                "Mesh {}: {} triangles have partial vertex normals, using flat normals",
                model.name,
                flat_fallbacks
            );
        }

        Ok(Self {
            name: model.name.clone(),
            triangles,
        })
    }

    /// Return a copy with every vertex mapped to `(v + translation) * scale`.
    ///
    /// Normals are left untouched; a uniform scale does not change them.
    pub fn transformed(&self, translation: Vec3, scale: f64) -> Self {
        let triangles = self
            .triangles
            .iter()
            .map(|tri| MeshTriangle {
                vertices: tri.vertices.map(|v| (v + translation) * scale),
                normals: tri.normals,
            })
            .collect();

        Self {
            name: self.name.clone(),
            triangles,
        }
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Min and max corners of the axis-aligned box around all vertices.
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        let mut iter = self.triangles.iter().flat_map(|t| t.vertices);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), v| (min.min(v), max.max(v))))
    }
}

fn resolve_vertex(model: &ObjModel, face: usize, corner: &FaceVertex) -> Result<Point3, MeshError> {
    let count = model.vertices.len();
    let index = corner.vertex_index;
    if index < 1 || index as usize > count {
        return Err(MeshError::VertexOutOfRange { face, index, count });
    }
    Ok(model.vertices[index as usize - 1])
}

fn resolve_normal(model: &ObjModel, corner: &FaceVertex) -> Option<Vec3> {
    let index = corner.vertex_normal_index;
    if index < 1 {
        return None;
    }
    model.vertex_normals.get(index as usize - 1).copied()
}
