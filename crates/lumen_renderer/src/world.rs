//! Renderable worlds built from scene descriptions.
//!
//! A [`World`] resolves material names and loads meshes once. Each call to
//! [`World::frame`] then builds a fresh [`HittableList`] and [`Camera`] for
//! that frame, with sphere motion and camera orbit applied, so nothing is
//! mutated while a frame renders.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lumen_core::{
    load_obj, Animation, CameraSettings, MaterialDesc, Mesh, MeshError, Motion, ObjectDesc,
    ParseError, SceneDescription,
};
use lumen_math::{Point3, Vec3, Vec3Ext};
use thiserror::Error;

use crate::{Camera, Dielectric, HittableList, Lambertian, Material, Metal, Sphere, Triangle};

/// Errors raised while building a world.
#[derive(Error, Debug)]
pub enum WorldError {
    #[error("Object {index} uses unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Failed to parse mesh {}: {source}", .path.display())]
    Obj {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Failed to build mesh {}: {source}", .path.display())]
    Mesh {
        path: PathBuf,
        #[source]
        source: MeshError,
    },
}

/// Create the material a description names.
pub fn build_material(desc: &MaterialDesc) -> Arc<dyn Material> {
    match desc {
        MaterialDesc::Lambertian { albedo } => Arc::new(Lambertian::new(*albedo)),
        MaterialDesc::Metal { albedo, fuzz } => Arc::new(Metal::new(*albedo, *fuzz)),
        MaterialDesc::Dielectric { ir } => Arc::new(Dielectric::new(*ir)),
    }
}

/// A scene object with its material resolved.
enum Prototype {
    Sphere {
        center: Point3,
        radius: f64,
        material: Arc<dyn Material>,
        motion: Option<Motion>,
    },
    Triangle {
        vertices: [Point3; 3],
        normals: Option<[Vec3; 3]>,
        material: Arc<dyn Material>,
    },
    Mesh {
        mesh: Mesh,
        material: Arc<dyn Material>,
    },
}

/// One frame's immutable scene and configured camera.
pub struct Frame {
    pub scene: HittableList,
    pub camera: Camera,
}

/// Everything needed to produce any frame of an animation.
pub struct World {
    camera: CameraSettings,
    animation: Animation,
    prototypes: Vec<Prototype>,
}

impl World {
    /// Resolve a scene description. Mesh paths are relative to `base_dir`.
    pub fn from_description(
        desc: &SceneDescription,
        base_dir: impl AsRef<Path>,
    ) -> Result<Self, WorldError> {
        let base_dir = base_dir.as_ref();

        let materials: BTreeMap<&str, Arc<dyn Material>> = desc
            .materials
            .iter()
            .map(|(name, m)| (name.as_str(), build_material(m)))
            .collect();

        let lookup = |index: usize, name: &str| {
            materials
                .get(name)
                .cloned()
                .ok_or_else(|| WorldError::UnknownMaterial {
                    index,
                    name: name.to_string(),
                })
        };

        let mut prototypes = Vec::with_capacity(desc.objects.len());
        for (index, object) in desc.objects.iter().enumerate() {
            let prototype = match object {
                ObjectDesc::Sphere {
                    center,
                    radius,
                    material,
                    motion,
                } => Prototype::Sphere {
                    center: *center,
                    radius: *radius,
                    material: lookup(index, material.as_str())?,
                    motion: motion.clone(),
                },
                ObjectDesc::Triangle {
                    vertices,
                    normals,
                    material,
                } => Prototype::Triangle {
                    vertices: *vertices,
                    normals: *normals,
                    material: lookup(index, material.as_str())?,
                },
                ObjectDesc::Mesh {
                    path,
                    material,
                    translation,
                    scale,
                } => {
                    let material = lookup(index, material.as_str())?;
                    let mesh = load_mesh(&base_dir.join(path))?;
                    Prototype::Mesh {
                        mesh: mesh.transformed(*translation, *scale),
                        material,
                    }
                }
            };
            prototypes.push(prototype);
        }

        log::info!(
            "Built world: {} materials, {} objects",
            materials.len(),
            prototypes.len()
        );

        Ok(Self {
            camera: desc.camera.clone(),
            animation: desc.animation.clone(),
            prototypes,
        })
    }

    /// Number of frames in the animation.
    pub fn frame_count(&self) -> u32 {
        self.animation.frames
    }

    /// Camera settings, mutable so the driver can override them.
    pub fn camera_settings_mut(&mut self) -> &mut CameraSettings {
        &mut self.camera
    }

    /// Camera for `frame`, with the orbit applied once per preceding frame.
    pub fn camera(&self, frame: u32) -> Camera {
        let mut settings = self.camera.clone();
        if self.animation.orbit_degrees != 0.0 {
            for _ in 0..frame {
                settings.look_from = settings
                    .look_from
                    .rotate(self.animation.orbit_axis, self.animation.orbit_degrees);
            }
        }
        Camera::from_settings(&settings)
    }

    /// Fresh hittable list for `frame`.
    pub fn scene(&self, frame: u32) -> HittableList {
        let mut scene = HittableList::new();

        for prototype in &self.prototypes {
            match prototype {
                Prototype::Sphere {
                    center,
                    radius,
                    material,
                    motion,
                } => {
                    let mut sphere = Sphere::new(*center, *radius, material.clone());
                    if let Some(motion) = motion {
                        sphere.translate(motion.offset_at(center.y, frame));
                    }
                    scene.add(Box::new(sphere));
                }
                Prototype::Triangle {
                    vertices,
                    normals,
                    material,
                } => scene.add(Box::new(make_triangle(*vertices, *normals, material))),
                Prototype::Mesh { mesh, material } => {
                    for tri in &mesh.triangles {
                        scene.add(Box::new(make_triangle(tri.vertices, tri.normals, material)));
                    }
                }
            }
        }

        log::debug!("Frame {}: {} hittables", frame, scene.len());
        scene
    }

    /// Scene and camera for `frame`.
    pub fn frame(&self, frame: u32) -> Frame {
        Frame {
            scene: self.scene(frame),
            camera: self.camera(frame),
        }
    }
}

fn make_triangle(
    vertices: [Point3; 3],
    normals: Option<[Vec3; 3]>,
    material: &Arc<dyn Material>,
) -> Triangle {
    match normals {
        Some(normals) => Triangle::with_vertex_normals(vertices, normals, material.clone()),
        None => {
            let [v1, v2, v3] = vertices;
            Triangle::new(v1, v2, v3, material.clone())
        }
    }
}

/// Load every model of an OBJ file into one mesh.
fn load_mesh(path: &Path) -> Result<Mesh, WorldError> {
    let file = load_obj(path).map_err(|source| WorldError::Obj {
        path: path.to_path_buf(),
        source,
    })?;

    let mesh_error = |source| WorldError::Mesh {
        path: path.to_path_buf(),
        source,
    };

    if file.models.is_empty() {
        return Err(mesh_error(MeshError::NoModels));
    }

    let mut combined = Mesh::default();
    for model in &file.models {
        let mesh = Mesh::from_obj_model(model).map_err(mesh_error)?;
        if combined.name.is_empty() {
            combined.name = mesh.name;
        }
        combined.triangles.extend(mesh.triangles);
    }

    match combined.bounds() {
        Some((min, max)) => log::info!(
            "Loaded mesh {}: {} triangles, bounds {} to {}",
            combined.name,
            combined.triangle_count(),
            min,
            max
        ),
        None => log::warn!("Mesh {} has no triangles", path.display()),
    }

    Ok(combined)
}
