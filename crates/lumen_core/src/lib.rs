//! Lumen Core - scene input for the path tracer.
//!
//! This crate provides:
//!
//! - **OBJ support**: Wavefront OBJ text parsing into plain model data
//! - **Meshes**: triangle soups resolved from parsed models
//! - **Scene descriptions**: the JSON file the driver renders from
//!
//! Nothing here knows about rays or materials; the renderer turns these
//! values into intersectable geometry.
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{load_obj, Mesh};
//!
//! let file = load_obj("cube.obj")?;
//! let mesh = Mesh::from_obj_model(&file.models[0])?;
//! println!("{} triangles", mesh.triangle_count());
//! ```

pub mod mesh;
pub mod obj;
pub mod scene;

pub use mesh::{Mesh, MeshError, MeshTriangle};
pub use obj::{load_obj, ObjFile, ObjModel, ObjParser, ParseError};
pub use scene::{
    Animation, CameraSettings, MaterialDesc, Motion, ObjectDesc, SceneDescription, SceneError,
};
