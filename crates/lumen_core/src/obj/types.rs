//! Plain data produced by the OBJ parser.

use lumen_math::Vec3;

/// Everything parsed out of one OBJ file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjFile {
    pub models: Vec<ObjModel>,
    /// File names from `mtllib` statements, in order of appearance
    pub material_libraries: Vec<String>,
}

/// One named object (`o` statement) and its elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjModel {
    pub name: String,
    pub vertices: Vec<Vec3>,
    pub texture_coords: Vec<TextureCoord>,
    pub vertex_normals: Vec<Vec3>,
    pub faces: Vec<Face>,
    pub lines: Vec<Vec<LineVertex>>,
}

impl ObjModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextureCoord {
    pub u: f64,
    pub v: f64,
    pub w: f64,
}

/// A polygon from an `f` statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Face {
    /// Material active at the time (`usemtl`), empty if none
    pub material: String,
    /// Group active at the time (`g`), empty if none
    pub group: String,
    /// Smoothing group active at the time, 0 when off
    pub smoothing_group: u32,
    pub vertices: Vec<FaceVertex>,
}

/// Indices for one polygon corner.
///
/// All indices are 1-based with negative references already resolved.
/// A texture or normal index of 0 means the corner has none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceVertex {
    pub vertex_index: i64,
    pub texture_coords_index: i64,
    pub vertex_normal_index: i64,
}

/// Indices for one polyline point from an `l` statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineVertex {
    pub vertex_index: i64,
    pub texture_coords_index: i64,
}
