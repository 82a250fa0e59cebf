//! Wavefront OBJ support.
//!
//! Parses the ASCII `.obj` format into [`ObjFile`] values. Only geometry
//! statements are interpreted; material libraries are recorded by name
//! and never opened.
//!
//! ## Supported statements
//!
//! - `o`, `g`, `s`, `usemtl`, `mtllib`
//! - `v`, `vt`, `vn`
//! - `f` (any vertex count, `v`, `v/t`, `v//n`, `v/t/n` forms)
//! - `l`
//!
//! Unknown statements are skipped.

mod parser;
mod types;

use std::path::Path;

pub use parser::*;
pub use types::*;

/// Load and parse an OBJ file from disk.
///
/// The file stem is used as the name of the implicit model that collects
/// elements appearing before any `o` statement.
pub fn load_obj(path: impl AsRef<Path>) -> ParseResult<ObjFile> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let default_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(DEFAULT_MODEL_NAME);

    let file = ObjParser::new(&content, default_name).parse()?;

    log::info!(
        "Parsed {}: {} models, {} faces",
        path.display(),
        file.models.len(),
        file.models.iter().map(|m| m.faces.len()).sum::<usize>()
    );

    Ok(file)
}
