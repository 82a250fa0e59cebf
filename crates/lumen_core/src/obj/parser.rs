//! OBJ (ASCII) file parser.
//!
//! Line-by-line parsing of Wavefront OBJ text. Malformed statements are
//! fatal: the first one aborts the parse with its line number.

use lumen_math::Vec3;
use thiserror::Error;

use super::types::*;

/// Name given to the implicit model when no `o` statement precedes the
/// first element.
pub const DEFAULT_MODEL_NAME: &str = "untitled";

/// Errors that can occur during OBJ parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid number format at line {line}: {value}")]
    InvalidNumber { line: usize, value: String },

    #[error("Face at line {line} uses an invalid vertex index of 0")]
    InvalidIndex { line: usize },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// OBJ file parser.
pub struct ObjParser<'a> {
    content: &'a str,
    default_model_name: String,
    result: ObjFile,
    current_material: String,
    current_group: String,
    smoothing_group: u32,
    current_line: usize,
}

impl<'a> ObjParser<'a> {
    /// Create a new parser over file contents.
    pub fn new(content: &'a str, default_model_name: impl Into<String>) -> Self {
        Self {
            content,
            default_model_name: default_model_name.into(),
            result: ObjFile::default(),
            current_material: String::new(),
            current_group: String::new(),
            smoothing_group: 0,
            current_line: 0,
        }
    }

    /// Parse the whole input.
    ///
    /// Calling this again starts over from the first line.
    pub fn parse(&mut self) -> ParseResult<ObjFile> {
        self.reset();

        let content = self.content;
        for (i, raw) in content.lines().enumerate() {
            self.current_line = i + 1;

            let line = match raw.find('#') {
                Some(idx) => &raw[..idx],
                None => raw,
            };
            let items: Vec<&str> = line.split_whitespace().collect();
            let Some(keyword) = items.first() else {
                continue;
            };

            match keyword.to_ascii_lowercase().as_str() {
                "o" => self.parse_object(&items),
                "g" => self.parse_group(&items)?,
                "v" => self.parse_vertex_coords(&items)?,
                "vt" => self.parse_texture_coords(&items)?,
                "vn" => self.parse_vertex_normal(&items)?,
                "l" => self.parse_line(&items)?,
                "s" => self.parse_smooth_shading(&items)?,
                "f" => self.parse_polygon(&items)?,
                "mtllib" => self.parse_mtllib(&items),
                "usemtl" => self.parse_usemtl(&items),
                _ => {}
            }
        }

        Ok(std::mem::take(&mut self.result))
    }

    fn reset(&mut self) {
        self.result = ObjFile::default();
        self.current_material.clear();
        self.current_group.clear();
        self.smoothing_group = 0;
        self.current_line = 0;
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::Parse {
            line: self.current_line,
            message: message.into(),
        }
    }

    /// The model receiving new elements, created on first use.
    fn current_model(&mut self) -> &mut ObjModel {
        if self.result.models.is_empty() {
            self.result
                .models
                .push(ObjModel::new(self.default_model_name.clone()));
            self.current_group.clear();
            self.smoothing_group = 0;
        }

        // Non-empty: pushed above if it was
        let last = self.result.models.len() - 1;
        &mut self.result.models[last]
    }

    fn parse_object(&mut self, items: &[&str]) {
        let name = items
            .get(1)
            .map(|s| s.to_string())
            .unwrap_or_else(|| self.default_model_name.clone());
        self.result.models.push(ObjModel::new(name));
        self.current_group.clear();
        self.smoothing_group = 0;
    }

    fn parse_group(&mut self, items: &[&str]) -> ParseResult<()> {
        if items.len() != 2 {
            return Err(self.error(
                "Group statements must have exactly 1 argument (eg. g group_1)",
            ));
        }
        self.current_group = items[1].to_string();
        Ok(())
    }

    fn parse_float(&self, item: Option<&&str>) -> ParseResult<f64> {
        match item {
            None => Ok(0.0),
            Some(s) => s.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
                line: self.current_line,
                value: s.to_string(),
            }),
        }
    }

    fn parse_int(&self, s: &str) -> ParseResult<i64> {
        s.parse::<i64>().map_err(|_| ParseError::InvalidNumber {
            line: self.current_line,
            value: s.to_string(),
        })
    }

    /// Parse an optional index slot; missing or empty means "none" (0).
    fn parse_optional_index(&self, values: &[&str], slot: usize) -> ParseResult<i64> {
        match values.get(slot) {
            Some(s) if !s.is_empty() => self.parse_int(s),
            _ => Ok(0),
        }
    }

    fn parse_vec3(&self, items: &[&str]) -> ParseResult<Vec3> {
        Ok(Vec3::new(
            self.parse_float(items.get(1))?,
            self.parse_float(items.get(2))?,
            self.parse_float(items.get(3))?,
        ))
    }

    fn parse_vertex_coords(&mut self, items: &[&str]) -> ParseResult<()> {
        let v = self.parse_vec3(items)?;
        self.current_model().vertices.push(v);
        Ok(())
    }

    fn parse_texture_coords(&mut self, items: &[&str]) -> ParseResult<()> {
        let coord = TextureCoord {
            u: self.parse_float(items.get(1))?,
            v: self.parse_float(items.get(2))?,
            w: self.parse_float(items.get(3))?,
        };
        self.current_model().texture_coords.push(coord);
        Ok(())
    }

    fn parse_vertex_normal(&mut self, items: &[&str]) -> ParseResult<()> {
        let n = self.parse_vec3(items)?;
        self.current_model().vertex_normals.push(n);
        Ok(())
    }

    fn parse_line(&mut self, items: &[&str]) -> ParseResult<()> {
        if items.len() - 1 < 2 {
            return Err(self.error("Line statement has less than 2 vertices"));
        }

        let mut line = Vec::with_capacity(items.len() - 1);
        for vertex in &items[1..] {
            let values: Vec<&str> = vertex.split('/').collect();
            if values.len() > 2 {
                return Err(self.error("Too many values (separated by /) for a single vertex"));
            }

            line.push(LineVertex {
                vertex_index: self.parse_int(values[0])?,
                texture_coords_index: self.parse_optional_index(&values, 1)?,
            });
        }

        self.current_model().lines.push(line);
        Ok(())
    }

    fn parse_polygon(&mut self, items: &[&str]) -> ParseResult<()> {
        if items.len() - 1 < 3 {
            return Err(self.error("Face statement has less than 3 vertices"));
        }

        let mut vertices = Vec::with_capacity(items.len() - 1);
        for vertex in &items[1..] {
            let values: Vec<&str> = vertex.split('/').collect();
            if values.len() > 3 {
                return Err(self.error("Too many values (separated by /) for a single vertex"));
            }

            let vertex_index = self.parse_int(values[0])?;
            if vertex_index == 0 {
                return Err(ParseError::InvalidIndex {
                    line: self.current_line,
                });
            }

            vertices.push(FaceVertex {
                vertex_index,
                texture_coords_index: self.parse_optional_index(&values, 1)?,
                vertex_normal_index: self.parse_optional_index(&values, 2)?,
            });
        }

        let mut face = Face {
            material: self.current_material.clone(),
            group: self.current_group.clone(),
            smoothing_group: self.smoothing_group,
            vertices,
        };

        let model = self.current_model();
        let counts = (
            model.vertices.len(),
            model.texture_coords.len(),
            model.vertex_normals.len(),
        );
        for v in &mut face.vertices {
            v.vertex_index = resolve_relative(v.vertex_index, counts.0);
            v.texture_coords_index = resolve_relative(v.texture_coords_index, counts.1);
            v.vertex_normal_index = resolve_relative(v.vertex_normal_index, counts.2);
        }
        model.faces.push(face);
        Ok(())
    }

    fn parse_mtllib(&mut self, items: &[&str]) {
        if let Some(lib) = items.get(1) {
            self.result.material_libraries.push(lib.to_string());
        }
    }

    fn parse_usemtl(&mut self, items: &[&str]) {
        if let Some(name) = items.get(1) {
            self.current_material = name.to_string();
        }
    }

    fn parse_smooth_shading(&mut self, items: &[&str]) -> ParseResult<()> {
        if items.len() != 2 {
            return Err(self.error(
                "Smoothing group statements must have exactly 1 argument (eg. s <number|off>)",
            ));
        }

        self.smoothing_group = if items[1].eq_ignore_ascii_case("off") {
            0
        } else {
            items[1]
                .parse::<u32>()
                .map_err(|_| ParseError::InvalidNumber {
                    line: self.current_line,
                    value: items[1].to_string(),
                })?
        };
        Ok(())
    }
}

/// Turn a negative OBJ reference into its absolute 1-based index.
fn resolve_relative(index: i64, count: usize) -> i64 {
    if index < 0 {
        count as i64 + 1 + index
    } else {
        index
    }
}
