//! Scene description files.
//!
//! A scene file is JSON. It names the camera settings, a table of
//! materials, the objects referencing them, and an optional animation.
//! Vectors are written as `[x, y, z]` arrays.
//!
//! ```json
//! {
//!   "camera": { "image_width": 400, "look_from": [-2, 2, -5] },
//!   "materials": {
//!     "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] }
//!   },
//!   "objects": [
//!     { "type": "sphere", "center": [0, -100.5, -1], "radius": 100, "material": "ground" }
//!   ],
//!   "animation": { "frames": 10, "orbit_degrees": 5 }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lumen_math::{Axis, Color, Point3, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scene file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Camera configuration surface. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Ratio of image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Random samples per pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f64,
    pub look_from: Point3,
    pub look_at: Point3,
    /// Camera-relative "up" direction
    pub vup: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            look_from: Point3::new(0.0, 0.0, -1.0),
            look_at: Point3::ZERO,
            vup: Vec3::Y,
        }
    }
}

/// Surface material parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MaterialDesc {
    Lambertian { albedo: Color },
    Metal { albedo: Color, fuzz: f64 },
    Dielectric { ir: f64 },
}

/// Vertical bounce applied to a sphere between frames.
///
/// Starting upward, the sphere moves by `step` after every shown frame
/// from `start_frame` on. Once its centre reaches `upper` it heads down,
/// and once it reaches `lower` it heads up again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub step: Vec3,
    #[serde(default)]
    pub start_frame: u32,
    pub lower: f64,
    pub upper: f64,
}

impl Motion {
    /// Total displacement of a sphere starting at height `start_y` by the
    /// time `frame` is shown.
    pub fn offset_at(&self, start_y: f64, frame: u32) -> Vec3 {
        let mut offset = Vec3::ZERO;
        let mut ascending = true;

        for shown in 0..frame {
            let y = start_y + offset.y;
            if y >= self.upper {
                ascending = false;
            } else if y <= self.lower {
                ascending = true;
            }

            if shown >= self.start_frame {
                offset += if ascending { self.step } else { -self.step };
            }
        }

        offset
    }
}

/// A scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectDesc {
    Sphere {
        center: Point3,
        radius: f64,
        material: String,
        #[serde(default)]
        motion: Option<Motion>,
    },
    Triangle {
        vertices: [Point3; 3],
        #[serde(default)]
        normals: Option<[Vec3; 3]>,
        material: String,
    },
    Mesh {
        /// OBJ file, relative to the scene file
        path: PathBuf,
        material: String,
        #[serde(default)]
        translation: Vec3,
        #[serde(default = "unit_scale")]
        scale: f64,
    },
}

fn unit_scale() -> f64 {
    1.0
}

/// Frame sequence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Animation {
    pub frames: u32,
    /// Camera orbit per frame, in degrees, applied to `look_from`
    pub orbit_degrees: f64,
    pub orbit_axis: Axis,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            frames: 1,
            orbit_degrees: 0.0,
            orbit_axis: Axis::Y,
        }
    }
}

/// A complete scene file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDesc>,
    #[serde(default)]
    pub objects: Vec<ObjectDesc>,
    #[serde(default)]
    pub animation: Animation,
}

impl SceneDescription {
    /// Parse a scene from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scene file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let scene = Self::from_json_str(&content)?;

        log::info!(
            "Loaded scene {}: {} materials, {} objects, {} frames",
            path.display(),
            scene.materials.len(),
            scene.objects.len(),
            scene.animation.frames
        );

        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_scene_uses_defaults() {
        let scene = SceneDescription::from_json_str("{}").unwrap();

        assert_eq!(scene.camera, CameraSettings::default());
        assert_eq!(scene.camera.image_width, 100);
        assert_eq!(scene.camera.look_from, Point3::new(0.0, 0.0, -1.0));
        assert_eq!(scene.animation.frames, 1);
        assert!(scene.objects.is_empty());
    }

    #[test]
    fn test_full_scene() {
        let json = r#"{
            "camera": { "aspect_ratio": 1.5, "image_width": 30, "vfov": 80 },
            "materials": {
                "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] },
                "gold": { "type": "metal", "albedo": [0.8, 0.6, 0.2], "fuzz": 0.1 },
                "glass": { "type": "dielectric", "ir": 1.5 }
            },
            "objects": [
                { "type": "sphere", "center": [0, -100.5, -1], "radius": 100, "material": "ground" },
                { "type": "triangle", "vertices": [[0,0,0],[1,0,0],[0,1,0]], "material": "gold" },
                { "type": "mesh", "path": "cube.obj", "material": "glass", "scale": 0.8 }
            ],
            "animation": { "frames": 4, "orbit_degrees": 5, "orbit_axis": "x" }
        }"#;
        let scene = SceneDescription::from_json_str(json).unwrap();

        assert_eq!(scene.camera.aspect_ratio, 1.5);
        assert_eq!(scene.camera.image_width, 30);
        // Unspecified fields keep their defaults
        assert_eq!(scene.camera.samples_per_pixel, 10);

        assert_eq!(
            scene.materials["gold"],
            MaterialDesc::Metal {
                albedo: Color::new(0.8, 0.6, 0.2),
                fuzz: 0.1
            }
        );
        assert_eq!(scene.objects.len(), 3);
        match &scene.objects[2] {
            ObjectDesc::Mesh {
                path,
                translation,
                scale,
                ..
            } => {
                assert_eq!(path, &PathBuf::from("cube.obj"));
                assert_eq!(*translation, Vec3::ZERO);
                assert_eq!(*scale, 0.8);
            }
            other => panic!("expected mesh, got {other:?}"),
        }
        assert_eq!(scene.animation.orbit_axis, Axis::X);
    }

    #[test]
    fn test_unknown_object_type_is_rejected() {
        let json = r#"{ "objects": [ { "type": "cone", "material": "x" } ] }"#;
        assert!(matches!(
            SceneDescription::from_json_str(json),
            Err(SceneError::Json(_))
        ));
    }

    #[test]
    fn test_motion_bounces() {
        let motion = Motion {
            step: Vec3::new(0.0, 1.0, 0.0),
            start_frame: 2,
            lower: 0.0,
            upper: 3.0,
        };

        let heights: Vec<f64> = (0..10).map(|f| motion.offset_at(0.0, f).y).collect();
        // Still for the first frames, then up to the top and back down
        assert_eq!(
            heights,
            vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 2.0, 1.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_motion_turns_at_upper_bound() {
        let motion = Motion {
            step: Vec3::new(0.0, 0.2, 0.0),
            start_frame: 21,
            lower: 0.1,
            upper: 2.5,
        };
        let heights: Vec<f64> = (0..100).map(|f| motion.offset_at(0.0, f).y).collect();

        assert!(heights[..=21].iter().all(|&y| y == 0.0));
        assert!((heights[22] - 0.2).abs() < 1e-9);

        // Highest point, then straight back down to the floor
        let peak = heights.iter().cloned().fold(f64::MIN, f64::max);
        assert!((peak - 2.6).abs() < 1e-9);
        assert!((heights[34] - 2.6).abs() < 1e-9);
        assert!((heights[35] - 2.4).abs() < 1e-9);
        assert!(heights[47].abs() < 1e-9);
        assert!((heights[48] - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_motion_frame_zero_is_identity() {
        let motion = Motion {
            step: Vec3::new(0.5, 0.2, 0.0),
            start_frame: 0,
            lower: 0.1,
            upper: 3.0,
        };
        assert_eq!(motion.offset_at(0.0, 0), Vec3::ZERO);
        assert_eq!(motion.offset_at(0.0, 1), Vec3::new(0.5, 0.2, 0.0));
    }
}
