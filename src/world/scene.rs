//! Scene description loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::rasterizer::{Camera, Color, Light, Scene, Triangle, Vec3, HEIGHT, WIDTH};
use super::geometry::{build_geometry, SolidKind};
use super::material::{paint, Material};

/// Error type for scene files and image export
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid scene: {0}")]
    InvalidScene(String),
}

fn default_true() -> bool {
    true
}

/// One solid placed in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidDesc {
    pub kind: SolidKind,
    pub center: Vec3,
    pub size: f64,
    pub color: Color,
    /// Draw the base face (if the shape has one) with a darker color
    #[serde(default = "default_true")]
    pub darken_base: bool,
}

impl SolidDesc {
    pub fn tetrahedron(center: Vec3, size: f64, color: Color) -> Self {
        Self {
            kind: SolidKind::Tetrahedron,
            center,
            size,
            color,
            darken_base: true,
        }
    }

    pub fn triangles(&self) -> Vec<Triangle> {
        let material = if self.darken_base {
            Material::new(self.color)
        } else {
            Material::uniform(self.color)
        };
        paint(&build_geometry(self.kind, self.center, self.size), &material)
    }
}

/// Scene file contents: framebuffer size, lighting, initial camera and solids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDesc {
    pub width: usize,
    pub height: usize,
    pub background: Color,
    /// Normalized when the scene is built
    pub light_dir: Vec3,
    #[serde(default)]
    pub camera: Camera,
    pub solids: Vec<SolidDesc>,
}

impl SceneDesc {
    /// Red, green and blue tetrahedra at increasing depth
    pub fn demo() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            background: Color::BLACK,
            light_dir: Vec3::new(0.0, 0.0, 200.0),
            camera: Camera::new(),
            solids: vec![
                SolidDesc::tetrahedron(Vec3::new(0.0, 0.0, 3.0), 100.0, Color::RED),
                SolidDesc::tetrahedron(Vec3::new(2.0, 1.0, 110.0), 80.0, Color::GREEN),
                SolidDesc::tetrahedron(Vec3::new(-1.0, -1.0, 190.0), 60.0, Color::BLUE),
            ],
        }
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::InvalidScene(format!(
                "framebuffer size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// All triangles of all solids, in declaration order
    pub fn triangles(&self) -> Vec<Triangle> {
        self.solids.iter().flat_map(SolidDesc::triangles).collect()
    }

    /// Render context for this description
    pub fn build(&self) -> Scene {
        let mut scene = Scene::new(self.triangles());
        scene.camera = self.camera;
        scene.light = Light::new(self.light_dir);
        scene.background = self.background;
        scene
    }
}

impl Default for SceneDesc {
    fn default() -> Self {
        Self::demo()
    }
}

/// Load a scene from a RON file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneDesc, SceneError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let desc = load_scene_from_str(&contents)?;
    info!(path = %path.display(), solids = desc.solids.len(), "loaded scene");
    Ok(desc)
}

/// Save a scene to a RON file
pub fn save_scene<P: AsRef<Path>>(desc: &SceneDesc, path: P) -> Result<(), SceneError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(desc, config)?;
    fs::write(path.as_ref(), contents)?;
    info!(path = %path.as_ref().display(), "saved scene");
    Ok(())
}

/// Load a scene from a RON string (for embedded scenes or testing)
pub fn load_scene_from_str(s: &str) -> Result<SceneDesc, SceneError> {
    let desc: SceneDesc = ron::from_str(s)?;
    desc.validate()?;
    Ok(desc)
}
