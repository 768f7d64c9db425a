//! Renderer configuration.
//!
//! Uses RON (Rusty Object Notation) for human-readable config files. Every
//! field is optional in the file and falls back to [`RenderConfig::default`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::LoadError;

/// Rasterization strategy, fixed for the lifetime of a renderer
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Textured materials use the perspective-correct path with the depth
    /// buffer; untextured ones are flat filled.
    #[default]
    Textured,
    /// Every material is flat filled. Textures are ignored.
    Flat,
    /// Only wireframe edges are drawn.
    Wireframe,
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Textured => write!(f, "Textured"),
            RenderMode::Flat => write!(f, "Flat"),
            RenderMode::Wireframe => write!(f, "Wireframe"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub fov_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub background: Rgba,
    pub mode: RenderMode,
    /// When false, triangles facing away from the camera are drawn too.
    pub backface_culling: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fov_degrees: 90.0,
            z_near: 0.1,
            z_far: 100.0,
            background: Rgba::BLACK,
            mode: RenderMode::default(),
            backface_culling: true,
        }
    }
}

impl RenderConfig {
    /// Default configuration for a `width x height` surface.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Load a config from a RON string.
    pub fn from_ron_str(s: &str) -> Result<Self, LoadError> {
        Ok(ron::from_str(s)?)
    }

    /// Load a config from a RON file.
    pub fn from_ron_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Pretty-printed RON for this config.
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .indentor("  ".to_string());
        ron::ser::to_string_pretty(self, config)
    }
}
