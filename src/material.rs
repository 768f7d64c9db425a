//! Per-model appearance.

use std::sync::Arc;

use crate::color::Rgba;
use crate::texture::Texture;

/// Surface appearance of a model.
///
/// Textures are shared read-only between materials through an [`Arc`].
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Rgba,
    pub texture: Option<Arc<Texture>>,
    pub wireframe: bool,
    /// Side length in pixels of the square stamped at each wireframe step.
    pub wireframe_width: u32,
    pub wireframe_color: Rgba,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Rgba::WHITE,
            texture: None,
            wireframe: false,
            wireframe_width: 1,
            wireframe_color: Rgba::BLACK,
        }
    }
}

impl Material {
    /// Untextured material of a single color.
    pub fn flat(color: Rgba) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// Textured material. The texture is tinted by white, i.e. unchanged.
    pub fn textured(texture: Arc<Texture>) -> Self {
        Self {
            texture: Some(texture),
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Enables the wireframe overlay.
    pub fn with_wireframe(mut self, color: Rgba, width: u32) -> Self {
        self.wireframe = true;
        self.wireframe_color = color;
        self.wireframe_width = width;
        self
    }

    pub fn without_wireframe(mut self) -> Self {
        self.wireframe = false;
        self
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_deref()
    }
}
