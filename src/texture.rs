use std::path::Path;

use crate::color::Rgba;
use crate::error::LoadError;

/// Represents an immutable 2D RGBA texture for texture mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    data: Vec<u8>, // Row-major RGBA bytes, top row first.
    width: u32,
    height: u32,
}

impl Texture {
    /// Wraps an RGBA byte buffer of `width * height * 4` bytes.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, LoadError> {
        if width == 0 || height == 0 || data.len() != width as usize * height as usize * 4 {
            return Err(LoadError::TextureSize {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    // Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let img = image::open(path.as_ref())?.to_rgba8();
        let (width, height) = img.dimensions();
        log::debug!(
            "Loaded texture {} ({}x{})",
            path.as_ref().display(),
            width,
            height
        );
        Self::from_rgba(width, height, img.into_raw())
    }

    /// Texture filled with a single color.
    pub fn solid(width: u32, height: u32, color: Rgba) -> Result<Self, LoadError> {
        let data = color.to_array().repeat(width as usize * height as usize);
        Self::from_rgba(width, height, data)
    }

    /// Sample the texture at UV coordinates using nearest-neighbor filtering.
    ///
    /// # UV Coordinate Convention
    /// - UV coordinates are in [0,1] range
    /// - (0,0) = bottom-left in UV space, but the buffer is stored top-left origin
    /// - V is flipped to correct for this: v_corrected = 1.0 - v
    ///
    /// Coordinates outside [0,1] are clamped to the edge pixels. Use
    /// [`crate::math::wrap_unit`] on the inputs for repeat behavior.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Rgba {
        let x = Self::texel_index(u, self.width);
        let y = Self::texel_index(1.0 - v, self.height);
        let i = (y * self.width as usize + x) * 4;
        Rgba::new(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        )
    }

    #[inline]
    fn texel_index(t: f32, size: u32) -> usize {
        // NaN casts to 0; infinities saturate before the clamp.
        ((t * size as f32).floor() as i64).clamp(0, size as i64 - 1) as usize
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
