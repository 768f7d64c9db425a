//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a safe view into color and depth buffers with bounds-checked access.
//! The depth buffer enables hidden surface removal on the textured path.

use crate::color::Rgba;
use crate::error::RenderError;

/// A view into an RGBA color buffer and a depth buffer.
///
/// Wraps 1D slices with width/height metadata to enable safe 2D pixel access.
/// This is a borrowed view, not an owning type - it's meant to be created
/// temporarily when you need to pass buffers + dimensions together.
///
/// # Depth Buffer
///
/// The depth buffer stores the interpolated texel `w` (proportional to 1/depth)
/// for each pixel. Larger values are closer to the camera; 0 is infinitely far.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u8],
    depth_buffer: &'a mut [f32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from buffer slices and dimensions.
    ///
    /// Fails with [`RenderError::MissingRenderContext`] if the surface is
    /// empty or the slices do not hold `width * height` pixels.
    pub fn new(
        color_buffer: &'a mut [u8],
        depth_buffer: &'a mut [f32],
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let pixels = width as usize * height as usize;
        if pixels == 0 || color_buffer.len() != pixels * 4 || depth_buffer.len() != pixels {
            return Err(RenderError::MissingRenderContext);
        }
        Ok(Self {
            color_buffer,
            depth_buffer,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Fill every pixel with `color`.
    pub fn clear(&mut self, color: Rgba) {
        let rgba = color.to_array();
        for pixel in self.color_buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
    }

    /// Reset all depths to 0.0 (infinitely far).
    pub fn clear_depth(&mut self) {
        self.depth_buffer.fill(0.0);
    }

    /// Set a pixel without depth testing. Silently ignores out-of-bounds
    /// coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.color_buffer[i * 4..i * 4 + 4].copy_from_slice(&color.to_array());
        }
    }

    /// Set a pixel at (x, y) with depth testing.
    ///
    /// The pixel is only written if `depth` is greater than the stored depth
    /// (closer to camera), in which case the stored depth is updated too.
    /// Returns whether the pixel was written.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f32, color: Rgba) -> bool {
        match self.index(x, y) {
            Some(i) if depth > self.depth_buffer[i] => {
                self.depth_buffer[i] = depth;
                self.color_buffer[i * 4..i * 4 + 4].copy_from_slice(&color.to_array());
                true
            }
            _ => false,
        }
    }

    /// Whether `depth` would pass the depth test at (x, y).
    #[inline]
    pub fn depth_test(&self, x: i32, y: i32, depth: f32) -> bool {
        self.index(x, y)
            .is_some_and(|i| depth > self.depth_buffer[i])
    }

    /// Fill a `size x size` square with its top-left corner at (x, y).
    #[inline]
    pub fn fill_square(&mut self, x: i32, y: i32, size: u32, color: Rgba) {
        for dy in 0..size as i32 {
            for dx in 0..size as i32 {
                self.set_pixel(x + dx, y + dy, color);
            }
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|i| {
            let p = &self.color_buffer[i * 4..i * 4 + 4];
            Rgba::new(p[0], p[1], p[2], p[3])
        })
    }

    /// Get the depth at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_depth(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|i| self.depth_buffer[i])
    }
}
