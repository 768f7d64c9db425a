//! Triangle rasterization algorithms.
//!
//! Two fill strategies, selected per material by the renderer:
//! - [`FlatRasterizer`]: bounding box iteration with barycentric inside tests,
//!   one color per triangle, plus the Bresenham wireframe overlay
//! - [`TexturedRasterizer`]: scanline fill with perspective-correct texture
//!   sampling gated by the depth buffer

mod flat;
mod textured;

pub use flat::{draw_line, draw_wireframe, FlatRasterizer};
pub use textured::TexturedRasterizer;

use super::framebuffer::FrameBuffer;
use crate::material::Material;
use crate::triangle::Triangle;

/// Trait for triangle rasterization algorithms.
///
/// Implementors define how a screen-space triangle is filled into a pixel
/// buffer. The triangle's positions are in pixels; its texels are already
/// divided by clip-space `w` where the implementation needs that.
pub trait Rasterizer {
    /// Fill a triangle into the frame buffer.
    ///
    /// # Arguments
    /// * `triangle` - The screen-space triangle to rasterize
    /// * `material` - Color, texture and wireframe settings
    /// * `buffer` - The frame buffer to draw into
    fn fill_triangle(&self, triangle: &Triangle, material: &Material, buffer: &mut FrameBuffer);
}
