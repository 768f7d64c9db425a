//! Perspective-correct textured scanline rasterization.
//!
//! # Algorithm Overview
//!
//! 1. **Sort vertices** by Y coordinate (top to bottom in screen space),
//!    carrying their texels along
//! 2. **Split** at the middle vertex into a top half and a bottom half
//! 3. **Walk** each pixel row: find where the row crosses the long edge
//!    (v0 -> v2) and the short edge of the current half, interpolating x and
//!    the texel along both
//! 4. **Fill** the span between the two crossings, interpolating the texel
//!    across it
//!
//! ```text
//!        v0
//!        /\
//!       /  \
//!      /----\ <- split at v1.y
//!     v1     \
//!       \     \
//!         \    \
//!           \   \
//!             \  \
//!               \ \
//!                v2
//! ```
//!
//! # Perspective Correction
//!
//! Texels arrive as `(u/w, v/w, 1/w)` where `w` is the clip-space depth. These
//! are linear in screen space, so plain interpolation is correct; dividing
//! the interpolated `u` and `v` by the interpolated `w` recovers the true
//! texture coordinate.
//!
//! # Depth
//!
//! The interpolated texel `w` doubles as the depth value: larger is nearer.
//! A pixel is written only when its `w` beats the stored depth.
//!
//! Pixel (x, y) is covered when its center `(x + 0.5, y + 0.5)` lies in
//! `[top, bottom)` vertically and `[left, right)` horizontally, so triangles
//! sharing an edge never both cover a pixel.

use super::Rasterizer;
use crate::color::Rgba;
use crate::material::Material;
use crate::render::framebuffer::FrameBuffer;
use crate::texture::Texture;
use crate::triangle::{Texel, Triangle};

/// Screen-space vertex: position plus perspective-divided texel.
#[derive(Clone, Copy)]
struct Vertex {
    x: f32,
    y: f32,
    texel: Texel,
}

/// Perspective-correct scanline rasterizer with a depth gate.
///
/// Fragment color is `texture(u/w, v/w) * (material / 255) * intensity`,
/// with the texture's alpha. Without a texture the material color scaled by
/// the light intensity is used, still depth tested.
#[derive(Debug, Clone, Copy, Default)]
pub struct TexturedRasterizer;

impl TexturedRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Sorts three vertices by Y coordinate (ascending: top to bottom).
    fn sort_vertices(v: &mut [Vertex; 3]) {
        if v[1].y < v[0].y {
            v.swap(0, 1);
        }
        if v[2].y < v[0].y {
            v.swap(0, 2);
        }
        if v[2].y < v[1].y {
            v.swap(1, 2);
        }
    }

    /// Position and texel where the row at `y` crosses edge `a -> b`.
    #[inline]
    fn edge_at(a: Vertex, b: Vertex, y: f32) -> (f32, Texel) {
        let t = ((y - a.y) / (b.y - a.y)).clamp(0.0, 1.0);
        (a.x + (b.x - a.x) * t, a.texel.lerp(b.texel, t))
    }

    /// Fills the rows whose centers lie in `[y_start, y_end)`. The short edge
    /// is `a -> b`, the long edge `v0 -> v2`.
    fn fill_half<F>(
        long: (Vertex, Vertex),
        short: (Vertex, Vertex),
        y_start: f32,
        y_end: f32,
        buffer: &mut FrameBuffer,
        shade: &F,
    ) where
        F: Fn(Texel) -> Rgba,
    {
        if short.1.y - short.0.y <= 0.0 {
            return; // Flat half, nothing to fill
        }

        let row_start = ((y_start - 0.5).ceil() as i32).max(0);
        let row_end = ((y_end - 0.5).ceil() as i32).min(buffer.height() as i32);

        for y in row_start..row_end {
            let yc = y as f32 + 0.5;
            let (mut ax, mut ta) = Self::edge_at(short.0, short.1, yc);
            let (mut bx, mut tb) = Self::edge_at(long.0, long.1, yc);
            if ax > bx {
                std::mem::swap(&mut ax, &mut bx);
                std::mem::swap(&mut ta, &mut tb);
            }

            let span = bx - ax;
            if span <= 0.0 {
                continue;
            }

            let col_start = ((ax - 0.5).ceil() as i32).max(0);
            let col_end = ((bx - 0.5).ceil() as i32).min(buffer.width() as i32);

            for x in col_start..col_end {
                let t = (x as f32 + 0.5 - ax) / span;
                let texel = ta.lerp(tb, t);
                if buffer.depth_test(x, y, texel.w) {
                    buffer.set_pixel_with_depth(x, y, texel.w, shade(texel));
                }
            }
        }
    }

    fn rasterize<F>(triangle: &Triangle, buffer: &mut FrameBuffer, shade: F)
    where
        F: Fn(Texel) -> Rgba,
    {
        let mut v = [0, 1, 2].map(|i| Vertex {
            x: triangle.positions[i].x,
            y: triangle.positions[i].y,
            texel: triangle.texels[i],
        });
        if v.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return;
        }
        Self::sort_vertices(&mut v);
        let [v0, v1, v2] = v;

        if v2.y - v0.y <= 0.0 {
            return; // Zero height
        }

        Self::fill_half((v0, v2), (v0, v1), v0.y, v1.y, buffer, &shade);
        Self::fill_half((v0, v2), (v1, v2), v1.y, v2.y, buffer, &shade);
    }

    /// Samples `texture` at the perspective-corrected coordinate of `texel`.
    #[inline]
    fn sample(texture: &Texture, texel: Texel, tint: Rgba, intensity: f32) -> Rgba {
        texture
            .sample(texel.u / texel.w, texel.v / texel.w)
            .modulate(tint, intensity)
    }
}

impl Rasterizer for TexturedRasterizer {
    fn fill_triangle(&self, triangle: &Triangle, material: &Material, buffer: &mut FrameBuffer) {
        let intensity = triangle.light_intensity;
        match material.texture() {
            Some(texture) => Self::rasterize(triangle, buffer, |texel| {
                Self::sample(texture, texel, material.color, intensity)
            }),
            None => {
                let color = material.color.scale(intensity);
                Self::rasterize(triangle, buffer, |_| color)
            }
        }
    }
}
