//! Flat-shaded triangle fill and wireframe lines.
//!
//! The fill uses the edge function algorithm: every pixel center in the
//! triangle's bounding box is tested against the three edges.
//!
//! # Edge Function
//!
//! For an edge from point A to point B, the edge function at point P is:
//!
//! ```text
//! E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
//! ```
//!
//! Dividing by the triangle's signed area turns the three edge values into
//! barycentric weights. A pixel is inside when all three weights are >= 0,
//! which holds for either winding.
//!
//! No depth test is done here; draw order comes from the renderer's
//! back-to-front sort.

use super::Rasterizer;
use crate::color::Rgba;
use crate::material::Material;
use crate::math::Vec4;
use crate::render::framebuffer::FrameBuffer;
use crate::triangle::Triangle;

/// Solid-color rasterizer with an optional wireframe overlay.
///
/// Fill color is `material.color * triangle.light_intensity` per channel,
/// with the material's alpha.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatRasterizer;

impl FlatRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Computes the edge function value for point P relative to edge (A -> B).
    #[inline]
    fn edge_function(a: Vec4, b: Vec4, px: f32, py: f32) -> f32 {
        (px - a.x) * (b.y - a.y) - (py - a.y) * (b.x - a.x)
    }

    /// Fills the triangle with a single color, ignoring the material.
    pub fn fill_solid(&self, triangle: &Triangle, color: Rgba, buffer: &mut FrameBuffer) {
        let [v0, v1, v2] = triangle.positions;

        // Bounding box, clipped to the framebuffer
        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(buffer.width() as i32 - 1);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(0);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(buffer.height() as i32 - 1);

        let area = Self::edge_function(v0, v1, v2.x, v2.y);
        if area.is_nan() || area.abs() < f32::EPSILON {
            return; // Degenerate triangle
        }
        let inv_area = 1.0 / area;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                // Sample at pixel center
                let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);

                let l0 = Self::edge_function(v1, v2, px, py) * inv_area;
                let l1 = Self::edge_function(v2, v0, px, py) * inv_area;
                let l2 = Self::edge_function(v0, v1, px, py) * inv_area;

                if l0 >= 0.0 && l1 >= 0.0 && l2 >= 0.0 {
                    buffer.set_pixel(x, y, color);
                }
            }
        }
    }
}

impl Rasterizer for FlatRasterizer {
    fn fill_triangle(&self, triangle: &Triangle, material: &Material, buffer: &mut FrameBuffer) {
        let color = material.color.scale(triangle.light_intensity);
        self.fill_solid(triangle, color, buffer);
    }
}

/// Draws the three edges of a screen-space triangle.
pub fn draw_wireframe(triangle: &Triangle, color: Rgba, width: u32, buffer: &mut FrameBuffer) {
    let [p0, p1, p2] = triangle.positions.map(|p| (p.x.round() as i32, p.y.round() as i32));
    draw_line(p0, p1, color, width, buffer);
    draw_line(p1, p2, color, width, buffer);
    draw_line(p2, p0, color, width, buffer);
}

/// Draws a line between two points using Bresenham's line algorithm.
///
/// Each step stamps a `width x width` square centered on the line. Widths
/// below 1 are drawn as 1.
///
/// Bresenham's algorithm tracks an "error" term: the distance between the
/// ideal line and the current pixel. For each step along the major axis it
/// decides from the accumulated error whether to also step along the minor
/// axis.
pub fn draw_line(
    (x0, y0): (i32, i32),
    (x1, y1): (i32, i32),
    color: Rgba,
    width: u32,
    buffer: &mut FrameBuffer,
) {
    let width = width.max(1);
    let offset = (width as i32 - 1) / 2;

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();

    // +1 if we're moving in the positive direction, -1 if negative.
    let x_incr_direction = if x0 < x1 { 1 } else { -1 };
    let y_incr_direction = if y0 < y1 { 1 } else { -1 };

    // A positive error favors x movement, negative favors y.
    let mut err = dx - dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        buffer.fill_square(x - offset, y - offset, width, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        // Both conditions can be true, resulting in a diagonal step.
        if e2 > -dy {
            err -= dy;
            x += x_incr_direction;
        }
        if e2 < dx {
            err += dx;
            y += y_incr_direction;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    const W: u32 = 16;
    const H: u32 = 16;

    fn count(color: &[u8], rgba: Rgba) -> usize {
        color
            .chunks_exact(4)
            .filter(|p| *p == rgba.to_array())
            .count()
    }

    fn screen_tri(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> Triangle {
        Triangle::from_points(
            Vec3::new(a.0, a.1, 0.5),
            Vec3::new(b.0, b.1, 0.5),
            Vec3::new(c.0, c.1, 0.5),
        )
    }

    #[test]
    fn fills_with_scaled_material_color() {
        let mut color = vec![0u8; (W * H * 4) as usize];
        let mut depth = vec![0.0; (W * H) as usize];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, W, H).unwrap();

        let tri = screen_tri((0.0, 0.0), (16.0, 0.0), (0.0, 16.0)).with_light_intensity(0.5);
        let material = Material::flat(Rgba::new(200, 100, 50, 128));
        FlatRasterizer::new().fill_triangle(&tri, &material, &mut fb);

        let expected = Rgba::new(100, 50, 25, 128);
        assert_eq!(fb.get_pixel(1, 1), Some(expected));
        assert_eq!(fb.get_pixel(15, 15), Some(Rgba::new(0, 0, 0, 0)));
        // Half of the 256 pixels, give or take the diagonal.
        let filled = count(&color, expected);
        assert!((120..=136).contains(&filled), "filled = {}", filled);
    }

    #[test]
    fn winding_does_not_matter() {
        let mut a = vec![0u8; (W * H * 4) as usize];
        let mut b = a.clone();
        let mut depth = vec![0.0; (W * H) as usize];
        let cw = screen_tri((2.0, 2.0), (14.0, 3.0), (5.0, 13.0));
        let ccw = screen_tri((2.0, 2.0), (5.0, 13.0), (14.0, 3.0));

        let mut fb = FrameBuffer::new(&mut a, &mut depth, W, H).unwrap();
        FlatRasterizer.fill_solid(&cw, Rgba::WHITE, &mut fb);
        let mut fb = FrameBuffer::new(&mut b, &mut depth, W, H).unwrap();
        FlatRasterizer.fill_solid(&ccw, Rgba::WHITE, &mut fb);
        assert_eq!(a, b);
        assert!(count(&a, Rgba::WHITE) > 0);
    }

    #[test]
    fn degenerate_triangle_draws_nothing() {
        let mut color = vec![0u8; (W * H * 4) as usize];
        let mut depth = vec![0.0; (W * H) as usize];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, W, H).unwrap();
        let tri = screen_tri((1.0, 1.0), (5.0, 5.0), (10.0, 10.0));
        FlatRasterizer.fill_solid(&tri, Rgba::WHITE, &mut fb);
        assert_eq!(count(&color, Rgba::WHITE), 0);
    }

    #[test]
    fn horizontal_line_covers_endpoints() {
        let mut color = vec![0u8; (W * H * 4) as usize];
        let mut depth = vec![0.0; (W * H) as usize];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, W, H).unwrap();
        draw_line((2, 5), (9, 5), Rgba::WHITE, 1, &mut fb);
        assert_eq!(fb.get_pixel(2, 5), Some(Rgba::WHITE));
        assert_eq!(fb.get_pixel(9, 5), Some(Rgba::WHITE));
        assert_eq!(count(&color, Rgba::WHITE), 8);
    }

    #[test]
    fn wide_line_stamps_squares() {
        let mut color = vec![0u8; (W * H * 4) as usize];
        let mut depth = vec![0.0; (W * H) as usize];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, W, H).unwrap();
        draw_line((4, 8), (4, 8), Rgba::WHITE, 3, &mut fb);
        assert_eq!(count(&color, Rgba::WHITE), 9);
    }

    #[test]
    fn wireframe_touches_all_vertices() {
        let mut color = vec![0u8; (W * H * 4) as usize];
        let mut depth = vec![0.0; (W * H) as usize];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, W, H).unwrap();
        let tri = screen_tri((1.0, 1.0), (14.0, 2.0), (7.0, 13.0));
        draw_wireframe(&tri, Rgba::rgb(0, 255, 0), 1, &mut fb);
        for (x, y) in [(1, 1), (14, 2), (7, 13)] {
            assert_eq!(fb.get_pixel(x, y), Some(Rgba::rgb(0, 255, 0)));
        }
        // Interior untouched.
        assert_eq!(fb.get_pixel(7, 5), Some(Rgba::new(0, 0, 0, 0)));
    }
}
