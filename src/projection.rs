//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for the
//! perspective parameters (FOV, aspect ratio, near/far planes) and generates
//! the projection matrix from them.

use crate::math::Mat4;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Field of view in degrees.
    fov_degrees: f32,
    /// Aspect ratio (height / width).
    aspect_ratio: f32,
    /// Near clipping plane distance.
    z_near: f32,
    /// Far clipping plane distance.
    z_far: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov_degrees` - Field of view in degrees
    /// * `aspect_ratio` - Height divided by width
    /// * `z_near` - Near plane distance (must be > 0)
    /// * `z_far` - Far plane distance (must be > z_near)
    pub fn new(fov_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_degrees,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// Projection for a `width x height` pixel surface.
    pub fn for_surface(fov_degrees: f32, width: u32, height: u32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_degrees, height as f32 / width as f32, z_near, z_far)
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    /// Returns the aspect ratio (height / width).
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Updates the aspect ratio (typically called on resize).
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Generates the perspective projection matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov_degrees, self.aspect_ratio, self.z_near, self.z_far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn aspect_ratio_is_height_over_width() {
        let proj = Projection::for_surface(90.0, 200, 100, 0.1, 100.0);
        assert_relative_eq!(proj.aspect_ratio(), 0.5);
    }

    #[test]
    fn ninety_degree_fov_maps_edge_to_ndc_one() {
        let proj = Projection::new(90.0, 1.0, 0.1, 100.0);
        let p = proj.matrix().transform(Vec4::point(2.0, -2.0, 2.0));
        assert_relative_eq!(p.w, 2.0);
        let ndc = p.perspective_divide();
        assert_relative_eq!(ndc.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(ndc.y, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn depth_is_zero_at_near_and_one_at_far() {
        let proj = Projection::new(90.0, 1.0, 0.1, 100.0);
        let near = proj.matrix().transform(Vec4::point(0.0, 0.0, 0.1)).perspective_divide();
        let far = proj.matrix().transform(Vec4::point(0.0, 0.0, 100.0)).perspective_divide();
        assert_relative_eq!(near.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-5);
    }
}
