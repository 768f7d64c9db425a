//! Transform component for models.
//!
//! Provides a [`Transform`] struct with a fluent API for managing position
//! and rotation (Euler angles).

use crate::math::{Mat4, Vec3};

/// A 3D transform with position and rotation (Euler angles).
///
/// Provides a fluent API where mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_position_xyz(0.0, 0.0, 5.0)
///     .rotate_y(0.1)
///     .rotate_x(0.05);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3, // Euler angles in radians around x, y and z
}

impl Transform {
    /// Create a new transform at the origin with no rotation.
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Position ============

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    /// Translate by a delta vector.
    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.position = self.position + delta;
        self
    }

    pub fn translate_x(&mut self, dx: f32) -> &mut Self {
        self.position.x += dx;
        self
    }

    pub fn translate_y(&mut self, dy: f32) -> &mut Self {
        self.position.y += dy;
        self
    }

    pub fn translate_z(&mut self, dz: f32) -> &mut Self {
        self.position.z += dz;
        self
    }

    // ============ Rotation ============

    /// Get the rotation (Euler angles in radians).
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.rotation = rotation;
        self
    }

    pub fn set_rotation_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.rotation = Vec3::new(x, y, z);
        self
    }

    /// Add a delta rotation (Euler angles in radians).
    pub fn rotate(&mut self, delta: Vec3) -> &mut Self {
        self.rotation = self.rotation + delta;
        self
    }

    pub fn rotate_x(&mut self, angle: f32) -> &mut Self {
        self.rotation.x += angle;
        self
    }

    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.rotation.y += angle;
        self
    }

    pub fn rotate_z(&mut self, angle: f32) -> &mut Self {
        self.rotation.z += angle;
        self
    }

    // ============ Matrix Generation ============

    /// Rotation matrix: `RotationZ * (RotationY * RotationX)`.
    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::rotation_z(self.rotation.z)
            * (Mat4::rotation_y(self.rotation.y) * Mat4::rotation_x(self.rotation.x))
    }

    pub fn translation_matrix(&self) -> Mat4 {
        Mat4::translation(self.position)
    }

    /// Model-to-world matrix, rotation applied first and then translation.
    pub fn to_matrix(&self) -> Mat4 {
        self.rotation_matrix() * self.translation_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_default() {
        let t = Transform::default();
        assert_eq!(t.position(), Vec3::ZERO);
        assert_eq!(t.rotation(), Vec3::ZERO);
    }

    #[test]
    fn test_fluent_api() {
        let mut t = Transform::new();
        t.set_position_xyz(1.0, 2.0, 3.0).rotate_y(0.5).rotate_y(0.25);

        assert_eq!(t.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(t.rotation().y, 0.75);
    }

    #[test]
    fn test_translate() {
        let mut t = Transform::new();
        t.set_position_xyz(1.0, 0.0, 0.0).translate_x(2.0).translate_z(-1.0);
        assert_eq!(t.position(), Vec3::new(3.0, 0.0, -1.0));
    }

    #[test]
    fn test_to_matrix_identity() {
        let m = Transform::default().to_matrix();
        assert_eq!(m, Mat4::identity());
    }

    #[test]
    fn rotation_is_applied_before_translation() {
        let mut t = Transform::new();
        t.set_position_xyz(0.0, 0.0, 10.0).rotate_y(FRAC_PI_2);
        let p = t.to_matrix().transform(Vec4::point(0.0, 0.0, 1.0));
        assert_relative_eq!(p, Vec4::point(1.0, 0.0, 10.0), epsilon = 1e-6);
    }

    #[test]
    fn rotation_matrix_composes_z_y_x() {
        let mut t = Transform::new();
        t.set_rotation_xyz(0.3, -1.1, 0.7);
        let expected = Mat4::rotation_z(0.7) * Mat4::rotation_y(-1.1) * Mat4::rotation_x(0.3);
        let p = Vec4::point(1.0, 2.0, 3.0);
        assert_relative_eq!(
            t.rotation_matrix().transform(p),
            expected.transform(p),
            epsilon = 1e-5
        );
    }
}
