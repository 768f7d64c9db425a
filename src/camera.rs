//! Yaw/pitch camera
//!
//! # Coordinate System
//!
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into screen)
//!
//! # Orientation
//!
//! Orientation is stored as accumulated yaw and pitch angles. The basis
//! vectors are rebuilt from the identity basis whenever an angle changes, so
//! repeated small turns never drift away from orthonormal.
//!
//! - **Pitch**: rotation around X, applied first
//! - **Yaw**: rotation around Y, applied second (positive = look right)

use crate::math::{Mat4, Vec3};
use crate::triangle::Triangle;

/// Camera with a position and a yaw/pitch orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
    pitch: f32, // radians
    yaw: f32,   // radians
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Camera {
    /// Creates a camera at `position` looking along +Z.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            right: Vec3::RIGHT,
            up: Vec3::UP,
            forward: Vec3::FORWARD,
            pitch: 0.0,
            yaw: 0.0,
        }
    }

    // =========================================================================
    // Orientation
    // =========================================================================

    /// Turns the camera around the Y axis by `delta` radians.
    pub fn yaw(&mut self, delta: f32) {
        self.yaw += delta;
        self.update_basis();
    }

    /// Tilts the camera around the X axis by `delta` radians. Not clamped.
    pub fn pitch(&mut self, delta: f32) {
        self.pitch += delta;
        self.update_basis();
    }

    fn update_basis(&mut self) {
        let rotation = Mat4::rotation_x(self.pitch) * Mat4::rotation_y(self.yaw);
        self.right = rotation.transform_direction(Vec3::RIGHT);
        self.up = rotation.transform_direction(Vec3::UP);
        self.forward = rotation.transform_direction(Vec3::FORWARD);
    }

    // =========================================================================
    // Position
    // =========================================================================

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.position = self.position + offset;
    }

    /// Moves along the current forward vector.
    pub fn move_forward(&mut self, distance: f32) {
        self.translate(self.forward * distance);
    }

    /// Moves along the current right vector (strafe).
    pub fn move_right(&mut self, distance: f32) {
        self.translate(self.right * distance);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn yaw_angle(&self) -> f32 {
        self.yaw
    }

    pub fn pitch_angle(&self) -> f32 {
        self.pitch
    }

    // =========================================================================
    // View
    // =========================================================================

    /// World-to-camera transform: `translation(-position) * point_at(basis)`.
    pub fn camera_matrix(&self) -> Mat4 {
        Mat4::translation(-self.position) * Mat4::point_at(self.right, self.up, self.forward)
    }

    /// Backface test on a camera-space triangle.
    ///
    /// Visible when `dot(normal, v1 - forward) < 0`. This compares against
    /// the forward vector rather than the true eye-to-triangle direction, so
    /// it is only exact for triangles near the view axis. A triangle with
    /// collinear vertices has a NaN normal and is never visible.
    pub fn is_visible_tri(&self, tri: &Triangle) -> bool {
        let normal = tri.surface_normal();
        normal.dot(tri.positions[0].xyz() - self.forward) < 0.0
    }
}
