//! 4x4 transformation matrix using the row-vector convention.
//!
//! # Convention
//! - Vectors are **row vectors** on the left: `v * Mat4`
//! - Translation is stored in the **last row**
//! - Transforms chain **left-to-right**: `v * A * B` applies A first, then B
//!
//! # Example
//! ```ignore
//! let world_view = rotation * translation * camera; // rotation applied first
//! let result = vertex * world_view;
//! ```

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;
use crate::error::RenderError;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    /// Builds a matrix from dynamically sized rows.
    ///
    /// Fails with [`RenderError::MalformedMatrix`] unless there are exactly
    /// four rows of exactly four columns each.
    pub fn try_from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self, RenderError> {
        if rows.len() != 4 {
            let cols = rows.first().map_or(0, |r| r.as_ref().len());
            return Err(RenderError::MalformedMatrix { rows: rows.len(), cols });
        }

        let mut data = [[0.0f32; 4]; 4];
        for (dst, src) in data.iter_mut().zip(rows) {
            let src = src.as_ref();
            if src.len() != 4 {
                return Err(RenderError::MalformedMatrix {
                    rows: rows.len(),
                    cols: src.len(),
                });
            }
            dst.copy_from_slice(src);
        }
        Ok(Mat4::new(data))
    }

    pub const fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix. The offset lives in the last row.
    pub fn translation(offset: Vec3) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [offset.x, offset.y, offset.z, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis.
    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis.
    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis.
    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a perspective projection matrix.
    ///
    /// Depth is mapped with the `far / (far - near)` form and the output `w`
    /// equals the view-space depth, which the perspective divide consumes.
    ///
    /// # Arguments
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect_ratio` - Height divided by width
    /// * `near`, `far` - Clip distances
    pub fn perspective(fov_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_degrees.to_radians() * 0.5).tan();
        let q = far / (far - near);
        Mat4::new([
            [aspect_ratio * f, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, q, 1.0],
            [0.0, 0.0, -near * q, 0.0],
        ])
    }

    /// Creates the "point-at" matrix that maps world directions onto the
    /// given orthonormal camera basis.
    pub fn point_at(right: Vec3, up: Vec3, forward: Vec3) -> Self {
        Mat4::new([
            [right.x, up.x, forward.x, 0.0],
            [right.y, up.y, forward.y, 0.0],
            [right.z, up.z, forward.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Returns the element at `[row][col]`, bounds-checked.
    pub fn get(&self, row: usize, col: usize) -> Result<f32, RenderError> {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .ok_or(RenderError::OutOfRange { row, col })
    }

    /// Returns a copy of this matrix with `[row][col]` replaced, bounds-checked.
    pub fn with(&self, row: usize, col: usize, value: f32) -> Result<Self, RenderError> {
        if row >= 4 || col >= 4 {
            return Err(RenderError::OutOfRange { row, col });
        }
        let mut data = self.data;
        data[row][col] = value;
        Ok(Mat4::new(data))
    }

    /// Transforms a homogeneous vector: `v * self`.
    #[inline]
    pub fn transform(&self, v: Vec4) -> Vec4 {
        let m = &self.data;
        Vec4::new(
            v.x * m[0][0] + v.y * m[1][0] + v.z * m[2][0] + v.w * m[3][0],
            v.x * m[0][1] + v.y * m[1][1] + v.z * m[2][1] + v.w * m[3][1],
            v.x * m[0][2] + v.y * m[1][2] + v.z * m[2][2] + v.w * m[3][2],
            v.x * m[0][3] + v.y * m[1][3] + v.z * m[2][3] + v.w * m[3][3],
        )
    }

    /// Transforms a direction (w=0), ignoring the translation row.
    pub fn transform_direction(&self, v: Vec3) -> Vec3 {
        self.transform(Vec4::from_vec3(v, 0.0)).xyz()
    }
}

/// Standard row-by-column product. `v * (A * B)` applies A first, then B.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Row vector times matrix.
impl Mul<Mat4> for Vec4 {
    type Output = Vec4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        rhs.transform(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn counting() -> Mat4 {
        Mat4::new([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ])
    }

    #[test]
    fn multiply_is_row_by_column() {
        let expected = Mat4::new([
            [90.0, 100.0, 110.0, 120.0],
            [202.0, 228.0, 254.0, 280.0],
            [314.0, 356.0, 398.0, 440.0],
            [426.0, 484.0, 542.0, 600.0],
        ]);
        assert_eq!(counting() * counting(), expected);
    }

    #[test]
    fn identity_is_neutral() {
        assert_eq!(counting() * Mat4::identity(), counting());
        assert_eq!(Mat4::identity() * counting(), counting());
    }

    #[test]
    fn try_from_rows_rejects_wrong_dimensions() {
        let three_rows: Vec<Vec<f32>> = vec![vec![0.0; 4]; 3];
        assert_eq!(
            Mat4::try_from_rows(&three_rows),
            Err(RenderError::MalformedMatrix { rows: 3, cols: 4 })
        );

        let short_row: Vec<Vec<f32>> = vec![vec![0.0; 4], vec![0.0; 4], vec![0.0; 3], vec![0.0; 4]];
        assert_eq!(
            Mat4::try_from_rows(&short_row),
            Err(RenderError::MalformedMatrix { rows: 4, cols: 3 })
        );
    }

    #[test]
    fn try_from_rows_accepts_4x4() {
        let rows: [[f32; 4]; 4] = [
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ];
        assert_eq!(Mat4::try_from_rows(&rows), Ok(counting()));
    }

    #[test]
    fn checked_access() {
        let m = counting();
        assert_eq!(m.get(2, 3), Ok(12.0));
        assert_eq!(m.get(4, 0), Err(RenderError::OutOfRange { row: 4, col: 0 }));
        assert_eq!(m.get(0, 7), Err(RenderError::OutOfRange { row: 0, col: 7 }));

        let updated = m.with(1, 1, -1.0).unwrap();
        assert_eq!(updated.get(1, 1), Ok(-1.0));
        assert_eq!(m.get(1, 1), Ok(6.0));
        assert!(m.with(0, 4, 0.0).is_err());
    }

    #[test]
    fn translation_moves_points_not_directions() {
        let t = Mat4::translation(Vec3::new(10.0, 20.0, 30.0));
        let p = Vec4::point(1.0, 2.0, 3.0) * t;
        assert_relative_eq!(p, Vec4::point(11.0, 22.0, 33.0));
        assert_eq!(t.transform_direction(Vec3::UP), Vec3::UP);
    }

    #[test]
    fn rotations_are_right_handed_y_up() {
        let x = Vec4::point(1.0, 0.0, 0.0);
        let y = Vec4::point(0.0, 1.0, 0.0);
        let z = Vec4::point(0.0, 0.0, 1.0);

        assert_relative_eq!(y * Mat4::rotation_x(FRAC_PI_2), Vec4::point(0.0, 0.0, 1.0), epsilon = 1e-6);
        assert_relative_eq!(z * Mat4::rotation_y(FRAC_PI_2), Vec4::point(1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(x * Mat4::rotation_z(FRAC_PI_2), Vec4::point(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn zero_rotation_is_identity() {
        let p = Vec4::point(1.5, -2.0, 3.25);
        for m in [Mat4::rotation_x(0.0), Mat4::rotation_y(0.0), Mat4::rotation_z(0.0)] {
            assert_relative_eq!(p * m, p);
        }
    }

    #[test]
    fn projection_outputs_view_depth_as_w() {
        let proj = Mat4::perspective(90.0, 1.0, 0.1, 100.0);
        let p = Vec4::point(0.0, 0.0, 10.0) * proj;
        assert_relative_eq!(p.w, 10.0);

        // At 90 degrees, x == z lands on the right edge after the divide.
        let edge = (Vec4::point(5.0, 0.0, 5.0) * proj).perspective_divide();
        assert_relative_eq!(edge.x, 1.0, epsilon = 1e-6);

        let near = (Vec4::point(0.0, 0.0, 0.1) * proj).perspective_divide();
        let far = (Vec4::point(0.0, 0.0, 100.0) * proj).perspective_divide();
        assert_relative_eq!(near.z, 0.0, epsilon = 1e-6);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-6);
    }
}
