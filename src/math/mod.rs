//! Vector and matrix value types.

pub mod mat4;
pub mod vec3;
pub mod vec4;

pub use mat4::Mat4;
pub use vec3::Vec3;
pub use vec4::Vec4;

/// Wraps a texture coordinate into the unit range.
///
/// Negative values map to `1 - (-x mod 1)` and non-negative values to
/// `x mod 1`. Negative whole numbers therefore land on exactly `1.0`, which
/// the texture sampler clamps onto the last row/column.
pub fn wrap_unit(x: f32) -> f32 {
    if x < 0.0 {
        1.0 - (-x % 1.0)
    } else {
        x % 1.0
    }
}
