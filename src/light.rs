//! Lighting types for the renderer.

use crate::error::RenderError;
use crate::math::Vec3;
use crate::triangle::Triangle;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// Directional lights are ideal for simulating distant light sources like the sun,
/// where all rays are effectively parallel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// The direction the light is pointing (not where it comes from).
    pub direction: Vec3,
    /// When false every triangle is lit at full intensity.
    pub enabled: bool,
}

impl Default for Light {
    fn default() -> Self {
        Self::new(Vec3::FORWARD)
    }
}

impl Light {
    /// Create an enabled light pointing in the given direction.
    ///
    /// A zero direction is accepted: the NaN dot product is dropped by
    /// `f32::max`, so every lit triangle goes black. See [`Light::try_new`].
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction,
            enabled: true,
        }
    }

    /// Like [`Light::new`] but rejects a zero-length direction.
    pub fn try_new(direction: Vec3) -> Result<Self, RenderError> {
        direction.try_normalize()?;
        Ok(Self::new(direction))
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Lambertian intensity for a surface normal.
    ///
    /// Returns `max(0, dot(normalize(-direction), normal))`, or 1 when the
    /// light is disabled.
    pub fn intensity_for_normal(&self, normal: Vec3) -> f32 {
        if !self.enabled {
            return 1.0;
        }
        (-self.direction).normalize().dot(normal).max(0.0)
    }

    /// Intensity for a triangle's surface normal.
    pub fn intensity(&self, tri: &Triangle) -> f32 {
        self.intensity_for_normal(tri.surface_normal())
    }
}
