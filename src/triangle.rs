use crate::math::{Mat4, Vec3, Vec4};

/// Texture coordinate carried by a vertex.
///
/// `w` starts at 1 and becomes `1 / clip_w` once the triangle has been
/// projected, so that `u / w` and `v / w` recover the perspective-correct
/// coordinate after linear interpolation in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Texel {
    pub u: f32,
    pub v: f32,
    pub w: f32,
}

impl Default for Texel {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Texel {
    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v, w: 1.0 }
    }

    pub const fn with_w(u: f32, v: f32, w: f32) -> Self {
        Self { u, v, w }
    }

    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::with_w(
            self.u + (other.u - self.u) * t,
            self.v + (other.v - self.v) * t,
            self.w + (other.w - self.w) * t,
        )
    }

    /// Divides all three components by `divisor`.
    #[inline]
    pub fn div(self, divisor: f32) -> Self {
        Self::with_w(self.u / divisor, self.v / divisor, self.w / divisor)
    }
}

/// A triangle flowing through the pipeline.
///
/// `positions[i]` pairs with `texels[i]`. Every stage takes a triangle by
/// value or reference and returns a new one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub positions: [Vec4; 3],
    pub texels: [Texel; 3],
    /// Diffuse light factor in `[0, 1]`, applied to the whole triangle.
    pub light_intensity: f32,
}

impl Default for Triangle {
    fn default() -> Self {
        Self::new([Vec4::default(); 3], [Texel::default(); 3])
    }
}

impl Triangle {
    pub fn new(positions: [Vec4; 3], texels: [Texel; 3]) -> Self {
        Self {
            positions,
            texels,
            light_intensity: 1.0,
        }
    }

    /// Triangle from three points with default texels.
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self::new([a.into(), b.into(), c.into()], [Texel::default(); 3])
    }

    pub fn with_light_intensity(mut self, intensity: f32) -> Self {
        self.light_intensity = intensity;
        self
    }

    /// Unit normal of `(v2 - v1) x (v3 - v1)`.
    ///
    /// Collinear vertices give NaN components.
    pub fn surface_normal(&self) -> Vec3 {
        let [a, b, c] = self.positions.map(Vec4::xyz);
        (b - a).cross(c - a).normalize()
    }

    /// Applies `matrix` to every position. Texels and intensity are copied.
    pub fn transform(&self, matrix: &Mat4) -> Self {
        Self {
            positions: self.positions.map(|p| matrix.transform(p)),
            ..*self
        }
    }

    /// Divides each position by its own `w`.
    pub fn perspective_divide(&self) -> Self {
        Self {
            positions: self.positions.map(Vec4::perspective_divide),
            ..*self
        }
    }

    /// Divides each texel by the clip-space `w` of its vertex.
    ///
    /// Must be called on the projected triangle, before the perspective
    /// divide resets `w`.
    pub fn with_texels_over_w(&self) -> Self {
        let mut texels = self.texels;
        for (texel, position) in texels.iter_mut().zip(&self.positions) {
            *texel = texel.div(position.w);
        }
        Self { texels, ..*self }
    }

    /// Maps normalized device coordinates onto a `width x height` pixel grid
    /// with the y axis pointing down.
    pub fn to_screen(&self, width: f32, height: f32) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Self {
            positions: self.positions.map(|p| {
                Vec4::new((1.0 + p.x) * half_w, (-1.0 + p.y) * -half_h, p.z, p.w)
            }),
            ..*self
        }
    }

    pub fn mean_z(&self) -> f32 {
        (self.positions[0].z + self.positions[1].z + self.positions[2].z) / 3.0
    }
}
