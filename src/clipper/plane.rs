//! Clipping of a single triangle against a single plane.

use crate::math::{Vec3, Vec4};
use crate::triangle::{Texel, Triangle};

/// A plane given by a point on it and a unit normal.
///
/// Points with a non-negative signed distance are inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    /// Builds a plane, normalizing `normal`.
    ///
    /// A zero normal produces a plane whose distances are all NaN, which
    /// classifies every vertex as outside.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p) - self.normal.dot(self.point)
    }

    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        self.signed_distance(p) >= 0.0
    }

    /// Parameter `t` along `start -> end` where the segment meets the plane.
    #[inline]
    pub fn intersect(&self, start: Vec3, end: Vec3) -> f32 {
        let constant = -self.normal.dot(self.point);
        let ds = self.normal.dot(start);
        let de = self.normal.dot(end);
        (-constant - ds) / (de - ds)
    }
}

/// New vertex where the edge `inside -> outside` meets `plane`.
#[inline]
fn split(plane: &Plane, tri: &Triangle, inside: usize, outside: usize) -> (Vec4, Texel) {
    let start = tri.positions[inside];
    let end = tri.positions[outside];
    let t = plane.intersect(start.xyz(), end.xyz());
    (
        start.lerp(end, t),
        tri.texels[inside].lerp(tri.texels[outside], t),
    )
}

/// Clips `tri` against `plane`, returning 0, 1 or 2 triangles.
///
/// - No vertex inside: nothing.
/// - All inside: a copy of `tri`.
/// - One inside: `(in, in->out0, in->out1)`.
/// - Two inside: `(in0, in1, in0->out)` followed by
///   `(in1, in0->out, in1->out)`.
///
/// New vertices interpolate position and texel with the same `t`. Outputs
/// keep the light intensity of `tri`.
pub fn clip_against_plane(plane: &Plane, tri: &Triangle) -> Vec<Triangle> {
    let mut inside = [0usize; 3];
    let mut outside = [0usize; 3];
    let (mut n_in, mut n_out) = (0, 0);

    for (i, p) in tri.positions.iter().enumerate() {
        if plane.contains(p.xyz()) {
            inside[n_in] = i;
            n_in += 1;
        } else {
            outside[n_out] = i;
            n_out += 1;
        }
    }

    match n_in {
        0 => Vec::new(),
        3 => vec![*tri],
        1 => {
            let i0 = inside[0];
            let (p1, t1) = split(plane, tri, i0, outside[0]);
            let (p2, t2) = split(plane, tri, i0, outside[1]);
            let out = Triangle {
                positions: [tri.positions[i0], p1, p2],
                texels: [tri.texels[i0], t1, t2],
                light_intensity: tri.light_intensity,
            };
            vec![out]
        }
        _ => {
            let (i0, i1, o) = (inside[0], inside[1], outside[0]);
            let (pa, ta) = split(plane, tri, i0, o);
            let first = Triangle {
                positions: [tri.positions[i0], tri.positions[i1], pa],
                texels: [tri.texels[i0], tri.texels[i1], ta],
                light_intensity: tri.light_intensity,
            };
            let (pb, tb) = split(plane, tri, i1, o);
            let second = Triangle {
                positions: [tri.positions[i1], first.positions[2], pb],
                texels: [tri.texels[i1], first.texels[2], tb],
                light_intensity: tri.light_intensity,
            };
            vec![first, second]
        }
    }
}
