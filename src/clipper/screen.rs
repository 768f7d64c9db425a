//! Near-plane and screen-edge clipping.

use std::collections::VecDeque;

use super::plane::{clip_against_plane, Plane};
use crate::error::RenderError;
use crate::math::Vec3;
use crate::triangle::Triangle;

/// Distance of the near clip plane from the eye, in view space.
pub const NEAR_EPSILON: f32 = 0.001;

/// View-space plane just in front of the eye. Anything at `z < NEAR_EPSILON`
/// is outside.
pub fn near_plane() -> Plane {
    Plane::new(
        Vec3::new(0.0, 0.0, NEAR_EPSILON),
        Vec3::new(0.0, 0.0, NEAR_EPSILON),
    )
}

/// Screen-edge planes in clipping order: top, bottom, left, right.
///
/// Coordinates are pixels with the origin at the top-left corner.
pub fn screen_planes(width: f32, height: f32) -> [Plane; 4] {
    [
        Plane::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0)),
        Plane::new(Vec3::new(0.0, height, 0.0), Vec3::new(0.0, -1.0, 0.0)),
        Plane::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)),
        Plane::new(Vec3::new(width, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)),
    ]
}

/// Clips screen-space triangles to the `width x height` viewport.
///
/// Each input triangle is run through a work queue: for every plane, the
/// triangles produced by the previous plane are popped from the front and
/// their clipped pieces pushed to the back, so the next plane only sees
/// what survived this one.
pub fn clip_to_screen(
    triangles: Vec<Triangle>,
    width: f32,
    height: f32,
) -> Result<Vec<Triangle>, RenderError> {
    let planes = screen_planes(width, height);
    let mut clipped = Vec::with_capacity(triangles.len());
    let mut queue = VecDeque::new();

    for tri in triangles {
        queue.clear();
        queue.push_back(tri);
        let mut pending = 1;

        for plane in &planes {
            while pending > 0 {
                let next = queue.pop_front().ok_or(RenderError::ClipQueueUnderflow)?;
                pending -= 1;
                queue.extend(clip_against_plane(plane, &next));
            }
            pending = queue.len();
        }

        clipped.extend(queue.drain(..));
    }

    Ok(clipped)
}
