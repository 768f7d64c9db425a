//! Triangle clipping against planes.
//!
//! - [`plane`]: a point/normal plane and the single-plane triangle clipper.
//! - [`screen`]: the near plane used in view space and the four screen-edge
//!   planes used after the viewport mapping.

pub mod plane;
pub mod screen;

pub use plane::{clip_against_plane, Plane};
pub use screen::{clip_to_screen, near_plane, screen_planes, NEAR_EPSILON};
