//! A CPU-based software-rendered 3D graphics pipeline.
//!
//! Meshes, a camera and one directional light go in; an RGBA byte buffer
//! comes out. Everything from the view transform to the per-pixel depth test
//! runs on the CPU.
//!
//! # Quick Start
//!
//! ```no_run
//! use softpipe::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut renderer = Renderer::new(RenderConfig::with_size(800, 600))?;
//! let scene = Scene::new(Light::new(Vec3::FORWARD))
//!     .with_model(Model::new("cube", mesh::cube()).with_material(Material::flat(Rgba::WHITE)));
//! let camera = Camera::new(Vec3::new(0.5, 0.5, -3.0));
//!
//! renderer.render(&scene, &camera)?;
//! let rgba: &[u8] = renderer.pixels();
//! # Ok(())
//! # }
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod clipper;
pub mod color;
pub mod config;
pub mod error;
pub mod light;
pub mod material;
pub mod math;
pub mod mesh;
pub mod model;
pub mod projection;
pub mod render;
pub mod scene;
pub mod texture;
pub mod transform;
pub mod triangle;

// Re-export commonly needed types at crate root for convenience
pub use camera::Camera;
pub use color::Rgba;
pub use config::{RenderConfig, RenderMode};
pub use error::{LoadError, RenderError};
pub use light::Light;
pub use material::Material;
pub use model::Model;
pub use projection::Projection;
pub use render::{FrameStats, Renderer};
pub use scene::Scene;
pub use texture::Texture;
pub use transform::Transform;
pub use triangle::{Texel, Triangle};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softpipe::prelude::*;
/// ```
pub mod prelude {
    // Scene graph
    pub use crate::camera::Camera;
    pub use crate::light::Light;
    pub use crate::material::Material;
    pub use crate::model::Model;
    pub use crate::scene::Scene;
    pub use crate::texture::Texture;
    pub use crate::transform::Transform;

    // Rendering
    pub use crate::color::Rgba;
    pub use crate::config::{RenderConfig, RenderMode};
    pub use crate::render::{FrameStats, Renderer};

    // Geometry
    pub use crate::mesh;
    pub use crate::triangle::{Texel, Triangle};

    // Math
    pub use crate::math::{Mat4, Vec3, Vec4};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{FlatRasterizer, FrameBuffer, Rasterizer, TexturedRasterizer};
    pub use crate::triangle::Triangle;
}
