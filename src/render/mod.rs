//! Pixel output: the frame buffer view, the rasterizers and the per-frame
//! [`Renderer`].

pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{FlatRasterizer, Rasterizer, TexturedRasterizer};
pub use renderer::{FrameStats, Renderer};
