//! Error types for the pipeline and its loader adapters.

use std::fmt;

/// Errors raised by the rendering core.
///
/// Most invariants in the pipeline are guaranteed by construction. The
/// variants here cover the few places where bad input can reach a public
/// API, plus the internal clip queue invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A matrix constructor received rows/columns that do not form a 4x4 matrix.
    MalformedMatrix { rows: usize, cols: usize },
    /// A checked matrix accessor was given an index outside `0..4`.
    OutOfRange { row: usize, col: usize },
    /// A zero-length vector was passed to a checked normalization.
    ///
    /// The unchecked hot path does not raise this: it yields NaN components.
    DegenerateGeometry,
    /// The screen-space clip queue was popped while empty.
    ClipQueueUnderflow,
    /// The renderer was constructed without a usable drawing surface.
    MissingRenderContext,
    /// A color string could not be parsed.
    InvalidColor(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::MalformedMatrix { rows, cols } => {
                write!(f, "Invalid matrix dimensions {}x{}, expected 4x4", rows, cols)
            }
            RenderError::OutOfRange { row, col } => {
                write!(f, "Matrix index ({}, {}) out of range", row, col)
            }
            RenderError::DegenerateGeometry => write!(f, "Cannot normalize a zero-length vector"),
            RenderError::ClipQueueUnderflow => write!(f, "Cannot clip from an empty triangle queue"),
            RenderError::MissingRenderContext => write!(f, "No drawing surface available"),
            RenderError::InvalidColor(s) => write!(f, "Invalid color '{}'", s),
        }
    }
}

impl std::error::Error for RenderError {}

/// Errors from the mesh, texture and config loaders.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Obj(tobj::LoadError),
    Image(image::ImageError),
    Config(ron::error::SpannedError),
    /// The file parsed but contained no triangles.
    EmptyMesh,
    /// Pixel data does not match the stated texture size.
    TextureSize { width: u32, height: u32, len: usize },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "IO error: {}", e),
            LoadError::Obj(e) => write!(f, "OBJ error: {}", e),
            LoadError::Image(e) => write!(f, "Image error: {}", e),
            LoadError::Config(e) => write!(f, "Config error: {}", e),
            LoadError::EmptyMesh => write!(f, "Mesh contains no triangles"),
            LoadError::TextureSize { width, height, len } => write!(
                f,
                "Texture of {}x{} needs {} RGBA bytes, got {}",
                width,
                height,
                *width as usize * *height as usize * 4,
                len
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Obj(e) => Some(e),
            LoadError::Image(e) => Some(e),
            LoadError::Config(e) => Some(e),
            LoadError::EmptyMesh | LoadError::TextureSize { .. } => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<tobj::LoadError> for LoadError {
    fn from(e: tobj::LoadError) -> Self {
        LoadError::Obj(e)
    }
}

impl From<image::ImageError> for LoadError {
    fn from(e: image::ImageError) -> Self {
        LoadError::Image(e)
    }
}

impl From<ron::error::SpannedError> for LoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        LoadError::Config(e)
    }
}
