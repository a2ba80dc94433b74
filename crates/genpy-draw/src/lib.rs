//! genpy Draw
//!
//! Stateful drawing canvas over an immediate-mode 2D backend.
//!
//! This crate provides:
//! - Anchor modes and the center/radius conversion
//! - `DrawContext`, the path and paint seam the canvas drives
//! - `SkiaContext`, a `DrawContext` backed by a tiny-skia `Pixmap`
//! - `Canvas` with fill/stroke compositing for lines, rectangles, ellipses,
//!   arcs, polygons and points

mod canvas;
mod context;
mod mode;
mod skia;
mod style;

pub use canvas::Canvas;
pub use context::DrawContext;
pub use mode::{convert_mode, AnchorMode, ArcMode, Bounds};
pub use skia::SkiaContext;
pub use style::{LineCap, LineJoin};

pub use genpy_color::{Color, ColorError, ColorModel};

/// Drawing error
#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, DrawError>;
