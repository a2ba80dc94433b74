//! genpy Image
//!
//! One-call image pipeline: describe the image with an [`ImageRequest`],
//! draw on the [`Canvas`] it hands to a callback, and get PNG pixels back.
//!
//! ```no_run
//! use genpy_image::{make_image, Color, ImageRequest};
//!
//! let request = ImageRequest::new(500, 500)
//!     .logical_width(5.0)
//!     .background(Color::gray(0.8));
//!
//! make_image("square.png", |canvas| {
//!     canvas.fill(Color::rgb(1.0, 0.0, 0.0));
//!     canvas.rect(1.0, 1.0, 1.0, 1.0)?;
//!     Ok(())
//! }, &request)?;
//! # Ok::<(), genpy_image::DrawError>(())
//! ```

mod encode;
pub mod logging;
mod pipeline;
mod request;

pub use encode::encode_png;
pub use logging::{init_logging, LoggingConfig};
pub use pipeline::{make_image, render_image, RenderedImage};
pub use request::{Channels, ImageRequest};

pub use genpy_draw::{
    AnchorMode, ArcMode, Canvas, Color, ColorModel, DrawError, LineCap, LineJoin, Result,
};
