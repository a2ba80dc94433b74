//! Image pipeline
//!
//! Allocates a surface, maps user space onto it, runs the draw callback once
//! and hands back the pixels. Surface and canvas live only for the duration
//! of one call and are dropped on every exit path, including callback errors.

use std::path::Path;

use genpy_draw::{Canvas, DrawError, Result, SkiaContext};
use tiny_skia::Pixmap;

use crate::encode;
use crate::request::{Channels, ImageRequest};

/// Pixels produced by one request
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pixmap: Pixmap,
    channels: Channels,
}

impl RenderedImage {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight (non-premultiplied) RGBA at `(x, y)`
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let p = self.pixmap.pixel(x, y)?.demultiply();
        Some([p.red(), p.green(), p.blue(), p.alpha()])
    }

    /// PNG bytes in the requested channel layout
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        encode::encode_png(&self.pixmap, self.channels)
    }

    /// Write a PNG, replacing `path` only once the whole file is written
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.encode_png()?;
        encode::write_atomically(path, &bytes)?;
        tracing::info!("Wrote {}x{} image to {}", self.width(), self.height(), path.display());
        Ok(())
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }
}

/// Render `request` in memory, calling `draw` exactly once
pub fn render_image<F>(request: &ImageRequest, draw: F) -> Result<RenderedImage>
where
    F: FnOnce(&mut Canvas) -> Result<()>,
{
    let (logical_width, logical_height) = request.logical_size()?;
    let (width, height) = request.pixel_size();
    let (origin_x, origin_y) = request.origin;

    tracing::debug!(
        "Rendering {}x{} image, logical {}x{} from ({}, {})",
        width,
        height,
        logical_width,
        logical_height,
        origin_x,
        origin_y
    );

    let mut ctx = SkiaContext::new(width, height)?;
    ctx.set_anti_alias(request.anti_alias);
    if request.channels == Channels::Rgb {
        // Opaque surfaces start black; nothing drawn later can make them transparent
        ctx.pixmap_mut().fill(tiny_skia::Color::BLACK);
    }

    let mut canvas = Canvas::new(ctx, (width, height));
    canvas.background(request.background)?;
    canvas
        .scale(width as f64 / logical_width, height as f64 / logical_height)
        .translate(-origin_x, -origin_y);

    draw(&mut canvas)?;

    Ok(RenderedImage {
        pixmap: canvas.into_context().into_pixmap(),
        channels: request.channels,
    })
}

/// Render `request` and write it as a PNG to `path`
///
/// No file is left at `path` if drawing, encoding or writing fails.
pub fn make_image<F>(path: impl AsRef<Path>, draw: F, request: &ImageRequest) -> Result<()>
where
    F: FnOnce(&mut Canvas) -> Result<()>,
{
    let path = path.as_ref();
    if path.file_name().is_none() {
        return Err(DrawError::InvalidArgument(format!(
            "output path {} does not name a file",
            path.display()
        )));
    }

    render_image(request, draw)?.save(path)
}
