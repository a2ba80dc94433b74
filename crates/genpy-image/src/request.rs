//! Image requests
//!
//! Everything the pipeline needs to set up one surface: pixel size, the
//! logical extent and origin of user space, background and pixel format.

use std::path::Path;

use genpy_color::Color;
use genpy_draw::{Canvas, DrawError, Result};

use crate::pipeline::{self, RenderedImage};

/// Pixel format of the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Channels {
    /// Opaque RGB, surface starts black
    #[default]
    Rgb = 3,
    /// RGB plus alpha, surface starts transparent
    Rgba = 4,
}

impl Channels {
    pub fn count(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Channels {
    type Error = DrawError;

    fn try_from(count: u8) -> Result<Self> {
        match count {
            3 => Ok(Channels::Rgb),
            4 => Ok(Channels::Rgba),
            _ => Err(DrawError::InvalidArgument(format!(
                "channels must be 3 or 4, got {}",
                count
            ))),
        }
    }
}

/// One image to render
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Width of the image in user units
    pub logical_width: Option<f64>,
    /// Height of the image in user units
    pub logical_height: Option<f64>,
    /// User-space coordinates of the top-left corner
    pub origin: (f64, f64),
    pub background: Option<Color>,
    pub channels: Channels,
    pub anti_alias: bool,
}

impl ImageRequest {
    /// Request for a `pixel_width` x `pixel_height` image, one user unit per pixel
    pub fn new(pixel_width: u32, pixel_height: u32) -> Self {
        Self {
            pixel_width,
            pixel_height,
            logical_width: None,
            logical_height: None,
            origin: (0.0, 0.0),
            background: None,
            channels: Channels::Rgb,
            anti_alias: true,
        }
    }

    pub fn logical_width(mut self, width: f64) -> Self {
        self.logical_width = Some(width);
        self
    }

    pub fn logical_height(mut self, height: f64) -> Self {
        self.logical_height = Some(height);
        self
    }

    pub fn origin(mut self, x: f64, y: f64) -> Self {
        self.origin = (x, y);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn channels(mut self, channels: Channels) -> Self {
        self.channels = channels;
        self
    }

    pub fn anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (self.pixel_width, self.pixel_height)
    }

    /// Check pixel and logical sizes are positive
    pub fn validate(&self) -> Result<()> {
        if self.pixel_width == 0 || self.pixel_height == 0 {
            return Err(DrawError::InvalidArgument(format!(
                "pixel size must be positive, got {}x{}",
                self.pixel_width, self.pixel_height
            )));
        }

        for (name, value) in [("width", self.logical_width), ("height", self.logical_height)] {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    return Err(DrawError::InvalidArgument(format!(
                        "logical {} must be positive, got {}",
                        name, v
                    )));
                }
            }
        }
        Ok(())
    }

    /// Logical width and height
    ///
    /// Missing dimensions follow the pixel aspect ratio; with neither given the
    /// logical size is the pixel size.
    pub fn logical_size(&self) -> Result<(f64, f64)> {
        self.validate()?;

        let (pw, ph) = (self.pixel_width as f64, self.pixel_height as f64);
        Ok(match (self.logical_width, self.logical_height) {
            (None, None) => (pw, ph),
            (Some(w), None) => (w, w * ph / pw),
            (None, Some(h)) => (h * pw / ph, h),
            (Some(w), Some(h)) => (w, h),
        })
    }

    /// User-to-pixel scale factors
    pub fn scale(&self) -> Result<(f64, f64)> {
        let (lw, lh) = self.logical_size()?;
        Ok((self.pixel_width as f64 / lw, self.pixel_height as f64 / lh))
    }

    /// Render in memory
    pub fn render<F>(&self, draw: F) -> Result<RenderedImage>
    where
        F: FnOnce(&mut Canvas) -> Result<()>,
    {
        pipeline::render_image(self, draw)
    }

    /// Render and write a PNG to `path`
    pub fn write<F>(&self, path: impl AsRef<Path>, draw: F) -> Result<()>
    where
        F: FnOnce(&mut Canvas) -> Result<()>,
    {
        pipeline::make_image(path, draw, self)
    }
}
