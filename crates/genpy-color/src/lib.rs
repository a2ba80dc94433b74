//! genpy Color
//!
//! Immutable colors stored in either the RGB or the HLS model.
//!
//! A color remembers the model it was built in and converts on demand:
//! - `to_rgb` for painting
//! - `to_hls` for color arithmetic
//!
//! Colors built without an explicit model pick up the process-wide default
//! from [`config`] at construction time.

pub mod config;
pub mod hls;

pub use config::{color_mode, default_model, set_default_model, ColorModelGuard};

/// Color model a color's channels are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ColorModel {
    /// Red, green, blue
    #[default]
    Rgb = 1,
    /// Hue, lightness, saturation
    Hls = 2,
}

impl ColorModel {
    pub(crate) fn from_tag(tag: u8) -> Self {
        match tag {
            2 => ColorModel::Hls,
            _ => ColorModel::Rgb,
        }
    }
}

/// Three channels plus optional alpha, in whichever model was asked for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Components {
    pub channels: [f64; 3],
    pub alpha: Option<f64>,
}

impl Components {
    /// Flatten to 3 or 4 values
    pub fn to_vec(&self) -> Vec<f64> {
        let mut values = self.channels.to_vec();
        values.extend(self.alpha);
        values
    }
}

/// A color in the RGB or HLS model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    channels: [f64; 3],
    alpha: Option<f64>,
    model: ColorModel,
}

impl Color {
    /// Build a color from 1, 3 or 4 components
    ///
    /// One value is a gray level, three are channels, four are channels plus
    /// alpha. `model` of `None` captures the current default model.
    pub fn from_components(components: &[f64], model: Option<ColorModel>) -> Result<Self> {
        let (channels, alpha) = match *components {
            [v] => ([v; 3], None),
            [a, b, c] => ([a, b, c], None),
            [a, b, c, alpha] => ([a, b, c], Some(alpha)),
            _ => return Err(ColorError::InvalidArity(components.len())),
        };

        Ok(Self {
            channels,
            alpha,
            model: model.unwrap_or_else(config::default_model),
        })
    }

    /// Gray level replicated to all three channels
    pub fn gray(value: f64) -> Self {
        Self::build([value; 3], None)
    }

    /// Three channels in the default model
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::build([r, g, b], None)
    }

    /// Three channels plus alpha in the default model
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::build([r, g, b], Some(a))
    }

    /// Explicit HLS color, regardless of the default model
    pub fn hls(h: f64, l: f64, s: f64) -> Self {
        Self::build([h, l, s], None).with_model(ColorModel::Hls)
    }

    /// Explicit HLS color with alpha
    pub fn hlsa(h: f64, l: f64, s: f64, a: f64) -> Self {
        Self::build([h, l, s], Some(a)).with_model(ColorModel::Hls)
    }

    fn build(channels: [f64; 3], alpha: Option<f64>) -> Self {
        Self {
            channels,
            alpha,
            model: config::default_model(),
        }
    }

    /// Same channels, read in `model`
    pub fn with_model(mut self, model: ColorModel) -> Self {
        self.model = model;
        self
    }

    /// Model the channels are stored in
    pub fn model(&self) -> ColorModel {
        self.model
    }

    /// Alpha, if one was given
    pub fn alpha(&self) -> Option<f64> {
        self.alpha
    }

    /// Channels converted to RGB, alpha passed through
    pub fn to_rgb(&self) -> Components {
        let channels = match self.model {
            ColorModel::Rgb => self.channels,
            ColorModel::Hls => {
                let [h, l, s] = self.channels;
                let (r, g, b) = hls::hls_to_rgb(h, l, s);
                [r, g, b]
            }
        };
        Components { channels, alpha: self.alpha }
    }

    /// Channels converted to HLS, alpha passed through
    pub fn to_hls(&self) -> Components {
        let channels = match self.model {
            ColorModel::Hls => self.channels,
            ColorModel::Rgb => {
                let [r, g, b] = self.channels;
                let (h, l, s) = hls::rgb_to_hls(r, g, b);
                [h, l, s]
            }
        };
        Components { channels, alpha: self.alpha }
    }
}

impl TryFrom<&[f64]> for Color {
    type Error = ColorError;

    fn try_from(components: &[f64]) -> Result<Self> {
        Self::from_components(components, None)
    }
}

/// Color error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    #[error("Color takes 1, 3 or 4 components, got {0}")]
    InvalidArity(usize),
}

pub type Result<T> = std::result::Result<T, ColorError>;
