//! Process-wide default color model
//!
//! Colors built without an explicit model capture this value once, at
//! construction. Changing it later never affects existing colors.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::ColorModel;

static DEFAULT_MODEL: AtomicU8 = AtomicU8::new(ColorModel::Rgb as u8);

/// Current default color model
pub fn default_model() -> ColorModel {
    ColorModel::from_tag(DEFAULT_MODEL.load(Ordering::Acquire))
}

/// Replace the default color model, returning the previous one
pub fn set_default_model(model: ColorModel) -> ColorModel {
    let previous = DEFAULT_MODEL.swap(model as u8, Ordering::AcqRel);
    tracing::debug!("Default color model set to {:?}", model);
    ColorModel::from_tag(previous)
}

/// Install `model` as the default until the returned guard is dropped
///
/// ```rust,ignore
/// let _hls = genpy_color::color_mode(ColorModel::Hls);
/// let orange = Color::rgb(0.08, 0.5, 1.0); // read as h, l, s
/// ```
#[must_use = "the previous color model is restored when the guard is dropped"]
pub fn color_mode(model: ColorModel) -> ColorModelGuard {
    ColorModelGuard {
        previous: set_default_model(model),
    }
}

/// Restores the previous default color model on drop
#[derive(Debug)]
pub struct ColorModelGuard {
    previous: ColorModel,
}

impl ColorModelGuard {
    /// Model that will be reinstated
    pub fn previous(&self) -> ColorModel {
        self.previous
    }
}

impl Drop for ColorModelGuard {
    fn drop(&mut self) {
        set_default_model(self.previous);
    }
}
