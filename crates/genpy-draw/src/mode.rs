//! Anchor modes
//!
//! Rectangles and ellipses take four numbers `a, b, c, d`. The anchor mode
//! decides what they mean; [`convert_mode`] turns them into a center and a
//! pair of radii.

/// How `a, b, c, d` describe a rectangle or ellipse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorMode {
    /// `(a, b)` is the center, `(c, d)` the full width and height
    Center,
    /// `(a, b)` is the center, `(c, d)` the radii
    Radius,
    /// `(a, b)` is a corner, `(c, d)` the width and height
    Corner,
    /// `(a, b)` and `(c, d)` are opposite corners
    Corners,
}

/// Center and radii of a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
}

impl Bounds {
    pub const fn new(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        Self { cx, cy, rx, ry }
    }

    /// Top-left corner, width and height (width/height negative when the radii are)
    pub fn to_xywh(&self) -> (f64, f64, f64, f64) {
        (self.cx - self.rx, self.cy - self.ry, 2.0 * self.rx, 2.0 * self.ry)
    }
}

/// Convert anchor parameters to center and radii
///
/// Radii in [`AnchorMode::Corners`] keep their sign: a second corner above or
/// left of the first gives a negative radius.
pub fn convert_mode(mode: AnchorMode, a: f64, b: f64, c: f64, d: f64) -> Bounds {
    match mode {
        AnchorMode::Radius => Bounds::new(a, b, c, d),
        AnchorMode::Center => Bounds::new(a, b, c / 2.0, d / 2.0),
        AnchorMode::Corners => Bounds::new((a + c) / 2.0, (b + d) / 2.0, (c - a) / 2.0, (d - b) / 2.0),
        AnchorMode::Corner => Bounds::new(a + c / 2.0, b + d / 2.0, c / 2.0, d / 2.0),
    }
}

/// How an arc is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArcMode {
    /// Bare arc
    #[default]
    Open,
    /// Straight line from the end back to the start
    Chord,
    /// Wedge through the center
    Pie,
}
