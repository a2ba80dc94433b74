//! Backend drawing context
//!
//! The immediate-mode API the canvas drives. Paths are built with the
//! transform in effect when each point is added; painting consumes the path
//! unless the `_preserve` variant is used.

use tiny_skia::Transform;

use crate::{LineCap, LineJoin, Result};

/// Immediate-mode 2D path and paint operations
pub trait DrawContext {
    /// Push transform, source color and stroke settings
    fn save(&mut self);

    /// Pop the most recently saved state; no-op when nothing was saved
    fn restore(&mut self);

    /// Current user-to-device transform
    fn transform(&self) -> Transform;

    /// Replace the current transform
    fn set_transform(&mut self, transform: Transform);

    /// Translate user space; applies before the existing transform
    fn translate(&mut self, tx: f64, ty: f64);

    /// Scale user space; applies before the existing transform
    fn scale(&mut self, sx: f64, sy: f64);

    /// Discard the current path
    fn new_path(&mut self);

    fn move_to(&mut self, x: f64, y: f64);

    fn line_to(&mut self, x: f64, y: f64);

    /// Close the current subpath back to its start
    fn close_path(&mut self);

    /// Circular arc, angles in radians, increasing angle direction
    ///
    /// A line joins the current point (if any) to the start of the arc.
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64);

    /// Closed axis-aligned rectangle subpath
    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn set_source_rgb(&mut self, r: f64, g: f64, b: f64);

    fn set_source_rgba(&mut self, r: f64, g: f64, b: f64, a: f64);

    fn set_line_width(&mut self, width: f64);

    fn set_line_join(&mut self, join: LineJoin);

    fn set_line_cap(&mut self, cap: LineCap);

    /// Fill and discard the path
    fn fill(&mut self) -> Result<()>;

    /// Fill and keep the path
    fn fill_preserve(&mut self) -> Result<()>;

    /// Stroke and discard the path
    fn stroke(&mut self) -> Result<()>;
}
