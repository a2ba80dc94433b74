//! Canvas
//!
//! Stateful drawing surface. Holds fill, stroke, line width and anchor modes,
//! and turns each shape call into backend path and paint commands.

use std::f64::consts::TAU;

use genpy_color::Color;
use tiny_skia::Transform;

use crate::mode::{convert_mode, AnchorMode, ArcMode};
use crate::{DrawContext, DrawError, LineCap, LineJoin, Result, SkiaContext};

/// Drawing canvas bound to one backend context
///
/// Setters return `&mut Self`; shapes return `Result<&mut Self>` so a sequence
/// of calls chains with `?`:
///
/// ```rust,ignore
/// canvas.fill(Color::rgb(0.0, 0.5, 0.0)).no_stroke();
/// canvas.rect(3.0, 1.0, 1.0, 1.0)?.ellipse(2.0, 2.0, 1.0, 1.0)?;
/// ```
#[derive(Debug)]
pub struct Canvas<C: DrawContext = SkiaContext> {
    ctx: C,
    pixel_size: (u32, u32),
    /// Transform the context had when the canvas was created
    initial_transform: Transform,
    fill_color: Option<Color>,
    stroke_color: Option<Color>,
    line_width: f64,
    rect_mode: AnchorMode,
    ellipse_mode: AnchorMode,
    join: LineJoin,
    cap: LineCap,
}

impl<C: DrawContext> Canvas<C> {
    /// Wrap a context covering `pixel_size` device pixels
    pub fn new(ctx: C, pixel_size: (u32, u32)) -> Self {
        let initial_transform = ctx.transform();
        Self {
            ctx,
            pixel_size,
            initial_transform,
            fill_color: None,
            stroke_color: Some(Color::gray(0.0)),
            line_width: 1.0,
            rect_mode: AnchorMode::Corner,
            ellipse_mode: AnchorMode::Center,
            join: LineJoin::Miter,
            cap: LineCap::Butt,
        }
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        self.pixel_size
    }

    pub fn fill_color(&self) -> Option<Color> {
        self.fill_color
    }

    pub fn stroke_color(&self) -> Option<Color> {
        self.stroke_color
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn current_rect_mode(&self) -> AnchorMode {
        self.rect_mode
    }

    pub fn current_ellipse_mode(&self) -> AnchorMode {
        self.ellipse_mode
    }

    pub fn join(&self) -> LineJoin {
        self.join
    }

    pub fn cap(&self) -> LineCap {
        self.cap
    }

    /// Backend context
    pub fn context(&self) -> &C {
        &self.ctx
    }

    /// Release the backend context
    pub fn into_context(self) -> C {
        self.ctx
    }

    // State

    pub fn fill(&mut self, color: Color) -> &mut Self {
        self.fill_color = Some(color);
        self
    }

    pub fn no_fill(&mut self) -> &mut Self {
        self.fill_color = None;
        self
    }

    pub fn stroke(&mut self, color: Color) -> &mut Self {
        self.stroke_color = Some(color);
        self
    }

    pub fn no_stroke(&mut self) -> &mut Self {
        self.stroke_color = None;
        self
    }

    /// Line width in user units
    ///
    /// A weight of zero or less (or NaN) strokes nothing, as in cairo; fills
    /// are unaffected.
    pub fn stroke_weight(&mut self, weight: f64) -> &mut Self {
        self.line_width = weight;
        self
    }

    pub fn stroke_join(&mut self, join: LineJoin) -> &mut Self {
        self.join = join;
        self
    }

    pub fn stroke_cap(&mut self, cap: LineCap) -> &mut Self {
        self.cap = cap;
        self
    }

    /// Anchor mode for `rect`
    pub fn rect_mode(&mut self, mode: AnchorMode) -> &mut Self {
        self.rect_mode = mode;
        self
    }

    /// Anchor mode for `ellipse` and `arc`
    pub fn ellipse_mode(&mut self, mode: AnchorMode) -> &mut Self {
        self.ellipse_mode = mode;
        self
    }

    // Transforms

    /// Scale user space
    pub fn scale(&mut self, sx: f64, sy: f64) -> &mut Self {
        tracing::trace!("scale({}, {})", sx, sy);
        self.ctx.scale(sx, sy);
        self
    }

    pub fn scale_uniform(&mut self, s: f64) -> &mut Self {
        self.scale(s, s)
    }

    /// Translate user space
    pub fn translate(&mut self, tx: f64, ty: f64) -> &mut Self {
        tracing::trace!("translate({}, {})", tx, ty);
        self.ctx.translate(tx, ty);
        self
    }

    // Painting

    /// Paint the whole surface, ignoring the user-space transform
    pub fn background(&mut self, color: impl Into<Option<Color>>) -> Result<&mut Self> {
        let Some(color) = color.into() else {
            return Ok(self);
        };

        let (width, height) = self.pixel_size;
        tracing::debug!("Background {:?} over {}x{}", color, width, height);
        self.ctx.save();
        self.ctx.set_transform(self.initial_transform);
        self.ctx.rectangle(0.0, 0.0, width as f64, height as f64);
        self.apply_color(&color);
        let filled = self.ctx.fill();
        self.ctx.restore();
        filled?;
        Ok(self)
    }

    /// Straight segment
    pub fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> Result<&mut Self> {
        self.ctx.move_to(x0, y0);
        self.ctx.line_to(x1, y1);
        self.fill_stroke()?;
        Ok(self)
    }

    /// Axis-aligned rectangle, interpreted through the rect mode
    pub fn rect(&mut self, a: f64, b: f64, c: f64, d: f64) -> Result<&mut Self> {
        let (x, y, w, h) = convert_mode(self.rect_mode, a, b, c, d).to_xywh();
        self.ctx.rectangle(x, y, w, h);
        self.fill_stroke()?;
        Ok(self)
    }

    /// Ellipse, interpreted through the ellipse mode
    pub fn ellipse(&mut self, a: f64, b: f64, c: f64, d: f64) -> Result<&mut Self> {
        self.unit_circle_path(a, b, c, d, |ctx| ctx.arc(0.0, 0.0, 1.0, 0.0, TAU));
        self.fill_stroke()?;
        Ok(self)
    }

    /// Elliptical arc from `start` to `end` radians
    ///
    /// Fails with `InvalidArgument` if either angle is not finite.
    #[allow(clippy::too_many_arguments)]
    pub fn arc(
        &mut self,
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        start: f64,
        end: f64,
        mode: ArcMode,
    ) -> Result<&mut Self> {
        if !(start.is_finite() && end.is_finite()) {
            return Err(DrawError::InvalidArgument(format!(
                "arc angles must be finite, got {} to {}",
                start, end
            )));
        }

        self.unit_circle_path(a, b, c, d, |ctx| match mode {
            ArcMode::Open => ctx.arc(0.0, 0.0, 1.0, start, end),
            ArcMode::Chord => {
                ctx.arc(0.0, 0.0, 1.0, start, end);
                ctx.close_path();
            }
            ArcMode::Pie => {
                ctx.move_to(0.0, 0.0);
                ctx.arc(0.0, 0.0, 1.0, start, end);
                ctx.close_path();
            }
        });
        self.fill_stroke()?;
        Ok(self)
    }

    pub fn triangle(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<&mut Self> {
        self.polygon(&[(x0, y0), (x1, y1), (x2, y2)], true)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn quad(
        &mut self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
    ) -> Result<&mut Self> {
        self.polygon(&[(x0, y0), (x1, y1), (x2, y2), (x3, y3)], true)
    }

    /// Path through `points`, closed back to the first when `close` is set
    ///
    /// Fails with `InvalidArgument` for an empty list, or a closed shape with
    /// fewer than two points.
    pub fn polygon(&mut self, points: &[(f64, f64)], close: bool) -> Result<&mut Self> {
        let Some((&(x, y), rest)) = points.split_first() else {
            return Err(DrawError::InvalidArgument("polygon needs at least one point".into()));
        };
        if close && rest.is_empty() {
            return Err(DrawError::InvalidArgument(
                "closed polygon needs at least two points".into(),
            ));
        }

        self.ctx.move_to(x, y);
        for &(x, y) in rest {
            self.ctx.line_to(x, y);
        }
        if close {
            self.ctx.close_path();
        }
        self.fill_stroke()?;
        Ok(self)
    }

    /// One user-unit square at `(a, b)` in the stroke color; nothing without a stroke
    pub fn point(&mut self, a: f64, b: f64) -> Result<&mut Self> {
        if let Some(color) = self.stroke_color {
            self.ctx.rectangle(a, b, 1.0, 1.0);
            self.apply_color(&color);
            self.ctx.fill()?;
        }
        Ok(self)
    }

    /// Build a unit-circle path mapped onto the converted ellipse bounds
    fn unit_circle_path(&mut self, a: f64, b: f64, c: f64, d: f64, build: impl FnOnce(&mut C)) {
        let bounds = convert_mode(self.ellipse_mode, a, b, c, d);
        self.ctx.save();
        self.ctx.translate(bounds.cx, bounds.cy);
        self.ctx.scale(bounds.rx, bounds.ry);
        build(&mut self.ctx);
        self.ctx.restore();
    }

    fn apply_color(&mut self, color: &Color) {
        let rgb = color.to_rgb();
        let [r, g, b] = rgb.channels;
        match rgb.alpha {
            Some(a) => self.ctx.set_source_rgba(r, g, b, a),
            None => self.ctx.set_source_rgb(r, g, b),
        }
    }

    /// Paint the current path with the fill and stroke settings
    fn fill_stroke(&mut self) -> Result<()> {
        let stroke_color = self.stroke_color.filter(|_| self.line_width > 0.0);

        if let Some(fill) = self.fill_color {
            self.apply_color(&fill);
            if stroke_color.is_some() {
                self.ctx.fill_preserve()?;
            } else {
                self.ctx.fill()?;
            }
        }

        match stroke_color {
            Some(stroke) => {
                self.ctx.set_line_width(self.line_width);
                self.ctx.set_line_join(self.join);
                self.ctx.set_line_cap(self.cap);
                self.apply_color(&stroke);
                self.ctx.stroke()?;
            }
            None if self.fill_color.is_none() => {
                tracing::trace!("Neither fill nor stroke set, discarding path");
                self.ctx.new_path();
            }
            None => {}
        }
        Ok(())
    }
}

impl Canvas<SkiaContext> {
    /// Canvas over a fresh transparent tiny-skia surface
    pub fn with_size(width: u32, height: u32) -> Result<Self> {
        Ok(Self::new(SkiaContext::new(width, height)?, (width, height)))
    }
}
