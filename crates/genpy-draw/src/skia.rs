//! tiny-skia drawing context
//!
//! Emulates an immediate-mode path API on top of a tiny-skia `Pixmap`.
//! Points are mapped to device space as they are added, so a transform change
//! after building a path does not move it. Strokes map the path back through
//! the inverse of the transform current at stroke time, which makes line
//! widths user-space lengths.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt;

use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Point, Stroke, Transform};

use crate::{DrawContext, DrawError, LineCap, LineJoin, Result};

const MITER_LIMIT: f32 = 10.0;

#[derive(Debug, Clone, Copy)]
enum Segment {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
    Close,
}

/// Saved with `save`, reinstated with `restore`
#[derive(Debug, Clone, Copy)]
struct GraphicsState {
    transform: Transform,
    source: tiny_skia::Color,
    line_width: f32,
    join: LineJoin,
    cap: LineCap,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            transform: Transform::identity(),
            source: tiny_skia::Color::BLACK,
            line_width: 2.0,
            join: LineJoin::Miter,
            cap: LineCap::Butt,
        }
    }
}

/// Drawing context backed by a tiny-skia pixmap
pub struct SkiaContext {
    pixmap: Pixmap,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
    /// Current path, device space
    path: Vec<Segment>,
    current: Option<Point>,
    subpath_start: Option<Point>,
    anti_alias: bool,
}

impl SkiaContext {
    /// Allocate a transparent surface
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            DrawError::Backend(format!("Failed to allocate {}x{} surface", width, height))
        })?;
        tracing::trace!("Allocated {}x{} pixmap", width, height);
        Ok(Self::from_pixmap(pixmap))
    }

    /// Draw onto an existing pixmap
    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self {
            pixmap,
            state: GraphicsState::default(),
            saved: Vec::new(),
            path: Vec::new(),
            current: None,
            subpath_start: None,
            anti_alias: true,
        }
    }

    /// Toggle anti-aliasing for fills and strokes
    pub fn set_anti_alias(&mut self, anti_alias: bool) {
        self.anti_alias = anti_alias;
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// The surface drawn so far
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Consume the context, keeping the surface
    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Number of saved states
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    /// Whether a path is under construction
    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    fn to_device(&self, x: f64, y: f64) -> Point {
        map_point(&self.state.transform, x, y)
    }

    fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        let p1 = self.to_device(x1, y1);
        let p2 = self.to_device(x2, y2);
        let p3 = self.to_device(x3, y3);
        self.path.push(Segment::CubicTo(p1, p2, p3));
        self.current = Some(p3);
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(self.state.source);
        paint.anti_alias = self.anti_alias;
        paint
    }
}

impl fmt::Debug for SkiaContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkiaContext")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("state", &self.state)
            .field("saved", &self.saved.len())
            .field("segments", &self.path.len())
            .finish()
    }
}

impl DrawContext for SkiaContext {
    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn transform(&self) -> Transform {
        self.state.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.state.transform = transform;
    }

    fn translate(&mut self, tx: f64, ty: f64) {
        self.state.transform = self.state.transform.pre_translate(tx as f32, ty as f32);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.transform = self.state.transform.pre_scale(sx as f32, sy as f32);
    }

    fn new_path(&mut self) {
        self.path.clear();
        self.current = None;
        self.subpath_start = None;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let p = self.to_device(x, y);
        self.path.push(Segment::MoveTo(p));
        self.current = Some(p);
        self.subpath_start = Some(p);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if self.current.is_none() {
            self.move_to(x, y);
            return;
        }
        let p = self.to_device(x, y);
        self.path.push(Segment::LineTo(p));
        self.current = Some(p);
    }

    fn close_path(&mut self) {
        if self.current.is_some() {
            self.path.push(Segment::Close);
            self.current = self.subpath_start;
        }
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        if !(start.is_finite() && end.is_finite()) {
            tracing::warn!("Skipping arc with non-finite angles {} to {}", start, end);
            return;
        }
        let end = unwind_end_angle(start, end);

        let (sx, sy) = (cx + radius * start.cos(), cy + radius * start.sin());
        if self.current.is_some() {
            self.line_to(sx, sy);
        } else {
            self.move_to(sx, sy);
        }

        for [x1, y1, x2, y2, x3, y3] in arc_beziers(cx, cy, radius, start, end) {
            self.cubic_to(x1, y1, x2, y2, x3, y3);
        }
    }

    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.move_to(x, y);
        self.line_to(x + width, y);
        self.line_to(x + width, y + height);
        self.line_to(x, y + height);
        self.close_path();
    }

    fn set_source_rgb(&mut self, r: f64, g: f64, b: f64) {
        self.set_source_rgba(r, g, b, 1.0);
    }

    fn set_source_rgba(&mut self, r: f64, g: f64, b: f64, a: f64) {
        if [r, g, b, a].iter().any(|v| v.is_nan()) {
            tracing::warn!("NaN in source color ({}, {}, {}, {}), painting black", r, g, b, a);
        }
        let channel = |v: f64| v.clamp(0.0, 1.0) as f32;
        self.state.source = tiny_skia::Color::from_rgba(channel(r), channel(g), channel(b), channel(a))
            .unwrap_or(tiny_skia::Color::BLACK);
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width as f32;
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.state.join = join;
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.cap = cap;
    }

    fn fill(&mut self) -> Result<()> {
        let result = self.fill_preserve();
        self.new_path();
        result
    }

    fn fill_preserve(&mut self) -> Result<()> {
        if let Some(path) = build_path(&self.path, None) {
            let paint = self.paint();
            self.pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
        Ok(())
    }

    fn stroke(&mut self) -> Result<()> {
        let segments = std::mem::take(&mut self.path);
        self.new_path();

        let transform = self.state.transform;
        let inverse = transform.invert().ok_or_else(|| {
            DrawError::Backend(format!("Cannot stroke through non-invertible transform {:?}", transform))
        })?;

        if let Some(path) = build_path(&segments, Some(&inverse)) {
            let stroke = Stroke {
                width: self.state.line_width,
                miter_limit: MITER_LIMIT,
                line_cap: self.state.cap.into(),
                line_join: self.state.join.into(),
                dash: None,
            };
            let paint = self.paint();
            self.pixmap.stroke_path(&path, &paint, &stroke, transform, None);
        }
        Ok(())
    }
}

/// Apply an affine transform to a point
fn map_point(ts: &Transform, x: f64, y: f64) -> Point {
    let (sx, kx, ky, sy) = (ts.sx as f64, ts.kx as f64, ts.ky as f64, ts.sy as f64);
    Point::from_xy(
        (x * sx + y * kx + ts.tx as f64) as f32,
        (x * ky + y * sy + ts.ty as f64) as f32,
    )
}

/// Turn recorded segments into a tiny-skia path, optionally remapped
fn build_path(segments: &[Segment], remap: Option<&Transform>) -> Option<Path> {
    let map = |p: Point| match remap {
        Some(ts) => map_point(ts, p.x as f64, p.y as f64),
        None => p,
    };

    let mut pb = PathBuilder::new();
    for segment in segments {
        match *segment {
            Segment::MoveTo(p) => {
                let p = map(p);
                pb.move_to(p.x, p.y);
            }
            Segment::LineTo(p) => {
                let p = map(p);
                pb.line_to(p.x, p.y);
            }
            Segment::CubicTo(p1, p2, p3) => {
                let (p1, p2, p3) = (map(p1), map(p2), map(p3));
                pb.cubic_to(p1.x, p1.y, p2.x, p2.y, p3.x, p3.y);
            }
            Segment::Close => pb.close(),
        }
    }
    pb.finish()
}

/// Raise `end` by whole turns until it is not below `start`
fn unwind_end_angle(start: f64, end: f64) -> f64 {
    if end >= start {
        return end;
    }
    start + (end - start).rem_euclid(TAU)
}

/// Cubic Bézier control points approximating a circular arc
///
/// Each segment spans at most a quarter turn. Returns `[x1, y1, x2, y2, x3, y3]`
/// per segment; the start point is not included. Sweeps beyond one turn drop
/// whole turns until at most two remain, so the end point is unchanged.
fn arc_beziers(cx: f64, cy: f64, radius: f64, start: f64, end: f64) -> Vec<[f64; 6]> {
    let mut sweep = end - start;
    if !sweep.is_finite() || sweep <= 0.0 {
        return Vec::new();
    }
    if sweep > TAU {
        sweep = TAU + sweep % TAU;
    }

    let count = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / count as f64;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    (0..count)
        .map(|i| {
            let a0 = start + step * i as f64;
            let a1 = a0 + step;
            let (sin0, cos0) = a0.sin_cos();
            let (sin1, cos1) = a1.sin_cos();
            [
                cx + radius * (cos0 - k * sin0),
                cy + radius * (sin0 + k * cos0),
                cx + radius * (cos1 + k * sin1),
                cy + radius * (sin1 - k * cos1),
                cx + radius * cos1,
                cy + radius * sin1,
            ]
        })
        .collect()
}
