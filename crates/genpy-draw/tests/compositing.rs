//! Fill/stroke compositing tests
//!
//! Drives a canvas over a context that records every backend call, so the
//! exact path and paint sequence can be asserted.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use genpy_draw::*;
use tiny_skia::Transform;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Save,
    Restore,
    SetTransform(Transform),
    Translate(f64, f64),
    Scale(f64, f64),
    NewPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    ClosePath,
    Arc(f64, f64, f64, f64, f64),
    Rectangle(f64, f64, f64, f64),
    SourceRgb(f64, f64, f64),
    SourceRgba(f64, f64, f64, f64),
    LineWidth(f64),
    LineJoin(LineJoin),
    LineCap(LineCap),
    Fill,
    FillPreserve,
    Stroke,
}

#[derive(Debug, Default)]
struct RecordingContext {
    calls: Vec<Call>,
    transform: Transform,
    saved: Vec<Transform>,
}

impl RecordingContext {
    fn starting_at(transform: Transform) -> Self {
        Self { transform, ..Self::default() }
    }
}

impl DrawContext for RecordingContext {
    fn save(&mut self) {
        self.saved.push(self.transform);
        self.calls.push(Call::Save);
    }

    fn restore(&mut self) {
        if let Some(t) = self.saved.pop() {
            self.transform = t;
        }
        self.calls.push(Call::Restore);
    }

    fn transform(&self) -> Transform {
        self.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.calls.push(Call::SetTransform(transform));
    }

    fn translate(&mut self, tx: f64, ty: f64) {
        self.transform = self.transform.pre_translate(tx as f32, ty as f32);
        self.calls.push(Call::Translate(tx, ty));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform = self.transform.pre_scale(sx as f32, sy as f32);
        self.calls.push(Call::Scale(sx, sy));
    }

    fn new_path(&mut self) {
        self.calls.push(Call::NewPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.calls.push(Call::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.calls.push(Call::LineTo(x, y));
    }

    fn close_path(&mut self) {
        self.calls.push(Call::ClosePath);
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        self.calls.push(Call::Arc(cx, cy, radius, start, end));
    }

    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(Call::Rectangle(x, y, width, height));
    }

    fn set_source_rgb(&mut self, r: f64, g: f64, b: f64) {
        self.calls.push(Call::SourceRgb(r, g, b));
    }

    fn set_source_rgba(&mut self, r: f64, g: f64, b: f64, a: f64) {
        self.calls.push(Call::SourceRgba(r, g, b, a));
    }

    fn set_line_width(&mut self, width: f64) {
        self.calls.push(Call::LineWidth(width));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.calls.push(Call::LineJoin(join));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.calls.push(Call::LineCap(cap));
    }

    fn fill(&mut self) -> Result<()> {
        self.calls.push(Call::Fill);
        Ok(())
    }

    fn fill_preserve(&mut self) -> Result<()> {
        self.calls.push(Call::FillPreserve);
        Ok(())
    }

    fn stroke(&mut self) -> Result<()> {
        self.calls.push(Call::Stroke);
        Ok(())
    }
}

fn canvas() -> Canvas<RecordingContext> {
    Canvas::new(RecordingContext::default(), (500, 500))
}

fn green() -> Color {
    Color::rgb(0.0, 0.5, 0.0).with_model(ColorModel::Rgb)
}

fn calls(canvas: Canvas<RecordingContext>) -> Vec<Call> {
    canvas.into_context().calls
}

// ============================================================================
// FILL / STROKE CONTRACT
// ============================================================================

#[test]
fn test_fill_only_rect() {
    let mut c = canvas();
    c.fill(green()).no_stroke();
    c.rect(3.0, 1.0, 1.0, 1.0).unwrap();

    assert_eq!(
        calls(c),
        vec![
            Call::Rectangle(3.0, 1.0, 1.0, 1.0),
            Call::SourceRgb(0.0, 0.5, 0.0),
            Call::Fill,
        ]
    );
}

#[test]
fn test_stroke_only_rect() {
    let mut c = canvas();
    c.no_fill().stroke(green()).stroke_weight(0.1);
    c.rect(3.0, 1.0, 1.0, 1.0).unwrap();

    assert_eq!(
        calls(c),
        vec![
            Call::Rectangle(3.0, 1.0, 1.0, 1.0),
            Call::LineWidth(0.1),
            Call::LineJoin(LineJoin::Miter),
            Call::LineCap(LineCap::Butt),
            Call::SourceRgb(0.0, 0.5, 0.0),
            Call::Stroke,
        ]
    );
}

#[test]
fn test_fill_and_stroke_preserves_path() {
    let mut c = canvas();
    let blue = Color::rgb(0.0, 0.0, 1.0).with_model(ColorModel::Rgb);
    let black = Color::gray(0.0).with_model(ColorModel::Rgb);
    c.fill(blue).stroke(black).stroke_weight(0.2);
    c.rect(3.0, 3.0, 1.0, 1.0).unwrap();

    assert_eq!(
        calls(c),
        vec![
            Call::Rectangle(3.0, 3.0, 1.0, 1.0),
            Call::SourceRgb(0.0, 0.0, 1.0),
            Call::FillPreserve,
            Call::LineWidth(0.2),
            Call::LineJoin(LineJoin::Miter),
            Call::LineCap(LineCap::Butt),
            Call::SourceRgb(0.0, 0.0, 0.0),
            Call::Stroke,
        ]
    );
}

#[test]
fn test_neither_fill_nor_stroke_discards_path() {
    let mut c = canvas();
    c.no_fill().no_stroke();
    c.line(0.0, 0.0, 1.0, 1.0).unwrap();

    assert_eq!(
        calls(c),
        vec![Call::MoveTo(0.0, 0.0), Call::LineTo(1.0, 1.0), Call::NewPath]
    );
}

#[test]
fn test_alpha_uses_rgba_source() {
    let mut c = canvas();
    c.fill(Color::rgba(1.0, 0.0, 0.0, 0.5).with_model(ColorModel::Rgb)).no_stroke();
    c.rect(0.0, 0.0, 1.0, 1.0).unwrap();

    assert!(calls(c).contains(&Call::SourceRgba(1.0, 0.0, 0.0, 0.5)));
}

#[test]
fn test_hls_colors_are_converted_before_painting() {
    let mut c = canvas();
    c.fill(Color::hls(0.0, 0.5, 1.0)).no_stroke();
    c.rect(0.0, 0.0, 1.0, 1.0).unwrap();

    let recorded = calls(c);
    match recorded[1] {
        Call::SourceRgb(r, g, b) => {
            assert!((r - 1.0).abs() < 1e-9 && g.abs() < 1e-9 && b.abs() < 1e-9);
        }
        ref other => panic!("expected a source color, got {:?}", other),
    }
}

#[test]
fn test_join_and_cap_reach_backend() {
    let mut c = canvas();
    c.stroke_join(LineJoin::Bevel).stroke_cap(LineCap::Round);
    c.line(0.0, 0.0, 2.0, 0.0).unwrap();

    let recorded = calls(c);
    assert!(recorded.contains(&Call::LineJoin(LineJoin::Bevel)));
    assert!(recorded.contains(&Call::LineCap(LineCap::Round)));
}

// ============================================================================
// GEOMETRY
// ============================================================================

#[test]
fn test_rect_modes() {
    let mut c = canvas();
    c.no_stroke().fill(green());
    c.rect_mode(AnchorMode::Center).rect(2.0, 2.0, 2.0, 4.0).unwrap();
    c.rect_mode(AnchorMode::Radius).rect(2.0, 2.0, 1.0, 2.0).unwrap();
    c.rect_mode(AnchorMode::Corners).rect(1.0, 0.0, 3.0, 4.0).unwrap();

    let rects: Vec<Call> = calls(c)
        .into_iter()
        .filter(|call| matches!(call, Call::Rectangle(..)))
        .collect();
    assert_eq!(rects, vec![Call::Rectangle(1.0, 0.0, 2.0, 4.0); 3]);
}

#[test]
fn test_ellipse_scales_unit_circle() {
    let mut c = canvas();
    c.no_stroke().fill(green());
    c.ellipse(4.0, 2.0, 3.0, 1.0).unwrap();

    let recorded = calls(c);
    assert_eq!(
        recorded[..5],
        [
            Call::Save,
            Call::Translate(4.0, 2.0),
            Call::Scale(1.5, 0.5),
            Call::Arc(0.0, 0.0, 1.0, 0.0, TAU),
            Call::Restore,
        ]
    );
    assert_eq!(recorded[recorded.len() - 1], Call::Fill);
}

#[test]
fn test_ellipse_leaves_transform_untouched() {
    let start = Transform::from_scale(100.0, 100.0);
    let mut c = Canvas::new(RecordingContext::starting_at(start), (500, 500));
    c.ellipse_mode(AnchorMode::Radius).ellipse(1.0, 1.0, 2.0, 3.0).unwrap();
    assert_eq!(c.context().transform(), start);
}

#[test]
fn test_arc_modes() {
    let path = |mode: ArcMode| {
        let mut c = canvas();
        c.no_stroke().fill(green());
        c.arc(0.0, 0.0, 2.0, 2.0, 0.0, FRAC_PI_2, mode).unwrap();
        let recorded = calls(c);
        // Between save/translate/scale and restore
        recorded[3..recorded.len() - 3].to_vec()
    };

    assert_eq!(path(ArcMode::Open), vec![Call::Arc(0.0, 0.0, 1.0, 0.0, FRAC_PI_2)]);
    assert_eq!(
        path(ArcMode::Chord),
        vec![Call::Arc(0.0, 0.0, 1.0, 0.0, FRAC_PI_2), Call::ClosePath]
    );
    assert_eq!(
        path(ArcMode::Pie),
        vec![
            Call::MoveTo(0.0, 0.0),
            Call::Arc(0.0, 0.0, 1.0, 0.0, FRAC_PI_2),
            Call::ClosePath,
        ]
    );
}

#[test]
fn test_triangle_and_quad_are_closed() {
    let mut c = canvas();
    c.no_stroke().fill(green());
    c.triangle(0.0, 0.0, 1.0, 0.0, 0.0, 1.0).unwrap();
    c.quad(0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0).unwrap();

    let recorded = calls(c);
    assert_eq!(
        recorded[..5],
        [
            Call::MoveTo(0.0, 0.0),
            Call::LineTo(1.0, 0.0),
            Call::LineTo(0.0, 1.0),
            Call::ClosePath,
            Call::SourceRgb(0.0, 0.5, 0.0),
        ]
    );
    assert_eq!(recorded.iter().filter(|c| **c == Call::ClosePath).count(), 2);
    assert_eq!(recorded.iter().filter(|c| matches!(c, Call::LineTo(..))).count(), 5);
}

#[test]
fn test_open_polygon() {
    let mut c = canvas();
    c.polygon(&[(0.0, 0.0), (1.0, 2.0), (3.0, 1.0)], false).unwrap();

    let recorded = calls(c);
    assert!(!recorded.contains(&Call::ClosePath));
    assert_eq!(recorded[..3], [Call::MoveTo(0.0, 0.0), Call::LineTo(1.0, 2.0), Call::LineTo(3.0, 1.0)]);
    assert_eq!(recorded[recorded.len() - 1], Call::Stroke);
}

#[test]
fn test_polygon_rejected_before_touching_backend() {
    let mut c = canvas();
    assert!(matches!(c.polygon(&[(1.0, 1.0)], true), Err(DrawError::InvalidArgument(_))));
    assert!(calls(c).is_empty());
}

// ============================================================================
// POINT / BACKGROUND
// ============================================================================

#[test]
fn test_point_uses_stroke_color() {
    let mut c = canvas();
    c.fill(Color::gray(1.0).with_model(ColorModel::Rgb)).stroke(green());
    c.point(2.0, 3.0).unwrap();

    assert_eq!(
        calls(c),
        vec![
            Call::Rectangle(2.0, 3.0, 1.0, 1.0),
            Call::SourceRgb(0.0, 0.5, 0.0),
            Call::Fill,
        ]
    );
}

#[test]
fn test_point_without_stroke_does_nothing() {
    let mut c = canvas();
    c.fill(green()).no_stroke();
    c.point(2.0, 3.0).unwrap();
    assert!(calls(c).is_empty());
}

#[test]
fn test_background_resets_to_initial_transform() {
    let mut c = canvas();
    c.scale(100.0, 100.0).translate(-1.0, -1.0);
    c.background(Color::gray(0.8).with_model(ColorModel::Rgb)).unwrap();

    let recorded = calls(c);
    assert_eq!(
        recorded[2..],
        [
            Call::Save,
            Call::SetTransform(Transform::identity()),
            Call::Rectangle(0.0, 0.0, 500.0, 500.0),
            Call::SourceRgb(0.8, 0.8, 0.8),
            Call::Fill,
            Call::Restore,
        ]
    );
}

#[test]
fn test_background_none_is_noop() {
    let mut c = canvas();
    c.background(None).unwrap();
    assert!(calls(c).is_empty());
}

#[test]
fn test_background_keeps_user_transform() {
    let mut c = canvas();
    c.scale(2.0, 2.0);
    c.background(Color::gray(0.5)).unwrap();
    assert_eq!(c.context().transform(), Transform::from_scale(2.0, 2.0));
}

#[test]
fn test_negative_arc_angles_are_passed_through() {
    let mut c = canvas();
    c.arc(0.0, 0.0, 2.0, 2.0, PI, -PI / 2.0, ArcMode::Open).unwrap();
    assert!(calls(c).contains(&Call::Arc(0.0, 0.0, 1.0, PI, -PI / 2.0)));
}

#[test]
fn test_non_finite_arc_rejected_before_touching_backend() {
    for (start, end) in [(0.0, f64::NAN), (f64::INFINITY, 1.0), (0.0, f64::NEG_INFINITY)] {
        let mut c = canvas();
        let result = c.arc(0.0, 0.0, 2.0, 2.0, start, end, ArcMode::Pie);
        assert!(matches!(result, Err(DrawError::InvalidArgument(_))));
        assert!(calls(c).is_empty());
    }
}

// ============================================================================
// STROKE WEIGHT
// ============================================================================

#[test]
fn test_zero_weight_stroke_only_discards_path() {
    let mut c = canvas();
    c.no_fill().stroke(green()).stroke_weight(0.0);
    c.rect(0.0, 0.0, 1.0, 1.0).unwrap();

    assert_eq!(calls(c), vec![Call::Rectangle(0.0, 0.0, 1.0, 1.0), Call::NewPath]);
}

#[test]
fn test_zero_weight_with_fill_is_fill_only() {
    let mut c = canvas();
    c.fill(green()).stroke(green()).stroke_weight(0.0);
    c.rect(0.0, 0.0, 1.0, 1.0).unwrap();

    assert_eq!(
        calls(c),
        vec![
            Call::Rectangle(0.0, 0.0, 1.0, 1.0),
            Call::SourceRgb(0.0, 0.5, 0.0),
            Call::Fill,
        ]
    );
}

#[test]
fn test_negative_weight_strokes_nothing() {
    let mut c = canvas();
    c.stroke_weight(-1.0);
    c.line(0.0, 0.0, 1.0, 1.0).unwrap();

    assert!(!calls(c).contains(&Call::Stroke));
}
