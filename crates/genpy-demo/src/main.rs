//! genpy Demo - renders the geometry samples to PNG files

use std::f64::consts::{FRAC_PI_2, PI};
use std::path::{Path, PathBuf};

use anyhow::Context;
use genpy_color::Color;
use genpy_image::{
    init_logging, make_image, AnchorMode, ArcMode, Canvas, ImageRequest, LineCap, LineJoin,
    LoggingConfig, Result,
};

type Sample = (&'static str, fn(&mut Canvas) -> Result<()>);

const SAMPLES: &[Sample] = &[
    ("geometry-rectangles.png", rectangles),
    ("geometry-ellipses.png", ellipses),
    ("geometry-arcs.png", arcs),
    ("geometry-polygons.png", polygons),
];

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    // Output directory from the command line
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let request = ImageRequest::new(500, 500)
        .logical_width(5.0)
        .background(Color::gray(0.8));

    for (name, draw) in SAMPLES {
        render(&out_dir.join(name), *draw, &request)?;
    }

    tracing::info!("Rendered {} samples into {}", SAMPLES.len(), out_dir.display());
    Ok(())
}

fn render(path: &Path, draw: fn(&mut Canvas) -> Result<()>, request: &ImageRequest) -> anyhow::Result<()> {
    make_image(path, draw, request).with_context(|| format!("rendering {}", path.display()))
}

fn rectangles(c: &mut Canvas) -> Result<()> {
    c.fill(Color::rgb(1.0, 0.0, 0.0)).no_stroke();
    c.rect(1.0, 1.0, 1.0, 1.0)?;

    c.fill(Color::rgb(0.0, 0.5, 0.0));
    c.rect(3.0, 1.0, 1.0, 1.0)?;

    c.no_fill().stroke(Color::rgb(0.0, 0.5, 0.0)).stroke_weight(0.1);
    c.rect(1.0, 3.0, 1.0, 1.0)?;

    c.fill(Color::rgb(0.0, 0.0, 1.0)).stroke(Color::gray(0.0)).stroke_weight(0.2);
    c.rect(3.0, 3.0, 1.0, 1.0)?;
    Ok(())
}

fn ellipses(c: &mut Canvas) -> Result<()> {
    c.fill(Color::hls(0.0, 0.5, 0.8)).no_stroke();
    c.ellipse(1.5, 1.5, 1.0, 1.0)?;

    c.ellipse_mode(AnchorMode::Radius)
        .fill(Color::hls(0.33, 0.5, 0.8))
        .stroke(Color::gray(0.2))
        .stroke_weight(0.05);
    c.ellipse(3.5, 1.5, 0.8, 0.4)?;

    c.ellipse_mode(AnchorMode::Corner).no_fill().stroke(Color::hls(0.66, 0.4, 0.8));
    c.ellipse(1.0, 3.0, 1.0, 1.5)?;

    c.ellipse_mode(AnchorMode::Corners).fill(Color::rgba(1.0, 0.5, 0.0, 0.5)).no_stroke();
    c.ellipse(3.0, 3.0, 4.5, 4.0)?;
    Ok(())
}

fn arcs(c: &mut Canvas) -> Result<()> {
    c.stroke(Color::gray(0.0)).stroke_weight(0.08).stroke_cap(LineCap::Round);
    c.arc(1.5, 1.5, 1.5, 1.5, 0.0, PI * 1.5, ArcMode::Open)?;

    c.fill(Color::rgb(0.2, 0.4, 0.8));
    c.arc(3.5, 1.5, 1.5, 1.5, 0.0, PI, ArcMode::Chord)?;

    c.fill(Color::rgb(0.9, 0.7, 0.1)).stroke_cap(LineCap::Butt);
    c.arc(2.5, 3.5, 1.5, 1.5, -FRAC_PI_2, PI, ArcMode::Pie)?;
    Ok(())
}

fn polygons(c: &mut Canvas) -> Result<()> {
    c.fill(Color::rgb(0.6, 0.1, 0.6)).stroke(Color::gray(0.0)).stroke_weight(0.1);
    c.triangle(0.5, 2.0, 1.5, 0.5, 2.5, 2.0)?;

    c.stroke_join(LineJoin::Round);
    c.quad(3.0, 0.5, 4.5, 0.8, 4.2, 2.0, 2.8, 1.8)?;

    c.no_fill().stroke_join(LineJoin::Bevel);
    c.polygon(&[(0.5, 3.0), (1.5, 4.5), (2.5, 3.0), (3.5, 4.5), (4.5, 3.0)], false)?;

    c.stroke(Color::rgb(1.0, 0.0, 0.0)).stroke_weight(0.1);
    c.point(2.5, 2.5)?;
    Ok(())
}
