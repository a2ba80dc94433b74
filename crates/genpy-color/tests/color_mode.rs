//! Default color model tests
//!
//! The default model is process-wide, so everything that touches it lives in
//! this single test to keep the harness threads from observing each other.

use genpy_color::*;

#[test]
fn test_default_model_lifecycle() {
    // Starts out as RGB
    assert_eq!(default_model(), ColorModel::Rgb);
    let before = Color::rgb(0.0, 0.5, 1.0);
    assert_eq!(before.model(), ColorModel::Rgb);

    {
        let guard = color_mode(ColorModel::Hls);
        assert_eq!(guard.previous(), ColorModel::Rgb);
        assert_eq!(default_model(), ColorModel::Hls);

        // New colors capture the new default
        let during = Color::gray(0.8);
        assert_eq!(during.model(), ColorModel::Hls);

        // An explicit model still wins
        let explicit = Color::from_components(&[0.8], Some(ColorModel::Rgb)).unwrap();
        assert_eq!(explicit.model(), ColorModel::Rgb);

        // Existing colors are not reinterpreted
        assert_eq!(before.model(), ColorModel::Rgb);
        assert_eq!(before.to_rgb().channels, [0.0, 0.5, 1.0]);

        // Leaving a color built under HLS in scope past the guard
        let kept = Color::rgb(0.0, 0.5, 1.0);
        drop(guard);

        assert_eq!(default_model(), ColorModel::Rgb);
        assert_eq!(kept.model(), ColorModel::Hls);
        let red = kept.to_rgb();
        assert!((red.channels[0] - 1.0).abs() < 1e-9);
        assert!(red.channels[1].abs() < 1e-9);
    }

    // set_default_model reports what it replaced
    assert_eq!(set_default_model(ColorModel::Hls), ColorModel::Rgb);
    assert_eq!(set_default_model(ColorModel::Rgb), ColorModel::Hls);
    assert_eq!(Color::gray(0.5).model(), ColorModel::Rgb);
}
