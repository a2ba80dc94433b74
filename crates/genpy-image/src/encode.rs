//! PNG output

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use genpy_draw::{DrawError, Result};
use tiny_skia::Pixmap;

use crate::request::Channels;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Encode `pixmap` as an 8-bit PNG with straight alpha
///
/// `Channels::Rgb` drops the alpha channel.
pub fn encode_png(pixmap: &Pixmap, channels: Channels) -> Result<Vec<u8>> {
    let mut data = Vec::with_capacity(pixmap.pixels().len() * channels.count());
    for pixel in pixmap.pixels() {
        let p = pixel.demultiply();
        data.extend_from_slice(&[p.red(), p.green(), p.blue()]);
        if channels == Channels::Rgba {
            data.push(p.alpha());
        }
    }

    let color_type = match channels {
        Channels::Rgb => png::ColorType::Rgb,
        Channels::Rgba => png::ColorType::Rgba,
    };

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, pixmap.width(), pixmap.height());
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header().map_err(encoding_error)?;
        writer.write_image_data(&data).map_err(encoding_error)?;
        writer.finish().map_err(encoding_error)?;
    }

    tracing::trace!("Encoded {} byte PNG", out.len());
    Ok(out)
}

/// Write `bytes` to a temporary sibling of `path`, then rename it into place
///
/// The temporary file is removed if either step fails.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = temp_sibling(path)?;

    let result = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, path));
    if let Err(e) = result {
        if let Err(cleanup) = fs::remove_file(&tmp) {
            tracing::trace!("No temporary file to remove at {}: {}", tmp.display(), cleanup);
        }
        tracing::warn!("Failed to write {}: {}", path.display(), e);
        return Err(e.into());
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        DrawError::InvalidArgument(format!("output path {} does not name a file", path.display()))
    })?;

    Ok(path.with_file_name(format!(
        ".{}.{}-{}.tmp",
        name.to_string_lossy(),
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    )))
}

fn encoding_error(e: png::EncodingError) -> DrawError {
    match e {
        png::EncodingError::IoError(io) => DrawError::Io(io),
        other => DrawError::Backend(format!("PNG encoding failed: {}", other)),
    }
}
