//! Image export: layout, rasterization, PNG encoding and saving.

pub mod layout;
pub mod raster;

use chrono::{Datelike, NaiveDate};
use resvg::tiny_skia::Pixmap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use layout::{render_svg, RenderStyle};
pub use raster::Rasterizer;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to parse calendar SVG: {0}")]
    Svg(String),

    #[error("Cannot allocate a {width}x{height} canvas")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("Only {rendered} of {expected} labels could be drawn; no installed font covers them")]
    MissingText { rendered: usize, expected: usize },

    #[error("Rasterization produced a blank image after {attempts} attempts")]
    PlaceholderRaster { attempts: u32 },

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

/// `YYYY-MM-DD.png` for the render date.
pub fn export_filename(date: NaiveDate) -> String {
    format!("{}-{:02}-{:02}.png", date.year(), date.month(), date.day())
}

/// The user's download directory, or the working directory when the platform
/// does not report one.
pub fn default_output_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Encode as 8-bit RGBA PNG. tiny-skia stores premultiplied alpha.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, ExportError> {
    let data: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    let mut bytes = Vec::new();
    let mut encoder = png::Encoder::new(&mut bytes, pixmap.width(), pixmap.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&data)?;
    writer.finish()?;

    Ok(bytes)
}

/// Write `bytes` to `dir/filename`, creating `dir` if needed.
pub fn save_image(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let path = dir.join(filename);
    fs::write(&path, bytes)?;
    Ok(path)
}
