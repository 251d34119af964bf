//! # Output Module
//!
//! Writes rendered rasters to disk as 8-bit PNG. The raster is already in
//! display-ready bytes, so no tone mapping or gamma correction is applied.

use std::path::{Path, PathBuf};

use image::ImageResult;
use log::info;
use tricast::raster::Raster;

/// Save the colour channels of `raster` as a PNG file.
///
/// Failures are returned so the caller can decide whether to abort.
pub fn save_raster_as_png(raster: &Raster, output_path: &Path) -> ImageResult<()> {
    raster
        .to_rgb_image()
        .save_with_format(output_path, image::ImageFormat::Png)?;
    info!(
        "Image saved as {} ({}x{})",
        output_path.display(),
        raster.width(),
        raster.height()
    );
    Ok(())
}

/// Path for frame `index` of a sequence: `out.png` becomes `out_0003.png`.
pub fn frame_path(output_path: &Path, index: usize) -> PathBuf {
    let stem = output_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    output_path.with_file_name(format!("{stem}_{index:04}.png"))
}
