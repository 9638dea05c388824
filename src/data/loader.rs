//! Decoding of dataset rasters.
//!
//! Every raster is converted to one of two canonical layouts: 8-bit RGB for
//! base images and semantic color masks, 8-bit gray for class id masks and
//! instance masks.

use std::path::Path;

use image::{GrayImage, RgbImage};

use crate::error::{Error, Result};

/// Decode an image file as 8-bit RGB.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    if !path.exists() {
        return Err(Error::missing_path(path));
    }
    let img = image::open(path).map_err(|e| Error::unreadable(path, e))?;
    log::trace!("Decoded {:?} as RGB ({}x{})", path, img.width(), img.height());
    Ok(img.to_rgb8())
}

/// Decode an image file as a single 8-bit channel.
pub fn load_gray(path: &Path) -> Result<GrayImage> {
    if !path.exists() {
        return Err(Error::missing_path(path));
    }
    let img = image::open(path).map_err(|e| Error::unreadable(path, e))?;
    log::trace!("Decoded {:?} as gray ({}x{})", path, img.width(), img.height());
    Ok(img.to_luma8())
}

/// File name without its extension, lossily converted to UTF-8.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
