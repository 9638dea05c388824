//! Dataset discovery and raster loading.
//!
//! This module provides:
//! - `DatasetLayout`: locates the base image, semantic mask and instance masks
//!   inside a dataset folder
//! - Image decoding helpers that convert files into canonical RGB / gray rasters

mod layout;
mod loader;

pub use layout::{
    DatasetLayout, IMAGE_EXTENSIONS, first_image_file, is_image_file, list_image_files,
};
pub use loader::{file_stem, load_gray, load_rgb};
