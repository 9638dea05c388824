//! Error types for dataset loading, synthesis and export.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::Side;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while working with annotation datasets.
#[derive(Error, Debug)]
pub enum Error {
    /// A selected folder or file does not exist, or lacks an expected subfolder
    #[error("Path not found: {path:?}")]
    MissingPath {
        /// Path that was expected to exist
        path: PathBuf,
    },

    /// A file exists but could not be decoded as an image
    #[error("Failed to decode image {path:?}: {source}")]
    UnreadableImage {
        /// Path of the undecodable file
        path: PathBuf,
        /// Decoder error
        source: image::ImageError,
    },

    /// An operation needs a dataset that was never loaded for this side
    #[error("No dataset loaded for the {side} side")]
    NoDataset {
        /// Side without a dataset
        side: Side,
    },

    /// Two rasters that must line up have different sizes
    #[error("{what} is {found:?} but expected {expected:?}")]
    DimensionMismatch {
        /// Which raster disagreed
        what: String,
        /// Expected (width, height)
        expected: (u32, u32),
        /// Actual (width, height)
        found: (u32, u32),
    },

    /// Malformed color map content
    #[error("Invalid color map: {message}")]
    ColorMap {
        /// Description of the problem
        message: String,
    },

    /// More classes than fit into the 8-bit class channel
    #[error("Color map defines {count} classes, at most 255 fit in the class channel")]
    TooManyClasses {
        /// Number of classes in the color map
        count: usize,
    },

    /// More objects than fit into the 8-bit object channel
    #[error("Dataset has {count} instance masks, at most 255 fit in the object channel")]
    TooManyObjects {
        /// Number of instance masks
        count: usize,
    },

    /// A path was not given and the matching setting is empty
    #[error("No {setting} configured")]
    NotConfigured {
        /// Name of the config setting
        setting: &'static str,
    },

    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    /// Create a missing path error.
    pub fn missing_path(path: impl Into<PathBuf>) -> Self {
        Self::MissingPath { path: path.into() }
    }

    /// Create an unreadable image error.
    pub fn unreadable(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::UnreadableImage {
            path: path.into(),
            source,
        }
    }

    /// Create a color map error with a message.
    pub fn color_map(message: impl Into<String>) -> Self {
        Self::ColorMap {
            message: message.into(),
        }
    }

    /// Whether the user picked (or configured) something that is not there.
    pub fn is_missing_path(&self) -> bool {
        matches!(self, Self::MissingPath { .. } | Self::NotConfigured { .. })
    }
}
