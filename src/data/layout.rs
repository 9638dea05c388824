//! Dataset folder discovery.
//!
//! A dataset root contains one or more session folders; the first one in
//! directory listing order is used. Each session holds:
//!
//! ```text
//! <session>/
//!   ir/        first image file is the base image
//!   semantic/  first image file is the semantic mask
//!   instance/  one mask per object (optional for interactive loading)
//!   RGB/       synthesized output, created on demand
//! ```

use std::path::{Path, PathBuf};

use crate::constants::{BASE_DIR, INSTANCE_DIR, RGB_OUTPUT_DIR, SEMANTIC_DIR};
use crate::error::{Error, Result};

/// Supported image file extensions.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff", "tif"];

/// Check if a filename has a supported image extension.
pub fn is_image_file(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext)))
}

/// Image files of a directory in listing order.
pub fn list_image_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::missing_path(dir));
    }
    let paths = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .map(|n| is_image_file(&n.to_string_lossy()))
                    .unwrap_or(false)
        })
        .collect();
    Ok(paths)
}

/// First image file of a directory in listing order.
pub fn first_image_file(dir: &Path) -> Result<PathBuf> {
    list_image_files(dir)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::missing_path(dir))
}

/// Resolved file locations of one dataset folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    /// Session folder all other paths live in
    pub session: PathBuf,
    /// Base image path
    pub base: PathBuf,
    /// Semantic mask path
    pub semantic: PathBuf,
    /// Instance mask paths in directory listing order
    pub instances: Vec<PathBuf>,
}

impl DatasetLayout {
    /// First session subfolder of a dataset root.
    pub fn session_dir(root: &Path) -> Result<PathBuf> {
        if !root.is_dir() {
            return Err(Error::missing_path(root));
        }
        std::fs::read_dir(root)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .find(|path| path.is_dir())
            .ok_or_else(|| Error::missing_path(root))
    }

    /// Locate all dataset files under `root`.
    ///
    /// A missing `instance/` folder yields an empty instance list; missing
    /// `ir/` or `semantic/` folders (or empty ones) are errors.
    pub fn discover(root: &Path) -> Result<Self> {
        let session = Self::session_dir(root)?;
        Self::from_session(session)
    }

    /// Locate dataset files inside an already selected session folder.
    pub fn from_session(session: PathBuf) -> Result<Self> {
        let base = first_image_file(&session.join(BASE_DIR))?;
        let semantic = first_image_file(&session.join(SEMANTIC_DIR))?;

        let instance_dir = session.join(INSTANCE_DIR);
        let instances = if instance_dir.is_dir() {
            list_image_files(&instance_dir)?
        } else {
            log::debug!("No instance folder in {:?}", session);
            Vec::new()
        };

        log::info!(
            "📁 Dataset session {:?}: base {:?}, {} instance masks",
            session,
            base.file_name().unwrap_or_default(),
            instances.len()
        );

        Ok(Self {
            session,
            base,
            semantic,
            instances,
        })
    }

    /// Directory holding the instance masks.
    pub fn instance_dir(&self) -> PathBuf {
        self.session.join(INSTANCE_DIR)
    }

    /// Directory receiving synthesized RGB masks.
    pub fn rgb_output_dir(&self) -> PathBuf {
        self.session.join(RGB_OUTPUT_DIR)
    }

    /// Instance mask paths sorted by file name; this order defines object
    /// ids in synthesized RGB masks.
    pub fn sorted_instances(&self) -> Vec<PathBuf> {
        let mut paths = self.instances.clone();
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        paths
    }
}
