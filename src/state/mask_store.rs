//! Per-side raster storage and region resolution.

use std::path::{Path, PathBuf};

use image::{GrayImage, RgbImage};

use crate::data::{file_stem, load_gray, load_rgb};
use crate::error::Error;
use crate::model::{Region, ResolveMode};

/// One object's mask together with the name it was loaded under.
#[derive(Debug, Clone)]
pub struct InstanceMask {
    /// File stem of the mask file
    pub name: String,
    /// Pixels > 0 belong to the object
    pub mask: GrayImage,
}

impl InstanceMask {
    /// Create a named instance mask.
    pub fn new(name: impl Into<String>, mask: GrayImage) -> Self {
        Self {
            name: name.into(),
            mask,
        }
    }

    /// Whether the object covers the pixel. Out-of-range pixels are uncovered.
    pub fn covers(&self, x: u32, y: u32) -> bool {
        x < self.mask.width() && y < self.mask.height() && self.mask.get_pixel(x, y)[0] > 0
    }
}

/// A file that could not be used during a load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadFailure {
    /// Offending path, or a label for in-memory rasters
    pub path: PathBuf,
    /// Human-readable reason
    pub reason: String,
}

/// Outcome of a (possibly partial) dataset load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Base image present after the load
    pub base_loaded: bool,
    /// Semantic mask present after the load
    pub semantic_loaded: bool,
    /// Number of instance masks kept
    pub instances_loaded: usize,
    /// Everything that was skipped
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// True when nothing was skipped.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, path: impl Into<PathBuf>, reason: impl ToString) {
        let failure = LoadFailure {
            path: path.into(),
            reason: reason.to_string(),
        };
        log::warn!("Skipping {:?}: {}", failure.path, failure.reason);
        self.failures.push(failure);
    }
}

/// Rasters of one side: base image, semantic class mask and instance masks.
///
/// Any field may be absent after a partial load; lookups treat absent data
/// as "nothing there".
#[derive(Debug, Clone, Default)]
pub struct MaskStore {
    base: Option<RgbImage>,
    semantic: Option<GrayImage>,
    instances: Vec<InstanceMask>,
}

impl MaskStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with rasters decoded from disk.
    ///
    /// Unreadable files leave their field empty and are listed in the report.
    pub fn load(&mut self, base: &Path, semantic: &Path, instances: &[PathBuf]) -> LoadReport {
        let mut report = LoadReport::default();

        let base_img = load_rgb(base)
            .map_err(|e| report.fail(base, &e))
            .ok();
        let semantic_img = load_gray(semantic)
            .map_err(|e| report.fail(semantic, &e))
            .ok();
        let instance_masks = instances
            .iter()
            .filter_map(|path| match load_gray(path) {
                Ok(mask) => Some(InstanceMask::new(file_stem(path), mask)),
                Err(e) => {
                    report.fail(path, &e);
                    None
                }
            })
            .collect();

        self.assemble(base_img, semantic_img, instance_masks, &mut report);
        report
    }

    /// Build a store from in-memory rasters, validating dimensions.
    pub fn from_parts(
        base: Option<RgbImage>,
        semantic: Option<GrayImage>,
        instances: Vec<InstanceMask>,
    ) -> (Self, LoadReport) {
        let mut store = Self::new();
        let mut report = LoadReport::default();
        store.assemble(base, semantic, instances, &mut report);
        (store, report)
    }

    /// Install rasters, dropping masks whose size differs from the base image.
    fn assemble(
        &mut self,
        base: Option<RgbImage>,
        semantic: Option<GrayImage>,
        instances: Vec<InstanceMask>,
        report: &mut LoadReport,
    ) {
        let expected = base.as_ref().map(|b| b.dimensions());

        let mismatch = |what: &str, found: (u32, u32)| -> Option<Error> {
            expected
                .filter(|&exp| exp != found)
                .map(|exp| Error::DimensionMismatch {
                    what: what.to_string(),
                    expected: exp,
                    found,
                })
        };

        self.semantic = match semantic {
            Some(mask) => match mismatch("semantic mask", mask.dimensions()) {
                Some(err) => {
                    report.fail("semantic", err);
                    None
                }
                None => Some(mask),
            },
            None => None,
        };

        self.instances = instances
            .into_iter()
            .filter(|inst| match mismatch("instance mask", inst.mask.dimensions()) {
                Some(err) => {
                    report.fail(&inst.name, err);
                    false
                }
                None => true,
            })
            .collect();

        self.base = base;

        report.base_loaded = self.base.is_some();
        report.semantic_loaded = self.semantic.is_some();
        report.instances_loaded = self.instances.len();
    }

    /// Base image, if loaded.
    pub fn base(&self) -> Option<&RgbImage> {
        self.base.as_ref()
    }

    /// Semantic class mask, if loaded.
    pub fn semantic(&self) -> Option<&GrayImage> {
        self.semantic.as_ref()
    }

    /// Instance masks in list order.
    pub fn instances(&self) -> &[InstanceMask] {
        &self.instances
    }

    /// Base image size.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.base.as_ref().map(|b| b.dimensions())
    }

    /// Convert signed coordinates to a pixel inside the base image extent.
    pub fn pixel_at(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        let (w, h) = self.dimensions()?;
        let x = u32::try_from(x).ok().filter(|&x| x < w)?;
        let y = u32::try_from(y).ok().filter(|&y| y < h)?;
        Some((x, y))
    }

    /// Base color at a pixel.
    pub fn color_at(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.base
            .as_ref()
            .filter(|b| x < b.width() && y < b.height())
            .map(|b| b.get_pixel(x, y).0)
    }

    /// Raw semantic value at a pixel.
    pub fn class_at(&self, x: u32, y: u32) -> Option<u8> {
        self.semantic
            .as_ref()
            .filter(|m| x < m.width() && y < m.height())
            .map(|m| m.get_pixel(x, y)[0])
    }

    /// Index of the first instance covering a pixel.
    pub fn first_instance_at(&self, x: u32, y: u32) -> Option<usize> {
        self.instances.iter().position(|inst| inst.covers(x, y))
    }

    /// Resolve the region under a coordinate.
    ///
    /// Coordinates outside the base image always resolve to `Region::None`.
    /// Instance mode never looks at the semantic mask; class mode treats
    /// class 0 as background.
    pub fn resolve(&self, x: i64, y: i64, mode: ResolveMode) -> Region {
        let Some((x, y)) = self.pixel_at(x, y) else {
            return Region::None;
        };

        match mode {
            ResolveMode::Instance => self
                .first_instance_at(x, y)
                .map_or(Region::None, Region::Instance),
            ResolveMode::Class => match self.class_at(x, y) {
                Some(0) | None => Region::None,
                Some(id) => Region::Class(id),
            },
        }
    }

    /// Whether a pixel belongs to a region.
    pub fn region_contains(&self, region: Region, x: u32, y: u32) -> bool {
        match region {
            Region::None => false,
            Region::Class(id) => self.class_at(x, y) == Some(id),
            Region::Instance(index) => self
                .instances
                .get(index)
                .is_some_and(|inst| inst.covers(x, y)),
        }
    }
}
