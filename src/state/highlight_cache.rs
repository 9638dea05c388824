//! Highlighted composites of the base image, memoized per region.
//!
//! Composites are keyed by class id and by instance index in two separate
//! maps. There is no eviction: the number of entries is bounded by the
//! classes and instances of the loaded dataset, and the owning side view
//! clears the cache whenever it loads new rasters.

use std::collections::HashMap;

use image::{Rgb, RgbImage};

use crate::constants::{DEFAULT_CACHE_CEILING, DEFAULT_HIGHLIGHT_ALPHA, DEFAULT_HIGHLIGHT_COLOR};
use crate::model::Region;
use crate::state::MaskStore;

/// Color and opacity used to highlight a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightStyle {
    /// Highlight color
    pub color: [u8; 3],
    /// Weight of the highlight color, 0.0-1.0
    pub alpha: f32,
}

impl HighlightStyle {
    /// Create a style; alpha is clamped to 0.0-1.0.
    pub fn new(color: [u8; 3], alpha: f32) -> Self {
        Self {
            color,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHLIGHT_COLOR, DEFAULT_HIGHLIGHT_ALPHA)
    }
}

/// Blend one pixel towards the highlight color, truncating to 8 bits.
pub fn blend_pixel(base: [u8; 3], style: &HighlightStyle) -> [u8; 3] {
    let keep = 1.0 - style.alpha;
    let mut out = [0u8; 3];
    for (c, o) in out.iter_mut().enumerate() {
        let v = f32::from(base[c]) * keep + f32::from(style.color[c]) * style.alpha;
        // `as` saturates and truncates towards zero
        *o = v as u8;
    }
    out
}

/// Copy of `base` with every pixel selected by `inside` blended.
pub fn blend_region(
    base: &RgbImage,
    style: &HighlightStyle,
    inside: impl Fn(u32, u32) -> bool,
) -> RgbImage {
    let mut out = base.clone();
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        if inside(x, y) {
            *pixel = Rgb(blend_pixel(pixel.0, style));
        }
    }
    out
}

/// Per-side cache of highlighted composites.
#[derive(Debug, Clone)]
pub struct HighlightCache {
    classes: HashMap<u8, RgbImage>,
    instances: HashMap<usize, RgbImage>,
    style: HighlightStyle,
    ceiling: usize,
    ceiling_reported: bool,
}

impl HighlightCache {
    /// Create an empty cache.
    pub fn new(style: HighlightStyle, ceiling: usize) -> Self {
        Self {
            classes: HashMap::new(),
            instances: HashMap::new(),
            style,
            ceiling,
            ceiling_reported: false,
        }
    }

    /// Style used for new composites.
    pub fn style(&self) -> &HighlightStyle {
        &self.style
    }

    /// Number of cached composites across both maps.
    pub fn len(&self) -> usize {
        self.classes.len() + self.instances.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a composite for the region is cached.
    pub fn contains(&self, region: Region) -> bool {
        match region {
            Region::None => false,
            Region::Class(id) => self.classes.contains_key(&id),
            Region::Instance(index) => self.instances.contains_key(&index),
        }
    }

    /// Drop every composite (e.g., when the side loads a new dataset).
    pub fn clear(&mut self) {
        let count = self.len();
        self.classes.clear();
        self.instances.clear();
        self.ceiling_reported = false;
        if count > 0 {
            log::info!("Cleared highlight cache ({} entries)", count);
        }
    }

    /// Composite for a region, computing and caching it on a miss.
    ///
    /// `Region::None` yields the untouched base image and is not cached.
    /// Returns `None` only when the store has no base image.
    pub fn render<'a>(&'a mut self, store: &'a MaskStore, region: Region) -> Option<&'a RgbImage> {
        let base = store.base()?;

        match region {
            Region::None => Some(base),
            Region::Class(id) => {
                if !self.classes.contains_key(&id) {
                    log::debug!("Highlight cache miss for class {}", id);
                    let img = blend_region(base, &self.style, |x, y| {
                        store.region_contains(region, x, y)
                    });
                    self.classes.insert(id, img);
                    self.check_ceiling();
                }
                self.classes.get(&id)
            }
            Region::Instance(index) => {
                if !self.instances.contains_key(&index) {
                    log::debug!("Highlight cache miss for instance {}", index);
                    let img = blend_region(base, &self.style, |x, y| {
                        store.region_contains(region, x, y)
                    });
                    self.instances.insert(index, img);
                    self.check_ceiling();
                }
                self.instances.get(&index)
            }
        }
    }

    fn check_ceiling(&mut self) {
        if !self.ceiling_reported && self.len() > self.ceiling {
            self.ceiling_reported = true;
            log::warn!(
                "Highlight cache holds {} composites (ceiling {}); dataset has unusually many regions",
                self.len(),
                self.ceiling
            );
        }
    }
}

impl Default for HighlightCache {
    fn default() -> Self {
        Self::new(HighlightStyle::default(), DEFAULT_CACHE_CEILING)
    }
}
