//! One side of the comparison: rasters, resolver state and highlight cache.

use std::path::{Path, PathBuf};

use image::{GrayImage, RgbImage};

use crate::data::DatasetLayout;
use crate::error::Result;
use crate::model::{ClickInfo, Region, ResolveMode, Side, mean_luminance};
use crate::state::{HighlightCache, HighlightStyle, InstanceMask, LoadReport, MaskStore};

/// Interactive view over one side's dataset.
///
/// The same type serves both the model and the real side.
#[derive(Debug, Clone)]
pub struct SideView {
    side: Side,
    store: MaskStore,
    cache: HighlightCache,
    layout: Option<DatasetLayout>,
    /// Region currently on screen; `None` forces the next hover to render
    displayed: Option<Region>,
    mode: ResolveMode,
}

impl SideView {
    /// Create an empty view.
    pub fn new(side: Side, style: HighlightStyle, cache_ceiling: usize) -> Self {
        Self {
            side,
            store: MaskStore::new(),
            cache: HighlightCache::new(style, cache_ceiling),
            layout: None,
            displayed: None,
            mode: ResolveMode::default(),
        }
    }

    /// Which side this view shows.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Loaded rasters.
    pub fn store(&self) -> &MaskStore {
        &self.store
    }

    /// Highlight cache.
    pub fn cache(&self) -> &HighlightCache {
        &self.cache
    }

    /// Layout of the loaded dataset folder, if loaded from disk.
    pub fn layout(&self) -> Option<&DatasetLayout> {
        self.layout.as_ref()
    }

    /// Region currently displayed.
    pub fn displayed(&self) -> Option<Region> {
        self.displayed
    }

    /// Mode used by the last hover.
    pub fn mode(&self) -> ResolveMode {
        self.mode
    }

    /// Discover and load a dataset folder.
    ///
    /// Missing folders abort before any state changes. Once the layout is
    /// found, the load itself is soft: see [`MaskStore::load`].
    pub fn load_dataset(&mut self, root: &Path) -> Result<LoadReport> {
        let layout = DatasetLayout::discover(root)?;
        let report = self.load_files(&layout.base, &layout.semantic, &layout.instances);
        self.layout = Some(layout);
        Ok(report)
    }

    /// Load explicit files, resetting all per-dataset state first.
    pub fn load_files(&mut self, base: &Path, semantic: &Path, instances: &[PathBuf]) -> LoadReport {
        self.reset();
        let report = self.store.load(base, semantic, instances);
        log::info!(
            "🖼️ Loaded {} side: base={}, semantic={}, {} instances, {} skipped",
            self.side,
            report.base_loaded,
            report.semantic_loaded,
            report.instances_loaded,
            report.failures.len()
        );
        report
    }

    /// Install in-memory rasters, resetting all per-dataset state first.
    pub fn load_parts(
        &mut self,
        base: Option<RgbImage>,
        semantic: Option<GrayImage>,
        instances: Vec<InstanceMask>,
    ) -> LoadReport {
        self.reset();
        let (store, report) = MaskStore::from_parts(base, semantic, instances);
        self.store = store;
        report
    }

    fn reset(&mut self) {
        self.cache.clear();
        self.layout = None;
        self.displayed = None;
        self.mode = ResolveMode::default();
    }

    /// Handle a pointer move.
    ///
    /// Returns the image to display, or `None` when the display is unchanged
    /// (same region as before) or nothing is loaded. A change of the Ctrl
    /// state always re-renders.
    pub fn hover(&mut self, x: i64, y: i64, ctrl: bool) -> Option<&RgbImage> {
        let mode = ResolveMode::from_ctrl(ctrl);
        if mode != self.mode {
            self.mode = mode;
            self.displayed = None;
        }

        let region = self.store.resolve(x, y, mode);
        if self.displayed == Some(region) {
            return None;
        }

        let img = self.cache.render(&self.store, region)?;
        self.displayed = Some(region);
        Some(img)
    }

    /// Collect what a click at (x, y) records.
    ///
    /// Returns `None` for clicks outside the base image.
    pub fn click_info(&self, x: i64, y: i64) -> Option<ClickInfo> {
        let (px, py) = self.store.pixel_at(x, y)?;
        let color = self.store.color_at(px, py)?;
        let class_id = self.store.class_at(px, py).unwrap_or(0);

        let mut info = ClickInfo::new(class_id, mean_luminance(color));
        if let Some(index) = self.store.first_instance_at(px, py) {
            let name = &self.store.instances()[index].name;
            // Object ids are 1-based
            let id = u32::try_from(index + 1).unwrap_or(u32::MAX);
            info = info.with_object(name.clone(), id);
        }
        Some(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};

    fn view_with_data() -> SideView {
        let mut view = SideView::new(Side::Model, HighlightStyle::default(), 16);
        let base = RgbImage::from_pixel(4, 4, Rgb([40, 40, 40]));
        let mut semantic = GrayImage::new(4, 4);
        semantic.put_pixel(1, 1, Luma([5]));
        semantic.put_pixel(2, 2, Luma([5]));
        let mut first = GrayImage::new(4, 4);
        first.put_pixel(3, 3, Luma([1]));
        let mut second = GrayImage::new(4, 4);
        second.put_pixel(1, 1, Luma([1]));
        let report = view.load_parts(
            Some(base),
            Some(semantic),
            vec![InstanceMask::new("car_01", first), InstanceMask::new("car_02", second)],
        );
        assert!(report.is_complete());
        view
    }

    #[test]
    fn test_hover_same_region_is_noop() {
        let mut view = view_with_data();

        assert!(view.hover(1, 1, false).is_some());
        assert_eq!(view.displayed(), Some(Region::Class(5)));
        // Different pixel, same class
        assert!(view.hover(2, 2, false).is_none());
        // Leaving the class shows the plain base once
        let base = view.hover(0, 0, false).unwrap().clone();
        assert_eq!(&base, view.store().base().unwrap());
        assert!(view.hover(0, 1, false).is_none());
    }

    #[test]
    fn test_mode_switch_forces_render() {
        let mut view = view_with_data();

        // Pixel without class or instance
        assert!(view.hover(0, 0, false).is_some());
        assert!(view.hover(0, 0, false).is_none());
        // Same pixel, Ctrl pressed: must re-render even though still None
        assert!(view.hover(0, 0, true).is_some());
        assert_eq!(view.mode(), ResolveMode::Instance);
        assert!(view.hover(0, 0, true).is_none());
        // Released again
        assert!(view.hover(0, 0, false).is_some());
    }

    #[test]
    fn test_instance_hover() {
        let mut view = view_with_data();

        let img = view.hover(1, 1, true).unwrap();
        assert_eq!(img.get_pixel(1, 1).0, [201, 201, 201]);
        assert_eq!(img.get_pixel(3, 3).0, [40, 40, 40]);
        assert_eq!(view.displayed(), Some(Region::Instance(1)));
    }

    #[test]
    fn test_reload_clears_cache() {
        let mut view = view_with_data();
        view.hover(1, 1, false);
        assert!(view.cache().contains(Region::Class(5)));

        let mut semantic = GrayImage::new(4, 4);
        semantic.put_pixel(0, 0, Luma([5]));
        view.load_parts(Some(RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]))), Some(semantic), Vec::new());

        assert!(view.cache().is_empty());
        assert_eq!(view.displayed(), None);

        // Same class id recomputed against the new rasters
        let img = view.hover(0, 0, false).unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [191, 191, 191]);
        assert_eq!(img.get_pixel(1, 1).0, [0, 0, 0]);
    }

    #[test]
    fn test_click_info() {
        let view = view_with_data();

        let info = view.click_info(1, 1).unwrap();
        assert_eq!(info.object_name.as_deref(), Some("car_02"));
        assert_eq!(info.object_id, Some(2));
        assert_eq!(info.class_id, 5);
        assert_eq!(info.mean_luminance, 40.0);

        // Background pixel records class 0 and no object
        let info = view.click_info(0, 0).unwrap();
        assert_eq!(info.class_id, 0);
        assert_eq!(info.object_id, None);

        assert!(view.click_info(-1, 0).is_none());
        assert!(view.click_info(4, 0).is_none());
    }

    #[test]
    fn test_empty_view() {
        let mut view = SideView::new(Side::Real, HighlightStyle::default(), 16);
        assert!(view.hover(0, 0, false).is_none());
        assert!(view.click_info(0, 0).is_none());
        assert!(view.load_dataset(Path::new("/no/such/root")).is_err());
    }
}
