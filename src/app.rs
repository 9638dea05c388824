//! Annotator core: both side views plus the correspondence recorder.

use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::format::{ColorMap, RgbMaskOutput, synthesize_side};
use crate::message::{Message, Response};
use crate::model::{CorrespondenceRow, Side};
use crate::state::{CorrespondenceRecorder, LoadReport, SideView};

/// Single owner of all annotation state.
///
/// The two side views never touch each other; the recorder is the only
/// place where their clicks meet.
#[derive(Debug, Clone)]
pub struct Annotator {
    config: AppConfig,
    sides: [SideView; 2],
    recorder: CorrespondenceRecorder,
}

impl Annotator {
    /// Create an annotator with nothing loaded.
    pub fn new(config: AppConfig) -> Self {
        let style = config.highlight.style();
        let ceiling = config.highlight.cache_ceiling;
        Self {
            sides: Side::ALL.map(|side| SideView::new(side, style, ceiling)),
            recorder: CorrespondenceRecorder::new(),
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// View of one side.
    pub fn side(&self, side: Side) -> &SideView {
        &self.sides[side.index()]
    }

    /// Correspondence table.
    pub fn recorder(&self) -> &CorrespondenceRecorder {
        &self.recorder
    }

    /// Load a dataset folder into a side.
    ///
    /// On success the side's cache and pending click are reset, even when
    /// some files were unreadable.
    pub fn load_side(&mut self, side: Side, folder: &Path) -> Result<LoadReport> {
        let report = self.sides[side.index()].load_dataset(folder)?;
        self.recorder.discard_pending(side);
        Ok(report)
    }

    /// Pointer move; returns the image to repaint, if any.
    pub fn hover(&mut self, side: Side, x: i64, y: i64, ctrl: bool) -> Option<&RgbImage> {
        self.sides[side.index()].hover(x, y, ctrl)
    }

    /// Click; returns the row when this click completed a pair.
    pub fn click(&mut self, side: Side, x: i64, y: i64) -> Option<CorrespondenceRow> {
        let Some(info) = self.sides[side.index()].click_info(x, y) else {
            log::debug!("Ignoring {} click outside the image at ({}, {})", side, x, y);
            return None;
        };
        self.recorder.on_click(side, info)
    }

    /// Write the correspondence table as CSV.
    pub fn save_table(&self, path: &Path) -> Result<()> {
        self.recorder.write_csv(path)
    }

    /// Synthesize the RGB mask of one side.
    pub fn save_rgb_mask(&self, side: Side, color_map: &ColorMap) -> Result<RgbMaskOutput> {
        let layout = self
            .side(side)
            .layout()
            .ok_or(Error::NoDataset { side })?;
        synthesize_side(&layout.session, side, color_map)
    }

    /// Synthesize RGB masks for every side with a loaded dataset.
    pub fn save_rgb_masks(&self, color_map_path: &Path) -> Result<Vec<RgbMaskOutput>> {
        let color_map = ColorMap::load(color_map_path)?;

        let loaded: Vec<Side> = Side::ALL
            .into_iter()
            .filter(|&side| self.side(side).layout().is_some())
            .collect();
        if loaded.is_empty() {
            return Err(Error::NoDataset { side: Side::Model });
        }

        loaded
            .into_iter()
            .map(|side| self.save_rgb_mask(side, &color_map))
            .collect()
    }

    /// Handle one UI message.
    pub fn update(&mut self, message: Message) -> Response {
        match message {
            Message::LoadDataset { side, folder } => match self.load_side(side, &folder) {
                Ok(report) => Response::Loaded(side, report),
                Err(e) => failed(e),
            },
            Message::PointerMoved { side, x, y, ctrl } => match self.hover(side, x, y, ctrl) {
                Some(img) => Response::Redraw(side, img.clone()),
                None => Response::Unchanged,
            },
            Message::Clicked { side, x, y } => {
                let inside = self.side(side).store().pixel_at(x, y).is_some();
                match self.click(side, x, y) {
                    Some(row) => Response::RowRecorded(row),
                    None if inside => Response::ClickPending(side),
                    None => Response::Unchanged,
                }
            }
            Message::SaveTable { path } => {
                let result = or_configured(path, self.config.preferences.table_file(), "table path")
                    .and_then(|path| self.save_table(&path).map(|()| path));
                match result {
                    Ok(path) => Response::Saved(vec![path]),
                    Err(e) => failed(e),
                }
            }
            Message::SaveRgbMasks { color_map } => {
                let result =
                    or_configured(color_map, self.config.preferences.color_map_file(), "color map")
                        .and_then(|path| self.save_rgb_masks(&path));
                match result {
                    Ok(outputs) => Response::Saved(
                        outputs
                            .into_iter()
                            .flat_map(|o| [o.mask_path, o.objects_path])
                            .collect(),
                    ),
                    Err(e) => failed(e),
                }
            }
        }
    }
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

/// Explicit path, else the configured one.
fn or_configured(
    explicit: Option<PathBuf>,
    configured: Option<&Path>,
    setting: &'static str,
) -> Result<PathBuf> {
    explicit
        .or_else(|| configured.map(Path::to_path_buf))
        .ok_or(Error::NotConfigured { setting })
}

fn failed(error: Error) -> Response {
    if error.is_missing_path() {
        log::warn!("{}", error);
        Response::Failed(format!("{}. Check the selected folder or file.", error))
    } else {
        log::error!("{}", error);
        Response::Failed(error.to_string())
    }
}
