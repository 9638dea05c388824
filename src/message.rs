//! Messages exchanged between a UI front end and the annotator core.
//!
//! UI events are represented as messages in the Elm architecture style; every
//! message produces exactly one [`Response`].

use std::path::PathBuf;

use image::RgbImage;

use crate::model::{CorrespondenceRow, Side};
use crate::state::LoadReport;

/// Messages that can be sent to update annotator state.
#[derive(Debug, Clone)]
pub enum Message {
    /// A dataset folder was picked for a side
    LoadDataset {
        /// Side to load
        side: Side,
        /// Dataset root folder
        folder: PathBuf,
    },
    /// Pointer moved over a side's image (image pixel coordinates)
    PointerMoved {
        /// Side under the pointer
        side: Side,
        /// Pixel column, may lie outside the image
        x: i64,
        /// Pixel row, may lie outside the image
        y: i64,
        /// Ctrl held: resolve instances instead of classes
        ctrl: bool,
    },
    /// Pointer clicked on a side's image
    Clicked {
        /// Side clicked
        side: Side,
        /// Pixel column
        x: i64,
        /// Pixel row
        y: i64,
    },
    /// Save the correspondence table as CSV
    SaveTable {
        /// Output file; `None` uses the configured table path
        path: Option<PathBuf>,
    },
    /// Synthesize RGB masks for every loaded side
    SaveRgbMasks {
        /// Class name → color JSON; `None` uses the configured color map
        color_map: Option<PathBuf>,
    },
}

/// Result of handling a [`Message`].
#[derive(Debug, Clone)]
pub enum Response {
    /// New image to show for a side
    Redraw(Side, RgbImage),
    /// Nothing to repaint
    Unchanged,
    /// A click completed a pair and this row was appended
    RowRecorded(CorrespondenceRow),
    /// A click was stored and waits for the other side
    ClickPending(Side),
    /// A dataset was loaded (possibly partially)
    Loaded(Side, LoadReport),
    /// Files were written
    Saved(Vec<PathBuf>),
    /// The operation was aborted; message is meant for the user
    Failed(String),
}
