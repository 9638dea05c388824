//! Pairing of clicks from both sides into correspondence rows.

use std::path::Path;

use crate::constants::TABLE_COLUMNS;
use crate::error::Result;
use crate::model::{ClickInfo, CorrespondenceRow, Side};

/// Collects clicks per side and records a row once both sides clicked.
///
/// Each side holds at most one pending click; a newer click on the same side
/// replaces it. Checking for a pair and clearing both pending clicks happens
/// within one call, so a row is never built from a half-cleared state.
#[derive(Debug, Clone, Default)]
pub struct CorrespondenceRecorder {
    pending: [Option<ClickInfo>; 2],
    rows: Vec<CorrespondenceRow>,
}

impl CorrespondenceRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a click. Returns the new row when this click completed a pair.
    pub fn on_click(&mut self, side: Side, info: ClickInfo) -> Option<CorrespondenceRow> {
        if self.pending[side.index()].is_some() {
            log::debug!("Replacing unpaired {} click", side);
        }
        self.pending[side.index()] = Some(info);

        let [Some(model), Some(real)] = &self.pending else {
            return None;
        };

        let row = CorrespondenceRow::from_clicks(model, real);
        self.pending = [None, None];
        log::debug!("Recorded correspondence #{}: {:?}", self.rows.len() + 1, row);
        self.rows.push(row.clone());
        Some(row)
    }

    /// Pending click of a side.
    pub fn pending(&self, side: Side) -> Option<&ClickInfo> {
        self.pending[side.index()].as_ref()
    }

    /// Forget a side's pending click (e.g., after that side reloads).
    pub fn discard_pending(&mut self, side: Side) {
        self.pending[side.index()] = None;
    }

    /// Recorded rows in insertion order.
    pub fn rows(&self) -> &[CorrespondenceRow] {
        &self.rows
    }

    /// Number of recorded rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if no rows were recorded.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Remove all rows and pending clicks.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.pending = [None, None];
    }

    /// Render the table as CSV with a header line.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        out.push_str(&TABLE_COLUMNS.join(","));
        out.push('\n');
        for row in &self.rows {
            let cells: Vec<String> = row.cells().iter().map(|c| csv_escape(c)).collect();
            out.push_str(&cells.join(","));
            out.push('\n');
        }
        out
    }

    /// Write the table as CSV.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_csv())?;
        log::info!("Saved {} correspondences to {:?}", self.rows.len(), path);
        Ok(())
    }
}

/// Quote a CSV cell if it contains separators, quotes or line breaks.
fn csv_escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
