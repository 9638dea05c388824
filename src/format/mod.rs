//! File formats produced and consumed by the annotator.
//!
//! - **Color map JSON**: class name → RGB color, drives class id assignment
//! - **RGB mask**: object id / class id packed into an RGB PNG plus an
//!   object-name side-car JSON
//!
//! The correspondence table CSV is written by
//! [`CorrespondenceRecorder`](crate::state::CorrespondenceRecorder).

mod color_map;
mod rgb_mask;

pub use color_map::{ColorMap, ColorTable};
pub use rgb_mask::{RgbMaskOutput, object_names_json, synthesize_rgb_mask, synthesize_side};
