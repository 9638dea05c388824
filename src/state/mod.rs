//! Interactive per-side state and the correspondence table.

mod highlight_cache;
mod mask_store;
mod recorder;
mod side_view;

pub use highlight_cache::{HighlightCache, HighlightStyle, blend_pixel, blend_region};
pub use mask_store::{InstanceMask, LoadFailure, LoadReport, MaskStore};
pub use recorder::CorrespondenceRecorder;
pub use side_view::SideView;
