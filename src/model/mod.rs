//! Data models for CPAT.

mod correspondence;
mod region;
mod side;

pub use correspondence::{ClickInfo, CorrespondenceRow, mean_luminance};
pub use region::{Region, RegionKind, ResolveMode};
pub use side::Side;
