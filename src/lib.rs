//! CPAT - Contrast Pair Annotation Tool
//!
//! Core of a point-and-click labeling aid for pairs of model (synthetic) and
//! real images that come with semantic class masks and per-object instance
//! masks. It resolves the region under the cursor, renders cached highlight
//! composites, pairs clicks from both sides into a correspondence table and
//! synthesizes packed RGB masks.

mod app;
pub mod config;
pub mod constants;
pub mod data;
mod error;
pub mod format;
mod message;
pub mod model;
pub mod state;

#[cfg(test)]
mod tests;

pub use app::Annotator;
pub use error::{Error, Result};
pub use message::{Message, Response};
