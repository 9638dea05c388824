//! Which half of an image pair a component belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of the comparison: the synthetic model image or the real image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Synthetic image rendered from a model
    Model,
    /// Captured real-world image
    Real,
}

impl Side {
    /// Both sides, model first.
    pub const ALL: [Side; 2] = [Side::Model, Side::Real];

    /// Lowercase name used in output file names.
    pub fn name(&self) -> &'static str {
        match self {
            Side::Model => "model",
            Side::Real => "real",
        }
    }

    /// Index into per-side arrays.
    pub fn index(&self) -> usize {
        match self {
            Side::Model => 0,
            Side::Real => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
