//! Class name → color tables used to turn semantic color masks into class ids.
//!
//! The color map file is a JSON object in which each entry maps a class name
//! to an `[r, g, b]` triple:
//!
//! ```json
//! { "road": [128, 64, 128], "car": [0, 0, 142] }
//! ```
//!
//! Class ids are assigned 1..N in file order; 0 means "no class".

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};

/// Ordered class name → color entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorMap {
    entries: Vec<(String, [u8; 3])>,
}

impl ColorMap {
    /// Create a color map from ordered entries.
    pub fn new(entries: Vec<(String, [u8; 3])>) -> Self {
        Self { entries }
    }

    /// Parse a JSON object, keeping the entry order of the document.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let object = value
            .as_object()
            .ok_or_else(|| Error::color_map("top level must be an object"))?;

        let entries = object
            .iter()
            .map(|(name, color)| {
                serde_json::from_value::<[u8; 3]>(color.clone())
                    .map(|rgb| (name.clone(), rgb))
                    .map_err(|e| {
                        Error::color_map(format!("class '{}' is not an RGB triple: {}", name, e))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    /// Load a color map file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::missing_path(path));
        }
        let json = std::fs::read_to_string(path)?;
        let map = Self::from_json(&json)?;
        log::info!("Loaded color map {:?} ({} classes)", path, map.len());
        Ok(map)
    }

    /// Entries in file order.
    pub fn entries(&self) -> &[(String, [u8; 3])] {
        &self.entries
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map has no classes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reverse lookup from color to class id.
#[derive(Debug, Clone, Default)]
pub struct ColorTable {
    lookup: HashMap<[u8; 3], u8>,
}

impl ColorTable {
    /// Build the reverse lookup. A color listed twice maps to its later id.
    pub fn from_color_map(map: &ColorMap) -> Result<Self> {
        if map.len() > usize::from(u8::MAX) {
            return Err(Error::TooManyClasses { count: map.len() });
        }

        let mut lookup = HashMap::with_capacity(map.len());
        for (index, (_, color)) in map.entries().iter().enumerate() {
            let id = u8::try_from(index + 1)
                .map_err(|_| Error::TooManyClasses { count: map.len() })?;
            lookup.insert(*color, id);
        }
        Ok(Self { lookup })
    }

    /// Class id of a color, or 0 when the color is unknown.
    pub fn class_of(&self, color: [u8; 3]) -> u8 {
        self.lookup.get(&color).copied().unwrap_or(0)
    }

    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}
