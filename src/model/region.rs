//! Resolved regions under the cursor.

/// How a coordinate is resolved: by semantic class or by object instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// Look up the semantic class mask (no modifier held)
    #[default]
    Class,
    /// Look up the instance masks (Ctrl held)
    Instance,
}

impl ResolveMode {
    /// Mode selected by the state of the Ctrl modifier.
    pub fn from_ctrl(ctrl: bool) -> Self {
        if ctrl { Self::Instance } else { Self::Class }
    }
}

/// Discriminant of a [`Region`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// Nothing resolved
    None,
    /// A semantic class
    Class,
    /// An instance mask
    Instance,
}

/// Region covering a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    /// Outside the image, background class, or no matching instance
    #[default]
    None,
    /// Semantic class id (never 0)
    Class(u8),
    /// Zero-based index into the side's instance list
    Instance(usize),
}

impl Region {
    /// Kind of region.
    pub fn kind(&self) -> RegionKind {
        match self {
            Region::None => RegionKind::None,
            Region::Class(_) => RegionKind::Class,
            Region::Instance(_) => RegionKind::Instance,
        }
    }
}
