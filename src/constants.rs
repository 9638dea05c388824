//! Global constants for CPAT

/// Blend factor applied to highlighted pixels
pub const DEFAULT_HIGHLIGHT_ALPHA: f32 = 0.75;

/// Highlight color (pure white)
pub const DEFAULT_HIGHLIGHT_COLOR: [u8; 3] = [255, 255, 255];

/// Highlight cache size above which a warning is logged
pub const DEFAULT_CACHE_CEILING: usize = 1024;

/// Dataset subfolder holding the base image
pub const BASE_DIR: &str = "ir";

/// Dataset subfolder holding the semantic class mask
pub const SEMANTIC_DIR: &str = "semantic";

/// Dataset subfolder holding the per-object instance masks
pub const INSTANCE_DIR: &str = "instance";

/// Session subfolder receiving synthesized RGB masks
pub const RGB_OUTPUT_DIR: &str = "RGB";

/// Column headers of the exported correspondence table
pub const TABLE_COLUMNS: [&str; 7] = [
    "name",
    "object_id_model",
    "class_id_model",
    "mean_lum_real",
    "object_id_real",
    "class_id_real",
    "mean_lum_real",
];
