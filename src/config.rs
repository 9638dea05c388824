//! Configuration file support for CPAT.
//!
//! Stores dataset locations, highlight appearance and the log level as a
//! versioned JSON document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CACHE_CEILING, DEFAULT_HIGHLIGHT_ALPHA, DEFAULT_HIGHLIGHT_COLOR};
use crate::model::Side;
use crate::state::HighlightStyle;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Application name (for identification)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,

    /// Region highlight appearance
    #[serde(default)]
    pub highlight: HighlightConfig,
}

fn default_app_name() -> String {
    "CPAT".to_string()
}

/// User preferences section of the config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Dataset root of the model side (empty = not set)
    #[serde(default)]
    pub model_folder: String,

    /// Dataset root of the real side (empty = not set)
    #[serde(default)]
    pub real_folder: String,

    /// Class name → color JSON used for RGB mask synthesis
    #[serde(default)]
    pub color_map_path: String,

    /// Where the correspondence table is saved
    #[serde(default)]
    pub table_path: String,
}

impl UserPreferences {
    /// Configured dataset root of a side.
    pub fn folder(&self, side: Side) -> Option<&str> {
        let folder = match side {
            Side::Model => &self.model_folder,
            Side::Real => &self.real_folder,
        };
        Some(folder.as_str()).filter(|f| !f.is_empty())
    }

    /// Configured color map file.
    pub fn color_map_file(&self) -> Option<&Path> {
        non_empty_path(&self.color_map_path)
    }

    /// Configured correspondence table file.
    pub fn table_file(&self) -> Option<&Path> {
        non_empty_path(&self.table_path)
    }
}

fn non_empty_path(path: &str) -> Option<&Path> {
    Some(Path::new(path)).filter(|_| !path.is_empty())
}

/// Highlight section of the config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightConfig {
    /// Weight of the highlight color (clamped to 0.0-1.0)
    #[serde(default = "default_alpha")]
    pub alpha: f32,

    /// Highlight color
    #[serde(default = "default_color")]
    pub color: [u8; 3],

    /// Composite count per side above which a warning is logged
    #[serde(default = "default_cache_ceiling")]
    pub cache_ceiling: usize,
}

fn default_alpha() -> f32 {
    DEFAULT_HIGHLIGHT_ALPHA
}

fn default_color() -> [u8; 3] {
    DEFAULT_HIGHLIGHT_COLOR
}

fn default_cache_ceiling() -> usize {
    DEFAULT_CACHE_CEILING
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            color: default_color(),
            cache_ceiling: default_cache_ceiling(),
        }
    }
}

impl HighlightConfig {
    /// Style used by the highlight caches.
    pub fn style(&self) -> HighlightStyle {
        HighlightStyle::new(self.color, self.alpha)
    }
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            preferences: UserPreferences::default(),
            highlight: HighlightConfig::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "cpat-config.json"
    }

    /// Get the default config file path.
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("cpat").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("cpat")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from a file.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load_from_file(&path) {
            Ok(config) => {
                log::info!("Loaded configuration from {:?}", path);
                Some(config)
            }
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to a file, creating parent directories.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Save configuration to the default path.
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        self.save_to_file(&path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
