//! Watermark configuration.
//!
//! The preloaded module has no command line, so configuration reaches it
//! through the environment: `XMARK_CONFIG` names a JSON or YAML file and
//! `XMARK_TEXT` overrides the watermark text. Missing fields take the
//! defaults below.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted reference frame side and minimum dimension (X11 limit).
pub const MAX_DIMENSION: u32 = 65535;

/// Path to a JSON/YAML config file.
pub const CONFIG_ENV: &str = "XMARK_CONFIG";
/// Overrides [`WatermarkConfig::text`].
pub const TEXT_ENV: &str = "XMARK_TEXT";
/// `env_logger` filter for the diagnostic stream.
pub const LOG_ENV: &str = "XMARK_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse YAML config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Unsupported config format for {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Parameters of the tiled watermark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkConfig {
    /// Text repeated across the window.
    pub text: String,
    pub font_family: String,
    pub bold: bool,
    /// Font size in device units.
    pub font_size: f64,
    /// Rotation applied to the tile grid.
    pub angle_degrees: f64,
    /// Horizontal gap between tiles.
    pub x_padding: i32,
    /// Vertical gap between rows.
    pub y_padding: i32,
    /// RGBA source color, each component in `0.0..=1.0`.
    pub color: [f64; 4],
    /// Reference frame whose diagonal anchors the tiling origin.
    pub reference_width: u32,
    pub reference_height: u32,
    /// Surfaces with either side at or below this are left alone.
    pub min_dimension: i32,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            text: "CONFIDENTIAL".to_string(),
            font_family: "monospace".to_string(),
            bold: true,
            font_size: 40.0,
            angle_degrees: 30.0,
            x_padding: 120,
            y_padding: 80,
            color: [0.5, 0.5, 0.5, 0.1],
            reference_width: 1920,
            reference_height: 1080,
            min_dimension: 128,
        }
    }
}

impl WatermarkConfig {
    /// Default configuration with custom text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Self::default() }
    }

    /// Diagonal of the reference frame, rounded half up.
    pub fn reference_diagonal(&self) -> i32 {
        rounded_diagonal(self.reference_width as i64, self.reference_height as i64)
    }

    pub fn angle_radians(&self) -> f64 {
        self.angle_degrees.to_radians()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.text.is_empty() {
            return Err(ConfigError::Invalid("text must not be empty".into()));
        }
        if self.text.contains('\0') {
            return Err(ConfigError::Invalid("text must not contain NUL".into()));
        }
        if self.font_family.is_empty() || self.font_family.contains('\0') {
            return Err(ConfigError::Invalid(format!(
                "font_family {:?} is not a usable family name",
                self.font_family
            )));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "font_size must be positive, got {}",
                self.font_size
            )));
        }
        if !self.angle_degrees.is_finite() {
            return Err(ConfigError::Invalid("angle_degrees must be finite".into()));
        }
        if self.x_padding < 0 || self.y_padding < 0 {
            return Err(ConfigError::Invalid(format!(
                "paddings must be non-negative, got {}x{}",
                self.x_padding, self.y_padding
            )));
        }
        let frame = 1..=MAX_DIMENSION;
        if !frame.contains(&self.reference_width) || !frame.contains(&self.reference_height) {
            return Err(ConfigError::Invalid(format!(
                "reference frame must be within 1..={MAX_DIMENSION} on each side, got {}x{}",
                self.reference_width, self.reference_height
            )));
        }
        if !(0..=MAX_DIMENSION as i32).contains(&self.min_dimension) {
            return Err(ConfigError::Invalid(format!(
                "min_dimension must be within 0..={MAX_DIMENSION}, got {}",
                self.min_dimension
            )));
        }
        if self.color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(ConfigError::Invalid(format!(
                "color components must be within 0..=1, got {:?}",
                self.color
            )));
        }
        Ok(())
    }

    /// Load a config file, choosing the format from its extension.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

        let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        let config: WatermarkConfig = match ext.as_deref() {
            Some("json") => serde_json::from_str(&contents)
                .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)
                .map_err(|source| ConfigError::Yaml { path: path.to_path_buf(), source })?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        config.validate()?;
        Ok(config)
    }

    /// Build the configuration from `XMARK_CONFIG` and `XMARK_TEXT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env::var_os(CONFIG_ENV).map(PathBuf::from), env::var(TEXT_ENV).ok())
    }

    /// Same as [`WatermarkConfig::from_env`] with the variable values passed in.
    pub fn from_vars(config_path: Option<PathBuf>, text: Option<String>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::load_file(&path)?,
            None => Self::default(),
        };
        if let Some(text) = text {
            config.text = text;
        }
        config.validate()?;
        Ok(config)
    }
}

/// `round(sqrt(w² + h²))` with halves rounded up, saturating at `i32::MAX`.
pub fn rounded_diagonal(width: i64, height: i64) -> i32 {
    ((width as f64).hypot(height as f64) + 0.5) as i32
}
