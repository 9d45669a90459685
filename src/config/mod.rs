//! Configuration file support for sigpad.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/sigpad/config.toml`. Settings cover pen appearance, the
//! background fill, the signing guideline and interaction behavior.
//!
//! If no config file exists, the defaults of the classic signature pad are used.

pub mod enums;
pub mod pad;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ColorSpec, PenCap};
pub use pad::PadConfig;
pub use types::{BackgroundConfig, BehaviorConfig, GuidelineConfig, PenConfig};

use crate::draw::color::{GUIDE_GREY, INK_BLUE, WHITE};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [pen]
/// color = "#145394"
/// width = 2.0
/// cap = "round"
///
/// [background]
/// color = "white"
///
/// [guideline]
/// color = [204, 204, 204]
/// width = 2.0
/// margin = 5.0
/// top = 35.0
///
/// [behavior]
/// display_only = false
/// leave_timeout_ms = 500
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Ink appearance
    #[serde(default)]
    pub pen: PenConfig,

    /// Surface fill
    #[serde(default)]
    pub background: BackgroundConfig,

    /// Signing baseline
    #[serde(default)]
    pub guideline: GuidelineConfig,

    /// Interaction settings
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Validated ranges:
    /// - `pen.width`: 0.5 - 20.0
    /// - `guideline.width`: 0.0 - 20.0
    /// - `guideline.margin`, `guideline.top`: >= 0.0
    /// - `behavior.leave_timeout_ms`: 50 - 5000
    pub fn validate_and_clamp(&mut self) {
        if !(0.5..=20.0).contains(&self.pen.width) {
            warn!(
                "Invalid pen width {:.1}, clamping to 0.5-20.0 range",
                self.pen.width
            );
            self.pen.width = if self.pen.width.is_nan() {
                2.0
            } else {
                self.pen.width.clamp(0.5, 20.0)
            };
        }

        if !(0.0..=20.0).contains(&self.guideline.width) {
            warn!(
                "Invalid guideline width {:.1}, clamping to 0.0-20.0 range",
                self.guideline.width
            );
            self.guideline.width = if self.guideline.width.is_nan() {
                0.0
            } else {
                self.guideline.width.clamp(0.0, 20.0)
            };
        }

        if self.guideline.margin.is_nan() || self.guideline.margin < 0.0 {
            warn!(
                "Invalid guideline margin {:.1}, using 0.0",
                self.guideline.margin
            );
            self.guideline.margin = 0.0;
        }

        if self.guideline.top.is_nan() || self.guideline.top < 0.0 {
            warn!("Invalid guideline top {:.1}, using 0.0", self.guideline.top);
            self.guideline.top = 0.0;
        }

        if !(50..=5000).contains(&self.behavior.leave_timeout_ms) {
            warn!(
                "Invalid leave_timeout_ms {}, clamping to 50-5000 range",
                self.behavior.leave_timeout_ms
            );
            self.behavior.leave_timeout_ms = self.behavior.leave_timeout_ms.clamp(50, 5000);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sigpad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sigpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined, or if the
    /// file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Writes the configuration as TOML, creating the parent directory if needed.
    ///
    /// # Errors
    /// Returns an error if a file already exists at `config_path`, or if the
    /// directory or file cannot be written.
    pub fn write_new(&self, config_path: &Path) -> Result<()> {
        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Created config at {}", config_path.display());
        Ok(())
    }

    /// Returns the JSON schema describing the config file.
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema).context("Failed to serialize config schema")
    }

    /// Resolves the file settings into the immutable per-pad configuration.
    pub fn to_pad_config(&self) -> PadConfig {
        PadConfig::default()
            .with_pen(
                self.pen.color.to_color_or(INK_BLUE),
                self.pen.width,
                self.pen.cap,
            )
            .with_background(self.background.color.to_color_or(WHITE))
            .with_guideline(
                self.guideline.color.to_color_or(GUIDE_GREY),
                self.guideline.width,
                self.guideline.margin,
                self.guideline.top,
            )
            .with_display_only(self.behavior.display_only)
            .with_draw_only(self.behavior.draw_only)
            .with_leave_timeout(Duration::from_millis(self.behavior.leave_timeout_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::BLACK;

    #[test]
    fn default_config_matches_default_pad_config() {
        assert_eq!(Config::default().to_pad_config(), PadConfig::default());
    }

    #[test]
    fn parses_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [pen]
            color = "black"
            cap = "square"

            [behavior]
            display_only = true
            "#,
        )
        .unwrap();

        let pad = config.to_pad_config();
        assert_eq!(pad.pen_color(), BLACK);
        assert_eq!(pad.pen_cap(), PenCap::Square);
        assert_eq!(pad.pen_width(), 2.0);
        assert!(pad.display_only());
        assert_eq!(pad.leave_timeout(), Duration::from_millis(500));
    }

    #[test]
    fn parses_rgb_array_colors() {
        let config: Config = toml::from_str(
            r#"
            [guideline]
            color = [0, 0, 0]
            "#,
        )
        .unwrap();
        assert_eq!(config.to_pad_config().guideline_color(), BLACK);
    }

    #[test]
    fn validate_clamps_out_of_range_values() {
        let mut config = Config::default();
        config.pen.width = 100.0;
        config.guideline.width = -3.0;
        config.guideline.margin = -1.0;
        config.behavior.leave_timeout_ms = 0;

        config.validate_and_clamp();

        assert_eq!(config.pen.width, 20.0);
        assert_eq!(config.guideline.width, 0.0);
        assert_eq!(config.guideline.margin, 0.0);
        assert_eq!(config.behavior.leave_timeout_ms, 50);
    }

    #[test]
    fn load_from_reads_and_validates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[behavior]\nleave_timeout_ms = 99999\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.behavior.leave_timeout_ms, 5000);
    }

    #[test]
    fn write_new_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::default().write_new(&path).unwrap();
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.to_pad_config(), PadConfig::default());

        assert!(Config::default().write_new(&path).is_err());
    }

    #[test]
    fn json_schema_mentions_sections() {
        let schema = Config::json_schema().unwrap();
        assert!(schema.contains("guideline"));
        assert!(schema.contains("leave_timeout_ms"));
    }
}
