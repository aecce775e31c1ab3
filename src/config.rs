//! Configuration management for stainview.
//!
//! Settings are layered with the following precedence:
//! 1. Environment variables (highest priority)
//! 2. JSON config document
//! 3. Default values (lowest priority)
//!
//! The JSON document is passed in as a string; reading it from disk is up to
//! the caller.

use serde::{Deserialize, Serialize};

use crate::compositor::IntensityPolicy;
use crate::error::{Result, StainviewError};
use crate::palette::ColorTable;

/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "STAINVIEW_LOG_LEVEL";
/// Environment variable overriding the intensity policy
pub const ENV_INTENSITY: &str = "STAINVIEW_INTENSITY";
/// Environment variable overriding the montage spacing
pub const ENV_SPACING: &str = "STAINVIEW_SPACING";

/// Largest accepted gap between montage panels, in pixels
pub const MAX_SPACING: u32 = 4096;

/// Rendering options shared by composite and montage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Handling of intensities that do not fit in 8 bits
    #[serde(default)]
    pub intensity: IntensityPolicy,

    /// Gap between montage panels in pixels
    #[serde(default)]
    pub spacing: u32,
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Rendering options
    #[serde(default)]
    pub render: RenderOptions,

    /// Stain colors; the built-in table is used when absent
    #[serde(default)]
    pub colors: Option<ColorTable>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load(json: Option<&str>) -> Result<Self> {
        let mut config = match json {
            Some(document) => Self::from_json(document)?,
            None => Config::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a JSON config document; missing fields take their defaults
    pub fn from_json(document: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(document)?;
        Ok(config)
    }

    /// Override fields from environment-style lookups
    fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(policy) = lookup(ENV_INTENSITY) {
            self.render.intensity = policy.parse()?;
        }
        if let Some(spacing) = lookup(ENV_SPACING) {
            self.render.spacing = spacing.trim().parse().map_err(|e| StainviewError::Config {
                message: format!("Invalid {}: {} ({})", ENV_SPACING, spacing, e),
            })?;
        }
        Ok(())
    }

    /// The active color table
    pub fn color_table(&self) -> Option<&ColorTable> {
        self.colors.as_ref()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(StainviewError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        self.render.validate()?;

        if let Some(colors) = &self.colors {
            if colors.is_empty() {
                return Err(StainviewError::Config {
                    message: "Color table cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            colors: None,
            log_level: default_log_level(),
        }
    }
}

impl RenderOptions {
    /// Reject option values that cannot produce a sensible image
    pub fn validate(&self) -> Result<()> {
        if self.spacing > MAX_SPACING {
            return Err(StainviewError::Config {
                message: format!(
                    "Montage spacing {} exceeds the maximum of {}",
                    self.spacing, MAX_SPACING
                ),
            });
        }
        Ok(())
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            intensity: IntensityPolicy::Saturate,
            spacing: 0,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
