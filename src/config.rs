//! Configuration management for the blocks validator
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (blocks.toml)
//! - Environment variables (BLOCKS__*)
//!
//! ## Example config file (blocks.toml):
//! ```toml
//! [limits]
//! max_depth = 16
//! max_nodes = 100000
//!
//! [output]
//! format = "pretty"
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validator::{BlocksValidator, ValidationLimits};

/// Main configuration for the validator and its CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Resource bounds for a single validation call
    #[serde(default)]
    pub limits: ValidationLimits,

    /// Report output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format (pretty or compact)
    #[serde(default)]
    pub format: OutputFormat,

    /// Print accepted files as well as rejected ones
    #[serde(default = "default_true")]
    pub show_accepted: bool,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Pretty,
            show_accepted: true,
        }
    }
}

impl OutputConfig {
    /// Render a JSON value in the configured format
    pub fn render(&self, value: &serde_json::Value) -> serde_json::Result<String> {
        match self.format {
            OutputFormat::Pretty => serde_json::to_string_pretty(value),
            OutputFormat::Compact => serde_json::to_string(value),
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, layering an explicit file over the defaults
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = ["blocks.toml", ".blocks.toml", "config/blocks.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "blocks", "validator") {
            let xdg_config = config_dir.config_dir().join("blocks.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // BLOCKS__LIMITS__MAX_DEPTH=32
        builder = builder.add_source(
            Environment::with_prefix("BLOCKS")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Validator carrying the configured limits
    pub fn validator(&self) -> BlocksValidator {
        BlocksValidator::with_limits(self.limits)
    }
}
