//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use bakery_commerce::Currency;
use bakery_observability::{LogFormat, LogLevel};
use serde::{Deserialize, Serialize};

/// Config file names looked up from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["bakery.toml", ".bakery.toml", "bakery.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where carts are stored.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Cart display settings.
    #[serde(default)]
    pub cart: CartConfig,

    /// Store logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per cart slot.
    #[serde(default = "default_dir")]
    pub dir: String,

    /// Slot name for the anonymous cart; user carts use `<slot>:<user>`.
    #[serde(default = "default_slot")]
    pub slot: String,
}

fn default_dir() -> String {
    ".bakery".to_string()
}

fn default_slot() -> String {
    bakery_commerce::store::DEFAULT_SLOT.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            slot: default_slot(),
        }
    }
}

/// Cart configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Display currency (e.g. "JPY").
    #[serde(default)]
    pub currency: Currency,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level written to stderr.
    #[serde(default = "default_level")]
    pub level: LogLevel,

    /// `human` or `json`.
    #[serde(default = "default_format")]
    pub format: LogFormat,
}

fn default_level() -> LogLevel {
    LogLevel::Warn
}

fn default_format() -> LogFormat {
    LogFormat::Human
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

/// Generate a default bakery.toml config file.
pub fn generate_default_config() -> String {
    r#"# Bakery cart configuration

[storage]
# One JSON file per cart slot lives here.
dir = ".bakery"
slot = "cart"

[cart]
currency = "USD"

[logging]
# trace, debug, info, warn, error
level = "warn"
format = "human"
"#
    .to_string()
}
