//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use bakery_cache::{cache_key, Cache, FileStore};
use bakery_commerce::store::CartStore;
use bakery_observability::{LogLevel, StructuredLogger};

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
#[derive(Debug)]
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Customer whose cart slot is used; `None` for the anonymous cart.
    pub user: Option<String>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, user: Option<String>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            user,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(&config_path) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory holding the cart slots.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    /// Slot for the current user.
    pub fn slot(&self) -> String {
        match self.user {
            Some(ref user) => cache_key!(self.config.storage.slot.as_str(), user),
            None => self.config.storage.slot.clone(),
        }
    }

    /// Logger configured from `[logging]`; `--verbose` lowers the level to debug.
    pub fn logger(&self) -> StructuredLogger {
        let level = if self.output.is_verbose() {
            self.config.logging.level.min(LogLevel::Debug)
        } else {
            self.config.logging.level
        };
        StructuredLogger::new("cart-store")
            .with_scope(self.slot())
            .with_min_level(level)
            .with_format(self.config.logging.format)
    }

    /// Open the cart store for the current slot.
    pub fn open_store(&self) -> Result<CartStore> {
        let dir = self.storage_dir();
        let files = FileStore::open(&dir)
            .with_context(|| format!("Failed to open cart storage at {}", dir.display()))?;
        self.output
            .debug(&format!("Using slot '{}' in {}", self.slot(), dir.display()));

        Ok(CartStore::open(
            Cache::new(files),
            self.slot(),
            self.config.cart.currency,
            self.logger(),
        ))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}
