//! Configuration to acknowledge user preferences as well as set defaults.
//!
//! Specifically, we try to find a sectio.toml, and if present we load settings from there.
//! This provides the export directory and logging preferences.

use facet::Facet;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "sectio.toml";

#[derive(Facet, Clone, Debug, PartialEq, Eq)]
/// User preferences loaded from sectio.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "exported".to_string())]
    /// Directory exported documents are written into.
    pub export_dir: String,
    #[facet(default = String::new())]
    /// File that log output is appended to. Empty disables logging.
    pub log_file: String,
    #[facet(default = "info".to_string())]
    /// Log filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_dir: "exported".to_string(),
            log_file: String::new(),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from sectio.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, falling back to defaults if it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|contents| Self::parse(&contents))
            .unwrap_or_default()
    }

    #[must_use]
    /// Parse configuration text; fields left out take their defaults.
    pub fn parse(contents: &str) -> Option<Self> {
        facet_toml::from_str::<Self>(contents).ok()
    }

    #[must_use]
    /// The export directory as a path.
    pub fn export_dir(&self) -> PathBuf {
        PathBuf::from(&self.export_dir)
    }

    #[must_use]
    /// The log file, if logging is enabled.
    pub fn log_file(&self) -> Option<PathBuf> {
        (!self.log_file.is_empty()).then(|| PathBuf::from(&self.log_file))
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
