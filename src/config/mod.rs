//! Configuration system for jsonfilter.
//!
//! Settings are read from `~/.config/jsonfilter/config.toml` (or a file given
//! with `--config`). Every field has a default, so a partial file is fine.
//!
//! # Example
//!
//! ```
//! use jsonfilter::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.log_level, "warn");
//! assert!(config.decompress_gzip);
//!
//! let custom: Config = toml::from_str(r#"selectors = ["a.b"]"#).unwrap();
//! assert_eq!(custom.selectors, vec!["a.b".to_string()]);
//! assert_eq!(custom.log_level, "warn");
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Configuration for jsonfilter.
///
/// * `log_level` - Default log filter when `RUST_LOG` is unset (default: "warn")
/// * `decompress_gzip` - Transparently gunzip input starting with the gzip magic bytes (default: true)
/// * `selectors` - Selectors used when none are given on the command line (default: none)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default log filter
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Decompress gzip input
    #[serde(default = "default_decompress_gzip")]
    pub decompress_gzip: bool,

    /// Fallback selectors
    #[serde(default)]
    pub selectors: Vec<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_decompress_gzip() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            decompress_gzip: default_decompress_gzip(),
            selectors: Vec::new(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/jsonfilter/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("jsonfilter");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing file (or no home directory) yields the defaults. A file that
    /// can't be read or parsed is an error; callers decide whether to fall
    /// back to [`Config::default`].
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_or_default(path),
            None => Ok(Self::default()),
        }
    }

    /// Like [`Config::load_from`], but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Loads configuration from `path`, failing if it can't be read or parsed.
    pub fn load_from<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Saves configuration to `path`, creating parent directories as needed.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}
