//! Config file handling

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable naming an alternative config directory
pub const CONFIG_DIR_ENV: &str = "CURLFETCH_CONFIG_DIR";

/// curlfetch configuration
///
/// Read from `<config dir>/curlfetch/config.toml`, or from `config.toml`
/// in `$CURLFETCH_CONFIG_DIR` when that is set:
///
/// ```toml
/// [defaults]
/// options = ["--convert-cookies", "--output=data.json"]
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub config_dir: PathBuf,
    pub default_options: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: Self::default_config_dir(),
            default_options: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from the default config file (TOML format)
    pub fn load() -> Result<Self> {
        let config_dir = Self::default_config_dir();
        Self::load_from(&config_dir)
    }

    /// Load configuration from `config.toml` inside `config_dir`
    ///
    /// A missing file yields the defaults.
    pub fn load_from(config_dir: &Path) -> Result<Self> {
        let config_file = config_dir.join("config.toml");

        if !config_file.exists() {
            return Ok(Self {
                config_dir: config_dir.to_path_buf(),
                ..Self::default()
            });
        }

        let content = std::fs::read_to_string(&config_file)
            .with_context(|| format!("Failed to read config {}", config_file.display()))?;

        let toml_value: toml::Value = toml::from_str(&content)
            .with_context(|| format!("Invalid config TOML in {}", config_file.display()))?;

        let default_options = toml_value
            .get("defaults")
            .and_then(|d| d.get("options"))
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            config_dir: config_dir.to_path_buf(),
            default_options,
        })
    }

    /// Get the default config directory (`CURLFETCH_CONFIG_DIR` overrides it)
    fn default_config_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return PathBuf::from(dir);
        }
        dirs::config_dir()
            .map(|p| p.join("curlfetch"))
            .unwrap_or_else(|| PathBuf::from(".curlfetch"))
    }

    /// Insert configured default options right after the program name
    ///
    /// Options given on the command line come later and therefore win.
    /// Only flags are used; values must be attached (`--output=data.json`).
    pub fn merge_default_options(&self, args: Vec<String>) -> Vec<String> {
        if self.default_options.is_empty() {
            return args;
        }

        let (flags, positional): (Vec<_>, Vec<_>) = self
            .default_options
            .iter()
            .partition(|opt| opt.starts_with('-'));

        if !positional.is_empty() {
            warn!(ignored = ?positional, "Positional arguments in default options are ignored");
        }

        if flags.is_empty() {
            return args;
        }

        let mut merged = Vec::with_capacity(args.len() + flags.len());
        let mut iter = args.into_iter();
        if let Some(program) = iter.next() {
            merged.push(program);
        }
        merged.extend(flags.into_iter().cloned());
        merged.extend(iter);
        merged
    }
}
