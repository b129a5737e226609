//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.salesdash.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".salesdash.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input data settings.
    #[serde(default)]
    pub data: DataConfig,

    /// Chart artifact settings.
    #[serde(default)]
    pub charts: ChartsConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Page appearance.
    #[serde(default)]
    pub page: PageConfig,
}

/// Input data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the transactions CSV.
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("projectds.csv")
}

/// Chart artifact settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartsConfig {
    /// Directory holding the chart HTML files.
    #[serde(default = "default_charts_dir")]
    pub dir: PathBuf,

    /// Per-view filename overrides, keyed by view id.
    #[serde(default)]
    pub files: BTreeMap<String, String>,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            dir: default_charts_dir(),
            files: BTreeMap::new(),
        }
    }
}

fn default_charts_dir() -> PathBuf {
    PathBuf::from(".")
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Debug mode: request tracing and verbose logs.
    #[serde(default)]
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

/// Page appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Heading shown above the cards.
    #[serde(default = "default_title")]
    pub title: String,

    /// Stylesheet linked from the page head.
    #[serde(default = "default_stylesheet")]
    pub stylesheet: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            stylesheet: default_stylesheet(),
        }
    }
}

fn default_title() -> String {
    "Sales Performance Overview".to_string()
}

fn default_stylesheet() -> String {
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref data) = args.data {
            self.data.path = data.clone();
        }
        if let Some(ref dir) = args.charts_dir {
            self.charts.dir = dir.clone();
        }
        if let Some(ref host) = args.host {
            self.server.host = host.clone();
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }

        // Flags always override
        if args.debug {
            self.server.debug = true;
        }
    }

    /// Log level for this run.
    ///
    /// Call after [`Config::merge_with_args`] so that `debug = true` in the
    /// file counts the same as `--debug`. `--quiet` wins over both.
    pub fn log_level(&self, args: &crate::cli::Args) -> tracing::Level {
        if args.quiet {
            tracing::Level::ERROR
        } else if args.verbose || self.server.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
