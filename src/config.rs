//! Configuration
//!
//! Loaded from a TOML file, then overridden by environment variables and
//! finally by command-line flags.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Public CSV used when nothing else is configured.
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/dataprofessor/data/master/supermarket_sales.csv";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub filters: FilterConfig,

    #[serde(default)]
    pub window: WindowConfig,
}

/// Where the sales table is loaded from.  `file` wins over `url` when set.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default)]
    pub file: Option<PathBuf>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_url() -> String {
    DEFAULT_DATA_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            file: None,
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// How many regions are pre-selected on startup.
    #[serde(default = "default_region_count")]
    pub default_region_count: usize,
}

fn default_region_count() -> usize {
    3
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_region_count: default_region_count(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: f32,

    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_width() -> f32 {
    1400.0
}

fn default_height() -> f32 {
    900.0
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load `explicit` if given, else the first existing default location,
    /// else built-in defaults.  Environment overrides are applied last.
    pub fn load_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::load(path)?
            }
            None => Self::from_default_locations(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn from_default_locations() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("sales-dashboard").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        log::warn!("{e}");
                    }
                }
            }
        }

        log::info!("Using default config");
        Config::default()
    }

    /// Apply `SALES_DASHBOARD_*` overrides read through `var`.
    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("SALES_DASHBOARD_URL") {
            self.source.url = url;
        }
        if let Some(file) = var("SALES_DASHBOARD_FILE") {
            self.source.file = Some(PathBuf::from(file));
        }
        if let Some(timeout) = var("SALES_DASHBOARD_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => self.source.timeout_secs = secs,
                Err(_) => log::warn!("Ignoring invalid SALES_DASHBOARD_TIMEOUT_SECS={timeout}"),
            }
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}
