//! Dashboard configuration.
//!
//! Resolution order, later wins:
//! 1. built-in defaults
//! 2. `dashboard.json` in the working directory (every field optional)
//! 3. the `SMARTPHONE_DATA` environment variable (data path only)
//! 4. the first command-line argument (data path only)

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "dashboard.json";
pub const DATA_ENV: &str = "SMARTPHONE_DATA";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset loaded at startup.
    pub data_path: PathBuf,
    /// Step of the Brand Explorer price slider.
    pub price_step: i64,
    /// Discrete storage sizes (GB) offered by the storage selector.
    pub storage_steps: Vec<i64>,
    /// Bins of the price histogram.
    pub price_bins: usize,
    /// Bins of the rating histogram.
    pub rating_bins: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("smartphones.csv"),
            price_step: 10_000,
            storage_steps: vec![4, 8, 16, 32, 64, 128, 256, 512],
            price_bins: 30,
            rating_bins: 20,
        }
    }
}

impl DashboardConfig {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: DashboardConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(config.sanitized())
    }

    /// Resolve the effective config for this process.
    pub fn load() -> Self {
        Self::resolve(
            Path::new(CONFIG_FILE),
            std::env::var(DATA_ENV).ok(),
            std::env::args().nth(1),
        )
    }

    /// Apply the resolution order with explicit inputs.
    pub fn resolve(config_file: &Path, env_data: Option<String>, arg_data: Option<String>) -> Self {
        let mut config = if config_file.exists() {
            Self::from_file(config_file).unwrap_or_else(|e| {
                log::warn!("{e}; using default settings");
                Self::default()
            })
        } else {
            Self::default()
        };

        if let Some(path) = arg_data.or(env_data).filter(|p| !p.is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        log::debug!("effective config: {config:?}");
        config
    }

    /// Replace unusable values with defaults.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.price_step <= 0 {
            self.price_step = defaults.price_step;
        }
        self.storage_steps.retain(|&s| s > 0);
        self.storage_steps.sort_unstable();
        self.storage_steps.dedup();
        if self.storage_steps.is_empty() {
            self.storage_steps = defaults.storage_steps;
        }
        if self.price_bins == 0 {
            self.price_bins = defaults.price_bins;
        }
        if self.rating_bins == 0 {
            self.rating_bins = defaults.rating_bins;
        }
        self
    }
}
