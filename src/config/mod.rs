use std::path::PathBuf;

use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

fn default_data_file() -> PathBuf {
    PathBuf::from("portfolio-data.json")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("portfolio-admin.log")
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// Configuration for the application
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// JSON file holding every stored key
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Where log lines go; the terminal belongs to the console
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// `tracing` filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            log_file: default_log_file(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Load configuration from `PORTFOLIO_*` environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize prefixed environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::prefixed("PORTFOLIO_").from_env::<Config>()?;

        Ok(config)
    }

    /// Apply command line overrides on top of the environment
    pub fn with_overrides(mut self, data_file: Option<PathBuf>, log_file: Option<PathBuf>) -> Self {
        if let Some(path) = data_file {
            self.data_file = path;
        }
        if let Some(path) = log_file {
            self.log_file = path;
        }
        self
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    Config::load()
}
