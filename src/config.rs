//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::joongna::JoongnaStrategy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Bunjang request timeout in seconds
    #[serde(default = "default_bunjang_timeout_secs")]
    pub bunjang_timeout_secs: u64,

    /// Joongna request timeout in seconds
    #[serde(default = "default_joongna_timeout_secs")]
    pub joongna_timeout_secs: u64,

    /// Number of Bunjang results requested
    #[serde(default = "default_bunjang_page_size")]
    pub bunjang_page_size: u32,

    /// Number of Joongna results requested
    #[serde(default = "default_joongna_page_size")]
    pub joongna_page_size: u32,

    /// Bunjang items older than this many seconds are dropped
    #[serde(default = "default_recency_window_secs")]
    pub recency_window_secs: u64,

    /// How Joongna results are obtained
    #[serde(default)]
    pub joongna_strategy: JoongnaStrategy,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory of static frontend files to serve at `/`
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    /// Pause between searches in batch mode, in milliseconds
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
}

fn default_bunjang_timeout_secs() -> u64 {
    30
}

fn default_joongna_timeout_secs() -> u64 {
    10
}

fn default_bunjang_page_size() -> u32 {
    100
}

fn default_joongna_page_size() -> u32 {
    50
}

fn default_recency_window_secs() -> u64 {
    24 * 60 * 60
}

fn default_port() -> u16 {
    3010
}

fn default_batch_delay_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy: None,
            format: OutputFormat::Table,
            bunjang_timeout_secs: default_bunjang_timeout_secs(),
            joongna_timeout_secs: default_joongna_timeout_secs(),
            bunjang_page_size: default_bunjang_page_size(),
            joongna_page_size: default_joongna_page_size(),
            recency_window_secs: default_recency_window_secs(),
            joongna_strategy: JoongnaStrategy::Api,
            port: default_port(),
            static_dir: None,
            batch_delay_ms: default_batch_delay_ms(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("secondhand-search").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(proxy) = std::env::var("SECONDHAND_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(strategy) = std::env::var("SECONDHAND_JOONGNA_STRATEGY") {
            if let Ok(s) = strategy.parse() {
                self.joongna_strategy = s;
            }
        }

        if let Ok(port) = std::env::var("PORT") {
            if let Ok(p) = port.parse() {
                self.port = p;
            }
        }

        self
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
