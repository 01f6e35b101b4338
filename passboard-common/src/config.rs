//! Configuration loading for Passboard
//!
//! Resolution order for the TOML file:
//! 1. Command-line argument (highest priority)
//! 2. `PASSBOARD_CONFIG` environment variable
//! 3. `<config_dir>/passboard/config.toml`
//! 4. Built-in defaults (fallback)
//!
//! A missing default file is not an error. An explicitly named file that cannot
//! be read or parsed is.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "PASSBOARD_CONFIG";

/// Top-level configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// JSON-RPC endpoint answering `getAssetsByGroup`
    #[serde(default = "default_index_endpoint")]
    pub index_endpoint: String,

    /// Base URL of the pass store (`/pass/{asset}`, `/program/{program}`)
    #[serde(default = "default_pass_store_url")]
    pub pass_store_url: String,

    #[serde(default)]
    pub pagination: PaginationConfig,

    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Asset index paging behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Items requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Fixed pause after every page request
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Ceiling on pages fetched for one collection
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Per-page request timeout
    #[serde(default = "default_index_timeout_ms")]
    pub timeout_ms: u64,
}

/// Pass store fan-out behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Maximum in-flight pass store requests
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-request timeout
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_index_endpoint() -> String {
    "https://api.mainnet-beta.solana.com".to_string()
}

fn default_pass_store_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_page_size() -> u32 {
    1000
}

fn default_page_delay_ms() -> u64 {
    100
}

fn default_max_pages() -> u32 {
    1000
}

fn default_index_timeout_ms() -> u64 {
    30_000
}

fn default_concurrency() -> usize {
    8
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            index_endpoint: default_index_endpoint(),
            pass_store_url: default_pass_store_url(),
            pagination: PaginationConfig::default(),
            enrichment: EnrichmentConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_delay_ms: default_page_delay_ms(),
            max_pages: default_max_pages(),
            timeout_ms: default_index_timeout_ms(),
        }
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl PaginationConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl EnrichmentConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl TomlConfig {
    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Read TOML failed ({}): {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.index_endpoint.trim().is_empty() {
            return Err(Error::Config("index_endpoint must not be empty".to_string()));
        }
        if self.pass_store_url.trim().is_empty() {
            return Err(Error::Config("pass_store_url must not be empty".to_string()));
        }
        if self.pagination.page_size == 0 {
            return Err(Error::Config("pagination.page_size must be > 0".to_string()));
        }
        if self.pagination.max_pages == 0 {
            return Err(Error::Config("pagination.max_pages must be > 0".to_string()));
        }
        if self.enrichment.concurrency == 0 {
            return Err(Error::Config("enrichment.concurrency must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Platform config file location (`~/.config/passboard/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("passboard").join("config.toml"))
}

/// Load configuration following the documented priority order
pub fn load_config(cli_path: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = cli_path {
        info!("Loading config from command line path: {}", path.display());
        return TomlConfig::from_file(path);
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            info!("Loading config from {}: {}", CONFIG_ENV_VAR, path);
            return TomlConfig::from_file(Path::new(&path));
        }
    }

    if let Some(path) = default_config_path() {
        if path.exists() {
            info!("Loading config from {}", path.display());
            return TomlConfig::from_file(&path);
        }
        debug!("No config file at {}, using defaults", path.display());
    }

    Ok(TomlConfig::default())
}
