//! Configuration loading and server URL resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Compiled fallback for the database server origin
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Environment variable overriding the server origin
pub const SERVER_URL_ENV: &str = "AMDB_SERVER_URL";

/// Result cap sent with every artist autocomplete search
pub const DEFAULT_SEARCH_LIMIT: u32 = 100;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Contents of `config.toml`
///
/// Every key is optional. Missing keys fall back to compiled defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Database server origin (e.g. `http://localhost:5000`)
    pub server_url: Option<String>,
    /// Artist autocomplete result cap
    pub search_limit: Option<u32>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// tracing filter directive (e.g. `debug`, `amdb_admin=trace`)
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load a config file without ever failing
    ///
    /// A missing file is not an error. A malformed file logs a warning and
    /// yields the defaults so the console can still start.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            debug!("No config file located, using compiled defaults");
            return Self::default();
        };

        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Config file {} not found, using compiled defaults", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Locate the platform config file
///
/// Linux checks `~/.config/amdb/config.toml` then `/etc/amdb/config.toml`.
/// Other platforms use the user config directory only.
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("amdb").join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/amdb/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Resolved admin client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub server_url: String,
    pub search_limit: u32,
    pub request_timeout: Duration,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Resolve configuration from all sources
    ///
    /// Server URL priority order:
    /// 1. Command-line argument (highest priority)
    /// 2. Environment variable
    /// 3. TOML config file
    /// 4. Compiled default (fallback)
    pub fn resolve(cli_server: Option<&str>, toml_config: &TomlConfig) -> Result<Self> {
        let server_url = resolve_server_url(cli_server, toml_config);
        validate_server_url(&server_url)?;

        let search_limit = toml_config.search_limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        if search_limit == 0 {
            return Err(Error::Config("search_limit must be at least 1".to_string()));
        }

        let timeout_secs = toml_config
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }

        let log_level = toml_config
            .log_level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            server_url,
            search_limit,
            request_timeout: Duration::from_secs(timeout_secs),
            log_level,
        })
    }
}

fn resolve_server_url(cli_server: Option<&str>, toml_config: &TomlConfig) -> String {
    // Priority 1: Command-line argument
    if let Some(url) = cli_server {
        debug!("Server URL from command line: {}", url);
        return url.trim().to_string();
    }

    // Priority 2: Environment variable
    if let Ok(url) = std::env::var(SERVER_URL_ENV) {
        if !url.trim().is_empty() {
            debug!("Server URL from {}: {}", SERVER_URL_ENV, url);
            return url.trim().to_string();
        }
    }

    // Priority 3: TOML config file
    if let Some(url) = &toml_config.server_url {
        debug!("Server URL from config file: {}", url);
        return url.trim().to_string();
    }

    // Priority 4: Compiled default
    DEFAULT_SERVER_URL.to_string()
}

fn validate_server_url(url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(Error::Config("server URL is empty".to_string()));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(Error::Config(format!(
            "server URL must start with http:// or https://: {}",
            url
        )));
    }
    Ok(())
}
