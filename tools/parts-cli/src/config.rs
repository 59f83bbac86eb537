//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use parts_market::search::SearchLimits;
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["parts.toml", ".parts.toml", "parts.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Problems that make the config unusable, and ones worth a warning.
    pub fn validate(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.database.url.is_empty() {
            errors.push("database.url is required".to_string());
        } else if !self.database.url.starts_with("sqlite:") {
            errors.push(format!(
                "database.url '{}' must be a sqlite: URL",
                self.database.url
            ));
        }
        if self.database.max_connections == 0 {
            errors.push("database.max_connections must be at least 1".to_string());
        }
        if self.database.query_timeout_ms == 0 {
            errors.push("database.query_timeout_ms must be at least 1".to_string());
        }

        if self.server.port == 0 {
            warnings.push("server.port is 0; the OS will pick a port".to_string());
        }

        if self.search.max_limit == 0 {
            errors.push("search.max_limit must be at least 1".to_string());
        }
        if self.search.default_limit == 0 || self.search.default_limit > self.search.max_limit {
            errors.push(format!(
                "search.default_limit must be between 1 and search.max_limit ({})",
                self.search.max_limit
            ));
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            errors.push(format!(
                "logging.format '{}' must be \"pretty\" or \"json\"",
                self.logging.format
            ));
        }

        (errors, warnings)
    }
}

/// Database configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite URL (default: sqlite://parts.db).
    #[serde(default = "default_database_url")]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Upper bound on one search's store round trip.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

fn default_database_url() -> String {
    "sqlite://parts.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_query_timeout_ms() -> u64 {
    5000
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Page-size limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

fn default_limit() -> u32 {
    20
}

fn default_max_limit() -> u32 {
    100
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl SearchConfig {
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            default_limit: self.default_limit,
            max_limit: self.max_limit,
        }
    }
}

/// Logging configuration. `RUST_LOG` overrides `level`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,

    /// "pretty" or "json".
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

/// Generate a default parts.toml config file.
pub fn generate_default_config() -> String {
    r#"# Car-parts marketplace configuration

[database]
url = "sqlite://parts.db"
max_connections = 5
# Searches whose store round trip takes longer fail.
query_timeout_ms = 5000

[server]
host = "127.0.0.1"
port = 8080

[search]
default_limit = 20
max_limit = 100

[logging]
# RUST_LOG takes precedence when set.
level = "info"
# "pretty" or "json"
format = "pretty"
"#
    .to_string()
}
