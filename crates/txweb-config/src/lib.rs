//! Configuration management for txweb
//!
//! This module handles loading, validation, and management of
//! txweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

/// Remote transactions API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the remote transactions API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:3001/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Records per page for the transactions list
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> usize {
    15
}

/// Search input settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period before a search keystroke reaches the pipeline, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    300
}

/// Fee calculation baselines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeConfig {
    /// Gas limit used when the form field is left empty
    #[serde(default = "default_gas_limit")]
    pub default_gas_limit: String,
    /// Gas price used when the form field is left empty
    #[serde(default = "default_gas_price")]
    pub default_gas_price: String,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            default_gas_limit: default_gas_limit(),
            default_gas_price: default_gas_price(),
        }
    }
}

fn default_gas_limit() -> String {
    "21000".to_string()
}

fn default_gas_price() -> String {
    "0.00000002".to_string()
}

/// Draft storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftConfig {
    /// Directory for persisted form drafts
    #[serde(default = "default_draft_path")]
    pub path: PathBuf,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            path: default_draft_path(),
        }
    }
}

fn default_draft_path() -> PathBuf {
    PathBuf::from("./data/drafts")
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Search settings
    #[serde(default)]
    pub search: SearchConfig,
    /// Fee baselines
    #[serde(default)]
    pub fees: FeeConfig,
    /// Draft storage settings
    #[serde(default)]
    pub drafts: DraftConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_string_lossy().to_string(),
                }
            } else {
                ConfigError::IoError
            }
        })?;

        let config: Config =
            serde_yaml::from_str(&content).map_err(|_| ConfigError::InvalidYaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.api.base_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                reason: "Base URL must not be empty".to_string(),
            });
        }

        if self.pagination.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.page_size".to_string(),
                reason: "Page size must be greater than 0".to_string(),
            });
        }

        if self.search.debounce_ms > 10_000 {
            return Err(ConfigError::InvalidValue {
                field: "search.debounce_ms".to_string(),
                reason: "Debounce must be at most 10000 ms".to_string(),
            });
        }

        for (field, value) in [
            ("fees.default_gas_limit", &self.fees.default_gas_limit),
            ("fees.default_gas_price", &self.fees.default_gas_price),
        ] {
            match value.parse::<f64>() {
                Ok(v) if v.is_finite() && v > 0.0 => {}
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: field.to_string(),
                        reason: "Must be a positive decimal".to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gets_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8082);
        assert_eq!(config.pagination.page_size, 15);
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.fees.default_gas_limit, "21000");
        assert_eq!(config.fees.default_gas_price, "0.00000002");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document_keeps_section_defaults() {
        let config: Config = serde_yaml::from_str("server:\n  port: 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.pagination.page_size, 15);
    }

    #[test]
    fn test_default_template_parses() {
        let config: Config = serde_yaml::from_str(Config::generate_default()).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config: Config = serde_yaml::from_str("{}").unwrap();
        config.server.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let mut config: Config = serde_yaml::from_str("{}").unwrap();
        config.pagination.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_gas_baseline() {
        let mut config: Config = serde_yaml::from_str("{}").unwrap();
        config.fees.default_gas_price = "not-a-number".to_string();
        assert!(config.validate().is_err());

        let mut config: Config = serde_yaml::from_str("{}").unwrap();
        config.fees.default_gas_limit = "-1".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_error_details() {
        let err = ConfigError::InvalidValue {
            field: "server.port".to_string(),
            reason: "Port must be greater than 0".to_string(),
        };
        let details = err.to_details();
        assert_eq!(details.code, error::ConfigErrorCode::InvalidValue);
        assert_eq!(details.field.as_deref(), Some("server.port"));
        assert!(!details.suggestions.is_empty());
    }
}
