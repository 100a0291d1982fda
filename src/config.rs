//! Configuration management for the contact audit server.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is honoured when present; dotenvy never prints to stdout, which the
//! MCP transport owns.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Default base URL of the contacts service.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";

/// Largest page size the store is asked for.
pub const MAX_PAGE_SIZE: usize = 500;

/// How a confirmed edit is folded back into the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconcileStrategy {
    /// Replace the edited row in place and revalidate only that row.
    #[default]
    Patch,
    /// Refetch the current page (or re-run the active search).
    Reload,
}

impl std::str::FromStr for ReconcileStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "patch" => Ok(Self::Patch),
            "reload" => Ok(Self::Reload),
            other => Err(format!("expected 'patch' or 'reload', got: {}", other)),
        }
    }
}

/// Configuration for the contact audit server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Contacts service base URL
    pub api_url: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Fixed page size for every view (default: 50)
    pub page_size: usize,

    /// Edit reconciliation strategy (default: patch)
    pub reconcile: ReconcileStrategy,

    /// File name used when exporting the corrected spreadsheet
    pub export_file_name: String,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `CONTACTS_API_BASE_URL`: Base URL for the contacts service
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `PAGE_SIZE`: Rows per page (default: 50, max 500)
    /// - `EDIT_RECONCILE`: `patch` or `reload` (default: patch)
    /// - `EXPORT_FILE_NAME`: Export file name (default: contacts_corrected.xlsx)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let api_url =
            env::var("CONTACTS_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "CONTACTS_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let page_size = Self::parse_env_usize("PAGE_SIZE", 50)?;

        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidValue {
                var: "PAGE_SIZE".to_string(),
                reason: format!("Must be between 1 and {}", MAX_PAGE_SIZE),
            });
        }

        let reconcile = match env::var("EDIT_RECONCILE") {
            Ok(val) => val
                .parse::<ReconcileStrategy>()
                .map_err(|reason| ConfigError::InvalidValue {
                    var: "EDIT_RECONCILE".to_string(),
                    reason,
                })?,
            Err(_) => ReconcileStrategy::default(),
        };

        let export_file_name = env::var("EXPORT_FILE_NAME")
            .unwrap_or_else(|_| "contacts_corrected.xlsx".to_string());

        if export_file_name.trim().is_empty() || export_file_name.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue {
                var: "EXPORT_FILE_NAME".to_string(),
                reason: "Must be a plain, non-empty file name".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            api_url,
            request_timeout,
            page_size,
            reconcile,
            export_file_name,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: 10,
            page_size: 50,
            reconcile: ReconcileStrategy::Patch,
            export_file_name: "contacts_corrected.xlsx".to_string(),
            log_level: "error".to_string(),
        }
    }
}
