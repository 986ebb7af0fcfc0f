//! Runtime configuration loaded from environment variables.
//!
//! - `P2PWATCH_DB` — SQLite database path (default `./p2p_listings.db`)
//! - `P2PWATCH_OUTPUT_DIR` — where spreadsheets and JSON backups go (default `.`)
//! - `P2PWATCH_TIMEOUT_SECS` — per-request HTTP timeout (default 20)
//! - `P2PWATCH_LOG` — tracing filter directive (default `info`)

use crate::domain::error::DomainError;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DB_PATH: &str = "./p2p_listings.db";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: String,
    pub output_dir: PathBuf,
    pub timeout: Duration,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            output_dir: PathBuf::from("."),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source; empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|s| !s.trim().is_empty());
        let defaults = Self::default();

        let timeout = match var("P2PWATCH_TIMEOUT_SECS") {
            None => defaults.timeout,
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    DomainError::Config(format!(
                        "P2PWATCH_TIMEOUT_SECS must be a positive integer, got '{raw}'"
                    ))
                })?;
                if secs == 0 {
                    return Err(DomainError::Config(
                        "P2PWATCH_TIMEOUT_SECS must be greater than zero".into(),
                    ));
                }
                Duration::from_secs(secs)
            }
        };

        Ok(Self {
            db_path: var("P2PWATCH_DB").unwrap_or(defaults.db_path),
            output_dir: var("P2PWATCH_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            timeout,
            log_filter: var("P2PWATCH_LOG").unwrap_or(defaults.log_filter),
        })
    }
}
