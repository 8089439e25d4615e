//! Run configuration.
//!
//! Configuration is read once at process start from `REGSYNC_*` environment
//! variables and passed by value into the rest of the system; core logic
//! never performs ambient environment lookups. The destination registry,
//! namespace and credentials are required and their absence fails the run
//! before any task is dispatched.

use crate::error::{Result, SyncError};
use config::{Config as ConfigRs, Environment};
use std::path::PathBuf;
use std::time::Duration;

#[cfg(test)]
mod tests;

/// Environment variable prefix for all settings.
pub const ENV_PREFIX: &str = "REGSYNC";

const DEFAULT_MAX_CONCURRENT: usize = 8;
const DEFAULT_RETRY_COUNT: u32 = 2;
const DEFAULT_TIMEOUT_SECS: u64 = 1200;
const DEFAULT_SKOPEO_PATH: &str = "skopeo";

/// Resolved configuration for one mirror run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Destination registry host, e.g. `registry.example.com`.
    pub registry: String,
    /// Destination namespace under the registry.
    pub namespace: String,
    /// Username for `skopeo login`.
    pub username: String,
    /// Password for `skopeo login`.
    pub password: String,
    /// Maximum number of copy tasks running at once.
    pub max_concurrent: usize,
    /// Extra attempts after a failed copy (2 means up to 3 attempts total).
    pub retry_count: u32,
    /// Wall-clock timeout for a single copy attempt, in seconds.
    pub timeout_secs: u64,
    /// Optional log file the CLI tees its output into.
    pub log_file: Option<PathBuf>,
    /// Path or name of the skopeo binary.
    pub skopeo_path: String,
}

impl SyncConfig {
    /// Loads configuration from `REGSYNC_*` environment variables.
    ///
    /// `REGSYNC_REGISTRY`, `REGSYNC_NAMESPACE`, `REGSYNC_USERNAME` and
    /// `REGSYNC_PASSWORD` are required. Tunables fall back to their
    /// defaults: `REGSYNC_MAX_CONCURRENT` (8), `REGSYNC_RETRY_COUNT` (2),
    /// `REGSYNC_TIMEOUT_SECS` (1200), `REGSYNC_SKOPEO_PATH` (`skopeo`),
    /// `REGSYNC_LOG_FILE` (none).
    pub fn from_env() -> Result<Self> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads configuration from an explicit environment source.
    ///
    /// Used by `from_env` and by tests, which inject a fake variable map
    /// instead of touching the process environment.
    pub fn from_environment(env: Environment) -> Result<Self> {
        let settings = ConfigRs::builder()
            .add_source(env)
            .build()
            .map_err(|e| SyncError::config(format!("failed to read environment: {}", e)))?;

        let lookup = |key: &str| -> Option<String> {
            settings
                .get_string(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let required = |key: &str| -> Result<String> {
            lookup(key).ok_or_else(|| {
                SyncError::config(format!(
                    "missing required setting `{}` ({}_{})",
                    key,
                    ENV_PREFIX,
                    key.to_uppercase()
                ))
            })
        };

        Ok(Self {
            registry: required("registry")?,
            namespace: required("namespace")?,
            username: required("username")?,
            password: required("password")?,
            max_concurrent: parse_tunable(
                lookup("max_concurrent"),
                "max_concurrent",
                DEFAULT_MAX_CONCURRENT,
            )?,
            retry_count: parse_tunable(lookup("retry_count"), "retry_count", DEFAULT_RETRY_COUNT)?,
            timeout_secs: parse_tunable(
                lookup("timeout_secs"),
                "timeout_secs",
                DEFAULT_TIMEOUT_SECS,
            )?,
            log_file: lookup("log_file").map(PathBuf::from),
            skopeo_path: lookup("skopeo_path").unwrap_or_else(|| DEFAULT_SKOPEO_PATH.to_string()),
        })
    }

    /// Per-attempt wall-clock timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_tunable<T: std::str::FromStr>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match value {
        Some(v) => v.parse().map_err(|e| {
            SyncError::config(format!(
                "invalid value `{}` for `{}` ({}_{}): {}",
                v,
                key,
                ENV_PREFIX,
                key.to_uppercase(),
                e
            ))
        }),
        None => Ok(default),
    }
}
