//! Error types for Regsync
//!
//! Only run-fatal conditions are modeled as errors: bad configuration,
//! unreadable input, failed authentication, and an unusable copy tool.
//! Per-task copy failures are ordinary results, carried as
//! [`TaskOutcome`](crate::runner::TaskOutcome) variants, and never
//! propagate as errors.

use thiserror::Error;

#[cfg(test)]
mod tests;

/// Main error type for Regsync operations
#[derive(Error, Debug)]
pub enum SyncError {
    /// Configuration errors (missing or invalid required settings)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input errors (missing or unreadable image list file, bad input line)
    #[error("Input error: {message}")]
    Input {
        message: String,
        path: Option<String>,
    },

    /// Authentication errors (registry login failure)
    #[error("Authentication error: {message}")]
    Auth { message: String },

    /// Copy tool errors (tool missing, version probe failure, spawn failure)
    #[error("Copy tool error: {message}")]
    Tool {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for Regsync operations
pub type Result<T> = std::result::Result<T, SyncError>;

impl SyncError {
    /// Creates a new configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libregsync::error::SyncError;
    ///
    /// let err = SyncError::config("missing required setting `registry`");
    /// assert!(matches!(err, SyncError::Config { .. }));
    /// ```
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a new input error, optionally carrying the offending path.
    ///
    /// # Examples
    ///
    /// ```
    /// use libregsync::error::SyncError;
    ///
    /// let err = SyncError::input("images file not found", Some("images.txt"));
    /// assert!(matches!(err, SyncError::Input { .. }));
    /// ```
    pub fn input<S: Into<String>>(message: S, path: Option<S>) -> Self {
        Self::Input {
            message: message.into(),
            path: path.map(|p| p.into()),
        }
    }

    /// Creates a new authentication error.
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Creates a new copy tool error.
    pub fn tool<S: Into<String>>(message: S) -> Self {
        Self::Tool {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new copy tool error with a source error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libregsync::error::SyncError;
    /// use std::io;
    ///
    /// let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
    /// let err = SyncError::tool_with_source("failed to execute skopeo", io_err);
    /// assert!(matches!(err, SyncError::Tool { .. }));
    /// ```
    pub fn tool_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Tool {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
