//! Regsync - Registry Mirror Orchestration Library
//!
//! Regsync mirrors container images from public registries into a private
//! registry namespace. It reads a declarative list of image references,
//! detects basename collisions across source namespaces, and fans out
//! bounded-concurrency copy operations to an external copy tool (skopeo),
//! with per-task timeout and retry with exponential backoff.
//!
//! # Quick Start
//!
//! ```no_run
//! use libregsync::Syncer;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Configuration comes from REGSYNC_* environment variables
//!     let syncer = Syncer::from_env()?;
//!
//!     // Probe the copy tool and authenticate before dispatching work
//!     let summary = syncer.sync_file(Path::new("images.txt")).await?;
//!
//!     println!("{}", summary);
//!     std::process::exit(summary.exit_code());
//! }
//! ```
//!
//! # Main Types
//!
//! - [`Syncer`] - High-level entry point for a full mirror run
//! - [`SyncConfig`] - Configuration loaded from the environment
//! - [`ImageSpec`] - One parsed input line
//! - [`DuplicateSet`] - Image basenames seen under multiple source namespaces
//! - [`CopyPlan`] - Source, destination and copy-tool command for one image
//! - [`RunSummary`] - Aggregated pass/fail result of a run
//!
//! # Architecture
//!
//! Data flows one way: raw lines are parsed into [`ImageSpec`]s, the
//! [`DuplicateSet`] is computed once over the whole set, each line gets a
//! [`CopyPlan`], and the runner executes all plans under an admission gate
//! before the outcomes are folded into a [`RunSummary`].

#![warn(clippy::all)]

/// Returns the libregsync crate version.
///
/// # Examples
///
/// ```
/// let version = libregsync::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// High-level public API (main entry point)
mod syncer;
pub use syncer::Syncer;

// Re-export commonly used types for convenience
pub use crate::config::SyncConfig;
pub use crate::dedup::DuplicateSet;
pub use crate::error::{Result, SyncError};
pub use crate::image::{ImageSpec, Platform};
pub use crate::plan::CopyPlan;
pub use crate::report::{RunSummary, TaskFailure};
pub use crate::runner::{FailureKind, RunnerOptions, TaskOutcome};
pub use crate::tool::{CopyTool, Skopeo, ToolOutput};

// Low-level implementation modules (hidden from docs but still public)
// These are available for advanced users who need fine-grained control
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod dedup;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod image;
#[doc(hidden)]
pub mod plan;
#[doc(hidden)]
pub mod report;
#[doc(hidden)]
pub mod runner;
#[doc(hidden)]
pub mod tool;
