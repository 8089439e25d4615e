//! High-level API for the Regsync library.
//!
//! A [`Syncer`] owns the run configuration and the copy tool and drives
//! a whole mirror run: probe the tool, log in to the destination
//! registry, parse the image list, detect duplicate basenames, build the
//! copy plans and orchestrate their execution.
//!
//! # Examples
//!
//! ```no_run
//! use libregsync::Syncer;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let syncer = Syncer::from_env()?;
//!     let summary = syncer.sync_file(Path::new("images.txt")).await?;
//!     println!("{}", summary);
//!     Ok(())
//! }
//! ```

use crate::config::SyncConfig;
use crate::dedup::DuplicateSet;
use crate::error::{Result, SyncError};
use crate::image::{self, ImageSpec};
use crate::plan::CopyPlan;
use crate::report::RunSummary;
use crate::runner::{self, RunnerOptions};
use crate::tool::{self, CopyTool, Skopeo};
use std::path::Path;
use std::time::Duration;
use tokio::time::timeout;
use tracing::info;

#[cfg(test)]
#[path = "syncer_tests.rs"]
mod tests;

const VERSION_PROBE_TIMEOUT: Duration = Duration::from_secs(10);
const LOGIN_TIMEOUT: Duration = Duration::from_secs(60);

/// High-level interface for one mirror run.
///
/// The generic parameter is the copy tool implementation; production
/// code uses the [`Skopeo`] default while tests inject instrumented
/// fakes via [`Syncer::with_tool`].
pub struct Syncer<T: CopyTool = Skopeo> {
    config: SyncConfig,
    tool: T,
}

impl Syncer<Skopeo> {
    /// Creates a syncer driving the skopeo binary named in `config`.
    pub fn new(config: SyncConfig) -> Self {
        let tool = Skopeo::new(config.skopeo_path.clone());
        Self { config, tool }
    }

    /// Creates a syncer from `REGSYNC_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(SyncConfig::from_env()?))
    }
}

impl<T: CopyTool> Syncer<T> {
    /// Creates a syncer with an explicit copy tool implementation.
    pub fn with_tool(config: SyncConfig, tool: T) -> Self {
        Self { config, tool }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Probes the copy tool and returns its version line.
    ///
    /// A tool that cannot report its version is unusable; the whole run
    /// is aborted before any login or copy.
    pub async fn check_tool(&self) -> Result<String> {
        let output = timeout(VERSION_PROBE_TIMEOUT, self.tool.run(&tool::version_args()))
            .await
            .map_err(|_| SyncError::tool("copy tool version probe timed out"))??;

        if !output.success() {
            return Err(SyncError::tool(format!(
                "copy tool unavailable: {}",
                output.diagnostic()
            )));
        }
        Ok(output.stdout.trim().to_string())
    }

    /// Logs in to the destination registry.
    ///
    /// Must complete successfully before any copy task is admitted; a
    /// failure is fatal to the whole run.
    pub async fn login(&self) -> Result<()> {
        info!(
            registry = %self.config.registry,
            username = %self.config.username,
            "logging in to destination registry"
        );
        let args = tool::login_args(
            &self.config.username,
            &self.config.password,
            &self.config.registry,
        );
        let output = timeout(LOGIN_TIMEOUT, self.tool.run(&args))
            .await
            .map_err(|_| SyncError::auth("registry login timed out"))?
            .map_err(|e| SyncError::auth(format!("registry login failed: {}", e)))?;

        if !output.success() {
            return Err(SyncError::auth(format!(
                "registry login failed (exit code {}): {}",
                output.code,
                output.diagnostic()
            )));
        }
        info!(registry = %self.config.registry, "login succeeded");
        Ok(())
    }

    /// Parses input lines, detects duplicates over the whole set, and
    /// builds one copy plan per line.
    ///
    /// Duplicate detection completes over the entire input before any
    /// plan is returned, so every destination is final.
    pub fn plan_lines(&self, lines: &[String]) -> Result<Vec<CopyPlan>> {
        let specs = lines
            .iter()
            .map(|line| ImageSpec::parse(line))
            .collect::<Result<Vec<_>>>()?;

        let duplicates = DuplicateSet::detect(&specs);
        if !duplicates.is_empty() {
            info!(
                names = ?duplicates.names(),
                "duplicate image names detected, destinations will carry namespace prefixes"
            );
        }

        Ok(specs
            .iter()
            .map(|spec| {
                CopyPlan::build(
                    spec,
                    &duplicates,
                    &self.config.registry,
                    &self.config.namespace,
                )
            })
            .collect())
    }

    /// Reads an image list file and plans every line in it.
    pub fn plan_file(&self, path: &Path) -> Result<Vec<CopyPlan>> {
        let lines = image::load_lines(path)?;
        info!(count = lines.len(), file = %path.display(), "parsed image list");
        self.plan_lines(&lines)
    }

    /// Executes all plans under the configured concurrency, retry and
    /// timeout limits and folds the outcomes into a summary.
    pub async fn run(&self, plans: Vec<CopyPlan>) -> RunSummary {
        let options = RunnerOptions {
            max_concurrent: self.config.max_concurrent,
            retry_count: self.config.retry_count,
            timeout: self.config.timeout(),
        };
        info!(
            max_concurrent = options.max_concurrent,
            retry_count = options.retry_count,
            timeout_secs = options.timeout.as_secs(),
            total = plans.len(),
            "dispatching copy tasks"
        );
        let outcomes = runner::run_all(&self.tool, plans, &options).await;
        RunSummary::from_outcomes(&outcomes)
    }

    /// Full batch run: tool probe, login, plan, execute, summarize.
    pub async fn sync_file(&self, path: &Path) -> Result<RunSummary> {
        let version = self.check_tool().await?;
        info!(%version, "copy tool ready");
        self.login().await?;
        let plans = self.plan_file(path)?;
        Ok(self.run(plans).await)
    }
}
