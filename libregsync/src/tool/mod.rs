//! External copy tool integration.
//!
//! Everything registry-protocol-shaped (layer transfer, image formats,
//! authentication internals) is delegated to skopeo. This module is the
//! seam: a [`CopyTool`] trait the orchestrator and facade run against,
//! and the [`Skopeo`] implementation driving the real binary. Tests
//! substitute instrumented fakes.

use crate::error::{Result, SyncError};
use std::process::Stdio;
use tokio::process::Command;


/// Captured result of one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Process exit code; -1 when the process was killed by a signal.
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Best available diagnostic for a failed invocation.
    pub fn diagnostic(&self) -> &str {
        let err = self.stderr.trim();
        if !err.is_empty() {
            return err;
        }
        self.stdout.trim()
    }
}

/// The external collaborator contract: a single operation that runs the
/// tool with an argument vector and reports exit code plus captured
/// output. It may block for a long time; the orchestrator applies the
/// wall-clock timeout around it.
pub trait CopyTool {
    /// Runs the tool. An `Err` means the tool could not be executed at
    /// all (spawn failure); a non-zero exit is an `Ok` with that code.
    fn run(&self, args: &[String]) -> impl Future<Output = Result<ToolOutput>> + Send;
}

/// Runs the real skopeo binary via `tokio::process`.
///
/// Children are spawned with `kill_on_drop`, so an attempt abandoned by
/// the orchestrator's timeout forcibly terminates its process without
/// touching sibling tasks.
#[derive(Debug, Clone)]
pub struct Skopeo {
    binary: String,
}

impl Skopeo {
    pub fn new<S: Into<String>>(binary: S) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl CopyTool for Skopeo {
    fn run(&self, args: &[String]) -> impl Future<Output = Result<ToolOutput>> + Send {
        let binary = self.binary.clone();
        let mut command = Command::new(&self.binary);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        async move {
            let output = command.output().await.map_err(|e| {
                SyncError::tool_with_source(format!("failed to execute `{}`", binary), e)
            })?;

            Ok(ToolOutput {
                code: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}

/// Arguments for the version/health probe.
pub fn version_args() -> Vec<String> {
    vec!["--version".to_string()]
}

/// Arguments for `skopeo login`. Never logged, the password is in here.
pub fn login_args(username: &str, password: &str, registry: &str) -> Vec<String> {
    vec![
        "login".to_string(),
        "-u".to_string(),
        username.to_string(),
        "-p".to_string(),
        password.to_string(),
        registry.to_string(),
    ]
}
