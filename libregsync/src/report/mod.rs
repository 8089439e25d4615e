//! Run summary aggregation.
//!
//! The summary is built only after every task has reached a terminal
//! state. Its exit code is the sole externally observable pass/fail
//! contract of the whole run: zero when every task succeeded, one
//! otherwise.

use crate::runner::TaskOutcome;
use serde::Serialize;
use std::fmt;

#[cfg(test)]
mod tests;

/// One exhausted task, as reported in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskFailure {
    pub destination: String,
    pub exit_code: i32,
    pub reason: String,
}

/// Aggregated result of a mirror run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: Vec<TaskFailure>,
}

impl RunSummary {
    /// Folds terminal task outcomes into counts and a failure list.
    pub fn from_outcomes(outcomes: &[TaskOutcome]) -> Self {
        let mut succeeded = 0;
        let mut failed = Vec::new();

        for outcome in outcomes {
            match outcome {
                TaskOutcome::Succeeded { .. } => succeeded += 1,
                TaskOutcome::Failed {
                    destination,
                    exit_code,
                    reason,
                    ..
                } => failed.push(TaskFailure {
                    destination: destination.clone(),
                    exit_code: *exit_code,
                    reason: reason.to_string(),
                }),
            }
        }

        Self {
            total: outcomes.len(),
            succeeded,
            failed,
        }
    }

    pub fn success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Process exit code for the run: 0 on full success, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.success() { 0 } else { 1 }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== SUMMARY =====")?;
        write!(
            f,
            "Total: {}, Success: {}, Failed: {}",
            self.total,
            self.succeeded,
            self.failed.len()
        )?;
        for failure in &self.failed {
            write!(
                f,
                "\nFAILED: {} ({})",
                failure.destination, failure.reason
            )?;
        }
        Ok(())
    }
}
