//! Concurrent copy task orchestration.
//!
//! One task per input line, all driven together and bounded by a counting
//! admission gate. Each attempt runs under a hard wall-clock timeout and
//! failed attempts retry with exponential backoff against the exact same
//! command. Tasks are independent: a failure, retry or timeout in one
//! never blocks or cancels its siblings, and the runner always waits for
//! every task to reach a terminal state.

use crate::plan::CopyPlan;
use crate::tool::CopyTool;
use futures::future::join_all;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::{Instant, sleep, timeout};
use tracing::{error, info, warn};


/// Synthetic exit code recorded for a timed-out attempt.
pub const TIMEOUT_EXIT_CODE: i32 = 124;
/// Synthetic exit code recorded for an internal fault.
pub const INTERNAL_EXIT_CODE: i32 = 125;

/// Orchestrator tunables, taken from [`SyncConfig`](crate::SyncConfig).
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    /// Admission gate size: how many tasks may run at once.
    pub max_concurrent: usize,
    /// Extra attempts after the first failed one.
    pub retry_count: u32,
    /// Wall-clock deadline for a single attempt.
    pub timeout: Duration,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            max_concurrent: 8,
            retry_count: 2,
            timeout: Duration::from_secs(1200),
        }
    }
}

/// Why a task ultimately failed. External tool exits, timeouts and
/// internal faults stay distinct so operators can tell hangs from tool
/// errors in the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The tool exited non-zero on the last attempt.
    ToolExit { code: i32 },
    /// The last attempt exceeded the wall-clock deadline and its process
    /// was killed.
    TimedOut { after_secs: u64 },
    /// The tool could not be executed at all.
    Internal { message: String },
}

impl FailureKind {
    /// Exit code carried into the summary: the tool's own non-zero code,
    /// or a synthetic code for timeouts and internal faults.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolExit { code } if *code > 0 => *code,
            Self::ToolExit { .. } => 1,
            Self::TimedOut { .. } => TIMEOUT_EXIT_CODE,
            Self::Internal { .. } => INTERNAL_EXIT_CODE,
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ToolExit { code } => write!(f, "exit code {}", code),
            Self::TimedOut { after_secs } => write!(f, "timeout after {}s", after_secs),
            Self::Internal { message } => write!(f, "internal fault: {}", message),
        }
    }
}

/// Terminal state of one copy task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    Succeeded {
        destination: String,
        attempts: u32,
        elapsed_secs: f64,
    },
    Failed {
        destination: String,
        exit_code: i32,
        attempts: u32,
        elapsed_secs: f64,
        reason: FailureKind,
    },
}

impl TaskOutcome {
    pub fn destination(&self) -> &str {
        match self {
            Self::Succeeded { destination, .. } | Self::Failed { destination, .. } => destination,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Runs every plan to a terminal state and returns the outcomes in input
/// order.
pub async fn run_all<T: CopyTool>(
    tool: &T,
    plans: Vec<CopyPlan>,
    options: &RunnerOptions,
) -> Vec<TaskOutcome> {
    let gate = Semaphore::new(options.max_concurrent.max(1));
    let tasks = plans
        .into_iter()
        .enumerate()
        .map(|(index, plan)| run_task(tool, index + 1, plan, options, &gate));
    join_all(tasks).await
}

/// Drives one task through its attempt/retry state machine.
///
/// The admission permit is held only while an attempt runs; it is
/// released before the backoff sleep and re-acquired for the next
/// attempt, so a backing-off task does not occupy a slot.
async fn run_task<T: CopyTool>(
    tool: &T,
    index: usize,
    plan: CopyPlan,
    options: &RunnerOptions,
    gate: &Semaphore,
) -> TaskOutcome {
    let started = Instant::now();
    let total_attempts = options.retry_count.saturating_add(1);
    let mut last_failure = FailureKind::ToolExit { code: 1 };

    for attempt in 1..=total_attempts {
        let permit = match gate.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                // The gate never closes during a run; treat it as an
                // internal fault isolated to this task.
                last_failure = FailureKind::Internal {
                    message: "admission gate closed".to_string(),
                };
                break;
            }
        };

        info!(
            task = index,
            attempt,
            source = %plan.source,
            destination = %plan.destination,
            "copy attempt starting"
        );
        info!(task = index, command = %plan.command_line(), "copy command");

        let attempt_result = timeout(options.timeout, tool.run(&plan.command)).await;
        drop(permit);

        let elapsed_secs = started.elapsed().as_secs_f64();
        last_failure = match attempt_result {
            Ok(Ok(output)) if output.success() => {
                info!(
                    task = index,
                    attempt,
                    elapsed_secs,
                    destination = %plan.destination,
                    "copy succeeded"
                );
                return TaskOutcome::Succeeded {
                    destination: plan.destination,
                    attempts: attempt,
                    elapsed_secs,
                };
            }
            Ok(Ok(output)) => {
                warn!(
                    task = index,
                    attempt,
                    code = output.code,
                    elapsed_secs,
                    diagnostic = %output.diagnostic(),
                    "copy failed"
                );
                FailureKind::ToolExit { code: output.code }
            }
            Ok(Err(err)) => {
                warn!(task = index, attempt, error = %err, "copy attempt hit an internal fault");
                FailureKind::Internal {
                    message: err.to_string(),
                }
            }
            Err(_) => {
                warn!(
                    task = index,
                    attempt,
                    timeout_secs = options.timeout.as_secs(),
                    "TIMEOUT: copy attempt exceeded its deadline, process killed"
                );
                FailureKind::TimedOut {
                    after_secs: options.timeout.as_secs(),
                }
            }
        };

        if attempt < total_attempts {
            let backoff = Duration::from_secs(2u64.saturating_pow(attempt - 1));
            info!(
                task = index,
                attempt,
                backoff_secs = backoff.as_secs(),
                "retrying after backoff"
            );
            sleep(backoff).await;
        }
    }

    error!(
        task = index,
        destination = %plan.destination,
        attempts = total_attempts,
        reason = %last_failure,
        "retries exhausted"
    );
    TaskOutcome::Failed {
        destination: plan.destination,
        exit_code: last_failure.exit_code(),
        attempts: total_attempts,
        elapsed_secs: started.elapsed().as_secs_f64(),
        reason: last_failure,
    }
}
