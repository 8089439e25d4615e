use super::*;
use crate::runner::FailureKind;

fn succeeded(destination: &str) -> TaskOutcome {
    TaskOutcome::Succeeded {
        destination: destination.to_string(),
        attempts: 1,
        elapsed_secs: 0.5,
    }
}

fn failed(destination: &str, exit_code: i32) -> TaskOutcome {
    TaskOutcome::Failed {
        destination: destination.to_string(),
        exit_code,
        attempts: 3,
        elapsed_secs: 4.2,
        reason: FailureKind::ToolExit { code: exit_code },
    }
}

#[test]
fn test_all_successes_yield_exit_zero() {
    let summary = RunSummary::from_outcomes(&[succeeded("docker://r/m/a:1"), succeeded("docker://r/m/b:1")]);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.succeeded, 2);
    assert!(summary.success());
    assert_eq!(summary.exit_code(), 0);
}

#[test]
fn test_any_failure_yields_exit_one() {
    let summary = RunSummary::from_outcomes(&[
        succeeded("docker://r/m/a:1"),
        failed("docker://r/m/b:1", 3),
    ]);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].destination, "docker://r/m/b:1");
    assert_eq!(summary.failed[0].exit_code, 3);
    assert_eq!(summary.exit_code(), 1);
}

#[test]
fn test_empty_run_is_a_success() {
    let summary = RunSummary::from_outcomes(&[]);
    assert_eq!(summary.total, 0);
    assert_eq!(summary.exit_code(), 0);
}

#[test]
fn test_display_includes_counts_and_failures() {
    let summary = RunSummary::from_outcomes(&[
        succeeded("docker://r/m/a:1"),
        failed("docker://r/m/b:1", 124),
    ]);
    let rendered = summary.to_string();
    assert!(rendered.contains("Total: 2, Success: 1, Failed: 1"));
    assert!(rendered.contains("FAILED: docker://r/m/b:1"));
}

#[test]
fn test_summary_serializes_for_pipelines() {
    let summary = RunSummary::from_outcomes(&[failed("docker://r/m/b:1", 2)]);
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["total"], 1);
    assert_eq!(json["failed"][0]["exit_code"], 2);
}
