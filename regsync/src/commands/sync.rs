use crate::format::{self, OutputFormat};
use crate::logging;
use libregsync::{RunSummary, SyncConfig, Syncer};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// CLI overrides applied on top of the environment configuration.
pub struct Overrides {
    pub max_concurrent: Option<usize>,
    pub retry_count: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
}

/// Handle the sync subcommand: the full mirror batch.
///
/// Exits with the summary's exit code: 0 only when every image copied.
pub async fn handle_sync(file: &Path, verbose: u8, overrides: Overrides, fmt: OutputFormat) {
    let mut config = match SyncConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(max_concurrent) = overrides.max_concurrent {
        config.max_concurrent = max_concurrent;
    }
    if let Some(retry_count) = overrides.retry_count {
        config.retry_count = retry_count;
    }
    if let Some(timeout_secs) = overrides.timeout_secs {
        config.timeout_secs = timeout_secs;
    }
    if overrides.log_file.is_some() {
        config.log_file = overrides.log_file;
    }

    if let Err(e) = logging::init(verbose, config.log_file.as_deref()) {
        eprintln!("Error: failed to open log file: {}", e);
        std::process::exit(1);
    }

    let syncer = Syncer::new(config);
    let summary = match syncer.sync_file(file).await {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // The summary block also goes through the log sink before the
    // user-facing rendering below.
    tracing::info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed.len(),
        "run complete"
    );

    match fmt {
        OutputFormat::Pretty => print_pretty(&summary),
        other => match format::format_output(&summary, other) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("Error formatting output: {}", e);
                std::process::exit(1);
            }
        },
    }
    std::process::exit(summary.exit_code());
}

#[derive(Tabled)]
struct FailureRow {
    #[tabled(rename = "Destination")]
    destination: String,
    #[tabled(rename = "Exit Code")]
    exit_code: i32,
    #[tabled(rename = "Reason")]
    reason: String,
}

fn print_pretty(summary: &RunSummary) {
    println!();
    if summary.success() {
        println!(
            "{} {} of {} images mirrored",
            "✓".green().bold(),
            summary.succeeded,
            summary.total
        );
        return;
    }

    println!(
        "{} {} of {} images mirrored, {} failed",
        "✗".red().bold(),
        summary.succeeded,
        summary.total,
        summary.failed.len()
    );
    let rows: Vec<FailureRow> = summary
        .failed
        .iter()
        .map(|failure| FailureRow {
            destination: failure.destination.clone(),
            exit_code: failure.exit_code,
            reason: failure.reason.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));
}
