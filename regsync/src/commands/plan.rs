use crate::format::{self, OutputFormat};
use crate::logging;
use libregsync::{CopyPlan, SyncConfig, Syncer};
use std::path::Path;
use tabled::{Table, Tabled};

/// Handle the plan subcommand: parse, detect duplicates and print the
/// planned copies without invoking the tool.
pub fn handle_plan(file: &Path, verbose: u8, fmt: OutputFormat) {
    let config = match SyncConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    // Duplicate-name warnings from planning still want a sink.
    if let Err(e) = logging::init(verbose, None) {
        eprintln!("Error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let syncer = Syncer::new(config);
    let plans = match syncer.plan_file(file) {
        Ok(plans) => plans,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match fmt {
        OutputFormat::Pretty => print_pretty(&plans),
        other => match format::format_output(&plans, other) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("Error formatting output: {}", e);
                std::process::exit(1);
            }
        },
    }
}

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Destination")]
    destination: String,
}

fn print_pretty(plans: &[CopyPlan]) {
    if plans.is_empty() {
        println!("Nothing to mirror.");
        return;
    }
    let rows: Vec<PlanRow> = plans
        .iter()
        .map(|plan| PlanRow {
            source: plan.source.clone(),
            destination: plan.destination.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));
}
