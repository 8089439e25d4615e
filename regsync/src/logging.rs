//! Logging setup.
//!
//! Timestamped tracing output to stdout, optionally teed into an
//! append-mode log file. Core logic emits events through `tracing`; the
//! subscriber installed here is the only process-global logging state.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber. `verbose` maps 0/1/2+ to
/// info/debug/trace; `RUST_LOG` takes precedence when set.
pub fn init(verbose: u8, log_file: Option<&Path>) -> std::io::Result<()> {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stdout_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stdout);
    let registry = tracing_subscriber::registry().with(filter).with(stdout_layer);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Arc::new(file));
            registry.with(file_layer).init();
        }
        None => registry.init(),
    }
    Ok(())
}
