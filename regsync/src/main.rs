use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod format;
mod logging;

/// Regsync - Registry Mirror Orchestrator
///
/// Mirrors container images from public registries into a private
/// registry namespace, driven by a declarative image list and skopeo.
#[derive(Parser, Debug)]
#[command(name = "regsync")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Mirror every image in the list into the destination registry
    Sync {
        /// Image list file, one reference per line; # starts a comment
        #[arg(short, long, default_value = "images.txt")]
        file: PathBuf,
        /// Maximum concurrent copies (overrides REGSYNC_MAX_CONCURRENT)
        #[arg(long)]
        max_concurrent: Option<usize>,
        /// Extra attempts per image (overrides REGSYNC_RETRY_COUNT)
        #[arg(long)]
        retry_count: Option<u32>,
        /// Per-image timeout in seconds (overrides REGSYNC_TIMEOUT_SECS)
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Tee log output into this file (overrides REGSYNC_LOG_FILE)
        #[arg(long)]
        log_file: Option<PathBuf>,
        /// Output format for the final summary: pretty, json, yaml
        #[arg(long, default_value = "pretty")]
        format: String,
    },
    /// Show planned sources and destinations without copying anything
    Plan {
        /// Image list file, one reference per line; # starts a comment
        #[arg(short, long, default_value = "images.txt")]
        file: PathBuf,
        /// Output format: pretty, json, yaml
        #[arg(long, default_value = "pretty")]
        format: String,
    },
    /// Verify configuration, copy tool availability and registry login
    Check,
    /// Display version information
    Version,
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sync {
            file,
            max_concurrent,
            retry_count,
            timeout_secs,
            log_file,
            format,
        } => {
            let fmt = format::OutputFormat::from(format.as_str());
            let overrides = commands::sync::Overrides {
                max_concurrent,
                retry_count,
                timeout_secs,
                log_file,
            };
            commands::sync::handle_sync(&file, cli.verbose, overrides, fmt).await;
        }
        Commands::Plan { file, format } => {
            let fmt = format::OutputFormat::from(format.as_str());
            commands::plan::handle_plan(&file, cli.verbose, fmt);
        }
        Commands::Check => {
            commands::check::handle_check(cli.verbose).await;
        }
        Commands::Version => {
            commands::version::print_version();
        }
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        }
    }
}
