use crate::logging;
use libregsync::{SyncConfig, Syncer};
use owo_colors::OwoColorize;

/// Handle the check subcommand: configuration, tool probe and login.
pub async fn handle_check(verbose: u8) {
    let config = match SyncConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    println!(
        "{} configuration loaded ({}/{})",
        "✓".green().bold(),
        config.registry,
        config.namespace
    );
    if let Err(e) = logging::init(verbose, None) {
        eprintln!("Error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let syncer = Syncer::new(config);
    match syncer.check_tool().await {
        Ok(version) => println!("{} copy tool: {}", "✓".green().bold(), version),
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
    match syncer.login().await {
        Ok(()) => println!(
            "{} logged in to {} as {}",
            "✓".green().bold(),
            syncer.config().registry,
            syncer.config().username
        ),
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}
