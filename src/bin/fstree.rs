//! fstree CLI Binary
//!
//! Exit code 0 on success, 1 on a failed verification or any fatal error.

use clap::Parser;
use fstree::cli::{map_error, Cli, RunContext};
use fstree::config::ConfigLoader;
use fstree::error::ApiError;
use fstree::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{debug, error};

fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, &config.logging);
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }
    debug!(?cli, "Parsed CLI arguments");

    match run(&cli, config) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

fn run(cli: &Cli, config: fstree::config::FstreeConfig) -> Result<bool, ApiError> {
    let context = RunContext::new(config, cli)?;
    let outcome = context.execute(&cli.command)?;
    println!("{}", outcome.output);
    Ok(outcome.success)
}

/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, base: &LoggingConfig) -> LoggingConfig {
    let mut config = base.clone();
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    config
}
