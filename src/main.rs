//! Filterkit - template filters and spam-resistant email links
//!
//! This is the main entry point for the Filterkit CLI.

mod cli;

use anyhow::Result;
use cli::commands::{CommandContext, Runnable};
use cli::{Cli, Commands};
use filterkit::config::Config;
use filterkit::telemetry::{LogLevel, LoggingBuilder};

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_code(&err)
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration before logging, which it configures
    let config = Config::load(cli.config.as_ref())?;

    init_logging(&config, cli.verbosity());
    tracing::debug!(version = filterkit::version(), "filterkit starting");

    // Create command context
    let mut ctx = CommandContext::new(config);

    // Execute the appropriate command
    match &cli.command {
        Commands::Render(args) => args.run(&mut ctx),
        Commands::Mailto(args) => args.run(&mut ctx),
    }
}

/// Initialize logging; each `-v` raises the configured level.
fn init_logging(config: &Config, verbosity: u8) {
    let mut builder = LoggingBuilder::from_config(config.logging.clone());
    if verbosity > 0 {
        builder = builder.with_level(LogLevel::from_verbosity(verbosity));
    }
    if let Err(e) = builder.init() {
        eprintln!("Warning: Failed to initialize logging: {e}");
    }
}

/// Exit status for a failed command.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<filterkit::Error>()
        .map_or(1, filterkit::Error::exit_code)
}
