//! CLI module for Filterkit
//!
//! This module provides the command-line interface for Filterkit,
//! including argument parsing and subcommand handling.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Filterkit - template filters and spam-resistant email links
///
/// Renders templates with the Filterkit extensions installed, or renders a
/// single email address the way the `mailto` filter does.
#[derive(Parser, Debug, Clone)]
#[command(name = "filterkit")]
#[command(author = "Filterkit Contributors")]
#[command(version)]
#[command(about = "Template filters and spam-resistant email links", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv, -vvvv)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true, env = "FILTERKIT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render a template file to stdout
    Render(commands::RenderArgs),

    /// Render one email address to stdout
    Mailto(commands::MailtoArgs),
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Get the effective verbosity level (0-4)
    pub fn verbosity(&self) -> u8 {
        self.verbose.min(4)
    }
}
