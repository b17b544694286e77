//! Subcommands module for Filterkit CLI
//!
//! This module contains all the subcommand implementations.

pub mod mailto;
pub mod render;

pub use mailto::MailtoArgs;
pub use render::RenderArgs;

use anyhow::Result;
use filterkit::config::Config;

/// Common context shared between commands
pub struct CommandContext {
    /// Configuration
    pub config: Config,
}

impl CommandContext {
    /// Create a new command context from loaded configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

/// Trait for runnable commands
pub trait Runnable {
    /// Execute the command, returning the process exit code
    fn run(&self, ctx: &mut CommandContext) -> Result<i32>;
}
