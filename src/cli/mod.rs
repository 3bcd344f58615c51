//! cli
//!
//! Command-line interface layer for Stackup.
//!
//! # Responsibilities
//!
//! - Parse command-line flags
//! - Resolve the working directory and settings
//! - Delegate to the mode handlers in [`commands`]
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses flags via clap and dispatches to the
//! [`crate::pipeline`] through a container engine chosen here (the real
//! CLI-backed one, or the dry-run one). Handlers never spawn engine
//! processes themselves.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::{Context, Result};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    // Resolve --cwd before anything reads settings or spawns commands, so
    // relative build contexts and compose file paths line up.
    if let Some(dir) = &cli.cwd {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to '{}'", dir.display()))?;
    }

    commands::dispatch(cli)
}
