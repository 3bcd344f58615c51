//! cli::commands
//!
//! Mode dispatch and handlers.
//!
//! # Precedence
//!
//! Modes are evaluated in a fixed order: help (handled by clap) >
//! completion > `--end` > `--terminate` > build-and-deploy. When both
//! `--end` and `--terminate` are given, `--end` wins and no prune happens.
//!
//! # Engine selection
//!
//! The container engine is constructed once here - [`DryRun`] under
//! `--dry-run` (which also zeroes the inter-stack delay), [`DockerCli`]
//! otherwise - and passed by reference into the handlers so the pipeline
//! never knows which one it is talking to.

mod completion;
mod deploy;
mod teardown;

pub use completion::completion;
pub use deploy::deploy;
pub use teardown::{end, terminate};

use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use crate::cli::args::Cli;
use crate::core::settings::Settings;
use crate::docker::{ContainerEngine, DockerCli, DryRun};
use crate::ui::output::Verbosity;

/// Dispatch the parsed flags to the right mode handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    if let Some(shell) = cli.completion {
        return completion::completion(shell);
    }

    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    let settings = Settings::load(Path::new("."))?;

    let engine: Box<dyn ContainerEngine> = if cli.dry_run {
        Box::new(DryRun)
    } else {
        Box::new(DockerCli::new(verbosity))
    };
    let delay = if cli.dry_run {
        Duration::ZERO
    } else {
        settings.delay()
    };

    if cli.end {
        return teardown::end(&*engine, &settings, verbosity, delay);
    }
    if cli.terminate {
        // Dry runs skip the prompt: nothing destructive will happen.
        let confirmed = cli.force || cli.dry_run;
        return teardown::terminate(
            &*engine,
            &settings,
            verbosity,
            delay,
            confirmed,
            cli.interactive(),
        );
    }

    deploy::deploy(&*engine, &settings, verbosity, delay, &cli.deploy_flags())
}
