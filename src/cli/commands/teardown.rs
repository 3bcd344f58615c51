//! teardown modes - `--end` stops the stacks, `--terminate` also prunes
//!
//! The prune is the one destructive operation the tool performs, so it is
//! gated separately: `--force` (or a dry run) pre-approves it, otherwise an
//! interactive confirmation is required. Teardown itself always runs first
//! either way.

use std::time::Duration;

use anyhow::{bail, Result};

use crate::core::settings::Settings;
use crate::docker::ContainerEngine;
use crate::pipeline::Pipeline;
use crate::ui::output::{self, Verbosity};
use crate::ui::prompts::{self, PromptError};

/// Stop both compose stacks.
pub fn end(
    engine: &dyn ContainerEngine,
    settings: &Settings,
    verbosity: Verbosity,
    delay: Duration,
) -> Result<()> {
    Pipeline::new(engine, settings, verbosity)
        .with_delay(delay)
        .teardown()?;
    Ok(())
}

/// Stop both compose stacks, then prune unused engine resources.
///
/// `confirmed` pre-approves the prune; otherwise the user is prompted.
/// Declining the prompt skips the prune but still exits successfully -
/// the teardown already happened.
pub fn terminate(
    engine: &dyn ContainerEngine,
    settings: &Settings,
    verbosity: Verbosity,
    delay: Duration,
    confirmed: bool,
    interactive: bool,
) -> Result<()> {
    let pipeline = Pipeline::new(engine, settings, verbosity).with_delay(delay);
    pipeline.teardown()?;

    if !confirmed {
        match prompts::confirm(
            "Prune ALL unused engine resources (images, containers, networks)?",
            false,
            interactive,
        ) {
            Ok(true) => {}
            Ok(false) => {
                output::print("Skipping prune.", verbosity);
                return Ok(());
            }
            Err(PromptError::NotInteractive) => {
                bail!("refusing to prune without confirmation; re-run with --force")
            }
            Err(err) => return Err(err.into()),
        }
    }

    pipeline.prune()?;
    Ok(())
}
