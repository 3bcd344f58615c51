//! deploy mode - build selected images and bring the stacks up

use std::time::Duration;

use anyhow::Result;

use crate::core::config::{ConfigResult, DeployConfig, DeployFlags};
use crate::core::settings::Settings;
use crate::docker::ContainerEngine;
use crate::pipeline::Pipeline;
use crate::ui::output::{self, Verbosity};

/// Build the run configuration and hand it to the pipeline.
///
/// Configuration warnings (trailing `--version`, `--repo` without
/// `--push`) are reported here and are never fatal.
pub fn deploy(
    engine: &dyn ContainerEngine,
    settings: &Settings,
    verbosity: Verbosity,
    delay: Duration,
    flags: &DeployFlags,
) -> Result<()> {
    let ConfigResult { config, warnings } = DeployConfig::from_flags(flags, settings);
    for warning in &warnings {
        output::warn(warning, verbosity);
    }

    output::debug(
        format!(
            "deploying {} service(s), tag '{}', registry {:?}",
            config.services.len(),
            config.tag,
            config.registry
        ),
        verbosity,
    );

    Pipeline::new(engine, settings, verbosity)
        .with_delay(delay)
        .deploy(&config)?;
    Ok(())
}
