//! pipeline
//!
//! Sequential build / deploy / teardown orchestration.
//!
//! # Lifecycle
//!
//! A deploy run is strictly linear:
//!
//! ```text
//! build each selected image -> create network -> up requirements -> wait -> up apps
//! ```
//!
//! Teardown is `down requirements -> wait -> down apps`, and terminate is
//! teardown followed by a prune. There is no concurrency, no retry, and no
//! timeout: every collaborator call blocks until the engine process exits.
//!
//! # Failure policy
//!
//! Only the build phase enforces stop-on-failure (via
//! [`Settings::exit_on_fail`]): the first failed build aborts the run
//! before any further build or any deploy step. Every other step - push,
//! network creation, stack up/down, prune - is fire-and-forget: a non-zero
//! exit is reported as a warning with its exit code and the run continues.
//! This asymmetry is deliberate and covered by tests.

use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::core::config::DeployConfig;
use crate::core::settings::Settings;
use crate::core::types::Service;
use crate::docker::{ContainerEngine, DockerError};
use crate::ui::output::{self, Verbosity};

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An image build exited non-zero while stop-on-failure was active.
    #[error("image build failed: {image}")]
    BuildFailed {
        /// The image that failed to build
        image: String,
        /// Exit code of the build, `None` if signal-terminated
        code: Option<i32>,
    },

    /// The engine binary itself could not be run.
    #[error(transparent)]
    Engine(#[from] DockerError),
}

/// Human-readable exit code for warnings.
fn code_label(code: Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}

/// The pipeline runner.
///
/// Holds the injected engine plus the resolved settings; owns no state of
/// its own beyond the effective inter-stack delay.
pub struct Pipeline<'a> {
    engine: &'a dyn ContainerEngine,
    settings: &'a Settings,
    verbosity: Verbosity,
    delay: Duration,
}

impl<'a> Pipeline<'a> {
    /// Create a runner with the delay taken from settings.
    pub fn new(
        engine: &'a dyn ContainerEngine,
        settings: &'a Settings,
        verbosity: Verbosity,
    ) -> Self {
        Self {
            engine,
            settings,
            verbosity,
            delay: settings.delay(),
        }
    }

    /// Override the inter-stack delay (dry runs use zero).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Run the full build-and-deploy pipeline.
    pub fn deploy(&self, config: &DeployConfig) -> Result<(), PipelineError> {
        output::print("Building images...", self.verbosity);
        for service in &config.services {
            self.build_service(*service, config)?;
        }
        self.bring_up()
    }

    /// Build one service image, then tag and push it if a registry is set.
    fn build_service(&self, service: Service, config: &DeployConfig) -> Result<(), PipelineError> {
        let image = service.image(&config.tag);
        output::print(format!("Building image {}", image), self.verbosity);

        let status =
            self.engine
                .build_image(Path::new(service.dir_name()), &service.dockerfile(), &image)?;

        if !status.success() {
            if self.settings.exit_on_fail {
                output::error(format!(
                    "build of {} failed (exit code {}), aborting pipeline",
                    image,
                    code_label(status.code)
                ));
                return Err(PipelineError::BuildFailed {
                    image,
                    code: status.code,
                });
            }
            output::warn(
                format!(
                    "build of {} failed (exit code {}), continuing",
                    image,
                    code_label(status.code)
                ),
                self.verbosity,
            );
            return Ok(());
        }

        if let Some(registry) = &config.registry {
            self.push_service(service, &config.tag, registry)?;
        }
        Ok(())
    }

    /// Tag the freshly built image for the registry and push it.
    ///
    /// Neither step aborts the run; a failed tag skips the push.
    fn push_service(
        &self,
        service: Service,
        tag: &str,
        registry: &str,
    ) -> Result<(), PipelineError> {
        let local = service.image(tag);
        let remote = service.remote_image(registry, tag);
        output::print(format!("Pushing {} to {}...", local, registry), self.verbosity);

        let tagged = self.engine.tag_image(&local, &remote)?;
        if !tagged.success() {
            output::warn(
                format!(
                    "tagging {} failed (exit code {}), skipping push",
                    remote,
                    code_label(tagged.code)
                ),
                self.verbosity,
            );
            return Ok(());
        }

        let pushed = self.engine.push_image(&remote)?;
        if !pushed.success() {
            output::warn(
                format!(
                    "push of {} failed (exit code {})",
                    remote,
                    code_label(pushed.code)
                ),
                self.verbosity,
            );
        }
        Ok(())
    }

    /// Create the network and bring both stacks up, requirements first.
    fn bring_up(&self) -> Result<(), PipelineError> {
        let created = self.engine.create_network(&self.settings.network)?;
        if !created.success() {
            // Expected when the network already exists; the engine does not
            // offer an idempotent create.
            output::warn(
                format!(
                    "network create '{}' failed (exit code {}), it may already exist",
                    self.settings.network,
                    code_label(created.code)
                ),
                self.verbosity,
            );
        }

        output::print("Deploying requirements...", self.verbosity);
        let up = self.engine.compose_up(&self.settings.requirements_file)?;
        if !up.success() {
            output::warn(
                format!(
                    "requirements stack up failed (exit code {})",
                    code_label(up.code)
                ),
                self.verbosity,
            );
        }

        self.wait("to avoid eager connection issues");

        output::print("Deploying apps...", self.verbosity);
        let up = self.engine.compose_up(&self.settings.apps_file)?;
        if !up.success() {
            output::warn(
                format!("apps stack up failed (exit code {})", code_label(up.code)),
                self.verbosity,
            );
        }
        Ok(())
    }

    /// Bring both stacks down.
    ///
    /// Stops requirements before apps - the same order as bring-up, not the
    /// reverse. Long-standing behavior, kept for parity; see
    /// `teardown_mirrors_bring_up_order`.
    pub fn teardown(&self) -> Result<(), PipelineError> {
        output::print("Stopping requirements...", self.verbosity);
        let down = self.engine.compose_down(&self.settings.requirements_file)?;
        if !down.success() {
            output::warn(
                format!(
                    "requirements stack down failed (exit code {})",
                    code_label(down.code)
                ),
                self.verbosity,
            );
        }

        self.wait("for containers to stop");

        output::print("Stopping apps...", self.verbosity);
        let down = self.engine.compose_down(&self.settings.apps_file)?;
        if !down.success() {
            output::warn(
                format!("apps stack down failed (exit code {})", code_label(down.code)),
                self.verbosity,
            );
        }
        Ok(())
    }

    /// Prune unused engine resources. Destructive; confirmation happens at
    /// the CLI layer before this is called.
    pub fn prune(&self) -> Result<(), PipelineError> {
        output::print("Pruning unused engine resources...", self.verbosity);
        let status = self.engine.prune()?;
        if !status.success() {
            output::warn(
                format!("prune failed (exit code {})", code_label(status.code)),
                self.verbosity,
            );
        }
        Ok(())
    }

    fn wait(&self, reason: &str) {
        if self.delay.is_zero() {
            return;
        }
        output::print(
            format!("Waiting {} seconds {}...", self.delay.as_secs(), reason),
            self.verbosity,
        );
        std::thread::sleep(self.delay);
    }
}
