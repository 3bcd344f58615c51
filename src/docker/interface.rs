//! docker::interface
//!
//! Container engine trait, the CLI-backed implementation, and the dry-run
//! implementation.
//!
//! See the module docs on [`crate::docker`] for the invocation and failure
//! model. The surface is deliberately narrow: exactly the seven operations
//! the pipeline performs, nothing engine-version specific.

use std::path::Path;
use std::process::Command;

use thiserror::Error;

use crate::ui::output::{self, Verbosity};

/// Binary used for image and network operations.
const DOCKER: &str = "docker";

/// Binary used for stack operations.
const COMPOSE: &str = "docker-compose";

/// Errors from container engine invocations.
///
/// Note that a *non-zero exit* is not an error at this layer - it is a
/// [`CommandStatus`] the caller inspects. Only failing to run the binary
/// at all surfaces here.
#[derive(Debug, Error)]
pub enum DockerError {
    /// The engine binary could not be spawned (missing, not executable, ...).
    #[error("failed to run '{program}': {source}")]
    Spawn {
        /// The binary that could not be started
        program: String,
        /// The underlying OS error
        source: std::io::Error,
    },
}

/// Exit status of a collaborator invocation, reduced to what the pipeline
/// consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub code: Option<i32>,
}

impl CommandStatus {
    /// Status representing a clean exit.
    pub const OK: CommandStatus = CommandStatus { code: Some(0) };

    /// Whether the invocation exited cleanly.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for CommandStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        CommandStatus {
            code: status.code(),
        }
    }
}

/// The container engine, as seen by the pipeline.
///
/// One method per collaborator command shape. Implementations must be
/// synchronous; the pipeline is strictly sequential and blocks on every
/// call.
pub trait ContainerEngine {
    /// `docker build <context> -t <image> -f <dockerfile>`
    fn build_image(
        &self,
        context: &Path,
        dockerfile: &Path,
        image: &str,
    ) -> Result<CommandStatus, DockerError>;

    /// `docker tag <source> <target>`
    fn tag_image(&self, source: &str, target: &str) -> Result<CommandStatus, DockerError>;

    /// `docker push <image>`
    fn push_image(&self, image: &str) -> Result<CommandStatus, DockerError>;

    /// `docker network create <name>`
    fn create_network(&self, name: &str) -> Result<CommandStatus, DockerError>;

    /// `docker-compose -f <file> up -d`
    fn compose_up(&self, file: &Path) -> Result<CommandStatus, DockerError>;

    /// `docker-compose -f <file> down`
    fn compose_down(&self, file: &Path) -> Result<CommandStatus, DockerError>;

    /// `docker system prune -f`
    ///
    /// Destructive. Callers are responsible for confirmation gating; this
    /// layer always passes `-f`.
    fn prune(&self) -> Result<CommandStatus, DockerError>;
}

/// Render an argv as a single display line for logging.
fn render(program: &str, args: &[String]) -> String {
    let mut line = String::from(program);
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// The real engine, backed by the `docker` and `docker-compose` binaries.
///
/// stdout/stderr of the spawned processes are inherited so the engine's own
/// output (build logs, compose progress) reaches the terminal unchanged.
#[derive(Debug, Clone)]
pub struct DockerCli {
    verbosity: Verbosity,
}

impl DockerCli {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    fn run(&self, program: &str, args: Vec<String>) -> Result<CommandStatus, DockerError> {
        output::debug(format!("running: {}", render(program, &args)), self.verbosity);

        let status = Command::new(program)
            .args(&args)
            .status()
            .map_err(|err| DockerError::Spawn {
                program: program.to_string(),
                source: err,
            })?;

        let status = CommandStatus::from(status);
        output::debug(
            format!("exit code {:?} from {}", status.code, program),
            self.verbosity,
        );
        Ok(status)
    }
}

impl ContainerEngine for DockerCli {
    fn build_image(
        &self,
        context: &Path,
        dockerfile: &Path,
        image: &str,
    ) -> Result<CommandStatus, DockerError> {
        self.run(
            DOCKER,
            vec![
                "build".to_string(),
                context.display().to_string(),
                "-t".to_string(),
                image.to_string(),
                "-f".to_string(),
                dockerfile.display().to_string(),
            ],
        )
    }

    fn tag_image(&self, source: &str, target: &str) -> Result<CommandStatus, DockerError> {
        self.run(
            DOCKER,
            vec!["tag".to_string(), source.to_string(), target.to_string()],
        )
    }

    fn push_image(&self, image: &str) -> Result<CommandStatus, DockerError> {
        self.run(DOCKER, vec!["push".to_string(), image.to_string()])
    }

    fn create_network(&self, name: &str) -> Result<CommandStatus, DockerError> {
        self.run(
            DOCKER,
            vec![
                "network".to_string(),
                "create".to_string(),
                name.to_string(),
            ],
        )
    }

    fn compose_up(&self, file: &Path) -> Result<CommandStatus, DockerError> {
        self.run(
            COMPOSE,
            vec![
                "-f".to_string(),
                file.display().to_string(),
                "up".to_string(),
                "-d".to_string(),
            ],
        )
    }

    fn compose_down(&self, file: &Path) -> Result<CommandStatus, DockerError> {
        self.run(
            COMPOSE,
            vec![
                "-f".to_string(),
                file.display().to_string(),
                "down".to_string(),
            ],
        )
    }

    fn prune(&self) -> Result<CommandStatus, DockerError> {
        self.run(
            DOCKER,
            vec![
                "system".to_string(),
                "prune".to_string(),
                "-f".to_string(),
            ],
        )
    }
}

/// Engine that prints each command instead of running it.
///
/// Every call reports success, so `--dry-run` walks the full happy path of
/// the pipeline.
#[derive(Debug, Clone, Default)]
pub struct DryRun;

impl DryRun {
    fn would_run(&self, program: &str, args: Vec<String>) -> Result<CommandStatus, DockerError> {
        println!("would run: {}", render(program, &args));
        Ok(CommandStatus::OK)
    }
}

impl ContainerEngine for DryRun {
    fn build_image(
        &self,
        context: &Path,
        dockerfile: &Path,
        image: &str,
    ) -> Result<CommandStatus, DockerError> {
        self.would_run(
            DOCKER,
            vec![
                "build".to_string(),
                context.display().to_string(),
                "-t".to_string(),
                image.to_string(),
                "-f".to_string(),
                dockerfile.display().to_string(),
            ],
        )
    }

    fn tag_image(&self, source: &str, target: &str) -> Result<CommandStatus, DockerError> {
        self.would_run(
            DOCKER,
            vec!["tag".to_string(), source.to_string(), target.to_string()],
        )
    }

    fn push_image(&self, image: &str) -> Result<CommandStatus, DockerError> {
        self.would_run(DOCKER, vec!["push".to_string(), image.to_string()])
    }

    fn create_network(&self, name: &str) -> Result<CommandStatus, DockerError> {
        self.would_run(
            DOCKER,
            vec![
                "network".to_string(),
                "create".to_string(),
                name.to_string(),
            ],
        )
    }

    fn compose_up(&self, file: &Path) -> Result<CommandStatus, DockerError> {
        self.would_run(
            COMPOSE,
            vec![
                "-f".to_string(),
                file.display().to_string(),
                "up".to_string(),
                "-d".to_string(),
            ],
        )
    }

    fn compose_down(&self, file: &Path) -> Result<CommandStatus, DockerError> {
        self.would_run(
            COMPOSE,
            vec![
                "-f".to_string(),
                file.display().to_string(),
                "down".to_string(),
            ],
        )
    }

    fn prune(&self) -> Result<CommandStatus, DockerError> {
        self.would_run(
            DOCKER,
            vec![
                "system".to_string(),
                "prune".to_string(),
                "-f".to_string(),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_status_success_requires_exit_zero() {
        assert!(CommandStatus::OK.success());
        assert!(!CommandStatus { code: Some(1) }.success());
        // Signal-terminated processes count as failures.
        assert!(!CommandStatus { code: None }.success());
    }

    #[test]
    fn render_joins_program_and_args() {
        let args = vec!["build".to_string(), ".".to_string()];
        assert_eq!(render("docker", &args), "docker build .");
    }
}
