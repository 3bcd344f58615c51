//! docker
//!
//! Single interface to the container engine CLI.
//!
//! # Architecture
//!
//! This module is the **only doorway** to the container engine. Every
//! `docker` / `docker-compose` invocation in the codebase flows through the
//! [`ContainerEngine`] trait, so the pipeline can be exercised against a
//! recording mock in tests and against [`DryRun`] with `--dry-run`.
//!
//! # Invocation model
//!
//! Commands are spawned as structured argv (executable plus argument list),
//! never as interpolated shell strings, so tags and registry names cannot
//! smuggle shell metacharacters into the invocation.
//!
//! # Failure model
//!
//! The collaborator's stdout/stderr are inherited, not captured; the only
//! signal the tool consumes is the exit code, reduced to a
//! [`CommandStatus`]. Failing to spawn the binary at all (engine not
//! installed) is a distinct, typed [`DockerError`].

mod interface;

pub use interface::{CommandStatus, ContainerEngine, DockerCli, DockerError, DryRun};
