//! core
//!
//! Domain types and configuration for the deploy pipeline.
//!
//! # Responsibilities
//!
//! - [`types`] - The closed set of deployable services and image naming
//! - [`config`] - The per-run [`config::DeployConfig`] built from CLI flags
//! - [`settings`] - Process-wide defaults, optionally overridden by `stackup.toml`
//!
//! This layer has no knowledge of the container engine or of clap. It only
//! describes *what* a run should do; [`crate::pipeline`] decides *how*.

pub mod config;
pub mod settings;
pub mod types;

pub use config::{ConfigResult, DeployConfig, DeployFlags};
pub use settings::{Settings, SettingsError, SETTINGS_FILE};
pub use types::Service;
