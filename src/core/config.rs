//! core::config
//!
//! Per-run deploy configuration.
//!
//! # Overview
//!
//! [`DeployConfig`] captures everything a build-and-deploy run needs: the
//! ordered list of services to build, the image tag, and the optional push
//! registry. It is constructed exactly once from the parsed flags plus the
//! resolved [`Settings`], and is immutable afterwards.
//!
//! # Selection rules
//!
//! - `--all` selects every service and supersedes individual flags
//! - individual flags append services in canonical order
//! - an empty selection defaults to every service
//! - a registry is only kept when `--push` was given; `--repo` alone is
//!   discarded with a warning
//!
//! Construction is pure: warnings are collected into the returned
//! [`ConfigResult`] rather than printed here, so the rules are directly
//! unit-testable.

use crate::core::settings::Settings;
use crate::core::types::Service;

/// Flag values relevant to building a [`DeployConfig`].
///
/// The CLI layer maps clap output into this struct; tests construct it
/// directly. `version` and `repo` are doubly optional: the outer `Option`
/// is flag presence, the inner one is value presence (a trailing
/// `--version` with no value parses as `Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct DeployFlags {
    pub all: bool,
    pub backend: bool,
    pub subscription: bool,
    pub email: bool,
    pub database: bool,
    pub version: Option<Option<String>>,
    pub repo: Option<Option<String>>,
    pub push: bool,
}

/// Immutable description of one build-and-deploy run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    /// Services to build, in build order. Never empty.
    pub services: Vec<Service>,
    /// Tag applied to every built image.
    pub tag: String,
    /// Registry to push to; `None` disables the push step entirely.
    pub registry: Option<String>,
}

/// A [`DeployConfig`] plus any warnings produced while building it.
///
/// Warnings are non-fatal by contract: a malformed optional value falls
/// back to its default and the run continues.
#[derive(Debug, Clone)]
pub struct ConfigResult {
    pub config: DeployConfig,
    pub warnings: Vec<String>,
}

impl DeployConfig {
    /// Build the run configuration from parsed flags and settings.
    pub fn from_flags(flags: &DeployFlags, settings: &Settings) -> ConfigResult {
        let mut warnings = Vec::new();

        let mut services = Vec::new();
        if flags.all {
            services.extend(Service::ALL);
        } else {
            if flags.backend {
                services.push(Service::Backend);
            }
            if flags.subscription {
                services.push(Service::Subscription);
            }
            if flags.email {
                services.push(Service::Email);
            }
            if flags.database {
                services.push(Service::Database);
            }
        }
        if services.is_empty() {
            services.extend(Service::ALL);
        }

        let tag = match &flags.version {
            Some(Some(tag)) => tag.clone(),
            Some(None) => {
                warnings.push(format!(
                    "--version given without a value, using default tag '{}'",
                    settings.default_tag
                ));
                settings.default_tag.clone()
            }
            None => settings.default_tag.clone(),
        };

        let registry = if flags.push {
            match &flags.repo {
                Some(Some(repo)) => Some(repo.clone()),
                Some(None) => {
                    warnings.push(format!(
                        "--repo given without a value, using default registry '{}'",
                        settings.default_registry
                    ));
                    Some(settings.default_registry.clone())
                }
                None => Some(settings.default_registry.clone()),
            }
        } else {
            if flags.repo.is_some() {
                warnings.push("--repo has no effect without --push, skipping the push".to_string());
            }
            None
        };

        ConfigResult {
            config: DeployConfig {
                services,
                tag,
                registry,
            },
            warnings,
        }
    }
}
