//! core::settings
//!
//! Process-wide settings, resolved once at startup.
//!
//! # Precedence
//!
//! 1. Built-in defaults (matching the values the platform has always used)
//! 2. `stackup.toml` in the working directory, if present
//!
//! A missing settings file is not an error; a malformed one is. CLI flags
//! (`--version`, `--repo`) override individual values downstream when the
//! [`crate::core::config::DeployConfig`] is built.
//!
//! # Example
//!
//! ```toml
//! default_tag = "DEV"
//! default_registry = "moconinja"
//! network = "subscriptions_network"
//! delay_secs = 10
//! exit_on_fail = true
//! requirements_file = "docker-compose-requirements.yml"
//! apps_file = "docker-compose-apps.yml"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the optional settings file, looked up in the working directory.
pub const SETTINGS_FILE: &str = "stackup.toml";

/// Errors from settings loading.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },
}

/// Resolved process-wide settings.
///
/// Constructed once per invocation and passed by reference into the
/// pipeline; nothing mutates it after load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Tag applied to built images when `--version` is not given.
    pub default_tag: String,

    /// Registry used when `--push` is given without `--repo`.
    pub default_registry: String,

    /// Name of the dedicated network created before bringing stacks up.
    pub network: String,

    /// Seconds to wait between the requirements stack and the apps stack,
    /// on the way up and on the way down.
    pub delay_secs: u64,

    /// Abort the whole run on the first failed image build.
    ///
    /// Only the build phase honors this; compose and network failures are
    /// reported but never abort (see the pipeline module docs).
    pub exit_on_fail: bool,

    /// Compose file defining the "requirements" stack (database, queue, ...).
    pub requirements_file: PathBuf,

    /// Compose file defining the "apps" stack (the microservices).
    pub apps_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_tag: "DEV".to_string(),
            default_registry: "moconinja".to_string(),
            network: "subscriptions_network".to_string(),
            delay_secs: 10,
            exit_on_fail: true,
            requirements_file: PathBuf::from("docker-compose-requirements.yml"),
            apps_file: PathBuf::from("docker-compose-apps.yml"),
        }
    }
}

impl Settings {
    /// Load settings from `stackup.toml` in `dir`, falling back to defaults
    /// when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(dir: &Path) -> Result<Self, SettingsError> {
        let path = dir.join(SETTINGS_FILE);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(SettingsError::ReadError { path, source: err });
            }
        };

        toml::from_str(&text).map_err(|err| SettingsError::ParseError {
            path,
            message: err.to_string(),
        })
    }

    /// The inter-stack stabilization delay as a [`Duration`].
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_platform_conventions() {
        let settings = Settings::default();
        assert_eq!(settings.default_tag, "DEV");
        assert_eq!(settings.default_registry, "moconinja");
        assert_eq!(settings.network, "subscriptions_network");
        assert_eq!(settings.delay_secs, 10);
        assert!(settings.exit_on_fail);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILE),
            "default_tag = \"v9\"\ndelay_secs = 0\n",
        )
        .unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.default_tag, "v9");
        assert_eq!(settings.delay_secs, 0);
        // Untouched keys keep their defaults.
        assert_eq!(settings.network, "subscriptions_network");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "defualt_tag = \"oops\"\n").unwrap();

        let err = Settings::load(dir.path()).unwrap_err();
        assert!(matches!(err, SettingsError::ParseError { .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "delay_secs = ").unwrap();

        let err = Settings::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }
}
