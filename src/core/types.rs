//! core::types
//!
//! The closed set of deployable services.
//!
//! Each service maps 1:1 to a build-context directory containing a
//! `Dockerfile`. The set is fixed; there is no discovery mechanism. Build
//! order always follows [`Service::ALL`] declaration order.

use std::fmt;
use std::path::PathBuf;

/// One of the four deployable units of the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// REST gateway consumed by end users.
    Backend,
    /// Subscription bookkeeping service.
    Subscription,
    /// Outbound email worker.
    Email,
    /// Backing database image.
    Database,
}

impl Service {
    /// All services, in canonical build order.
    pub const ALL: [Service; 4] = [
        Service::Backend,
        Service::Subscription,
        Service::Email,
        Service::Database,
    ];

    /// Name of the build-context directory for this service.
    ///
    /// Directories are expected to be siblings of the working directory
    /// the tool runs from (see the `--cwd` flag).
    pub fn dir_name(&self) -> &'static str {
        match self {
            Service::Backend => "backend-service",
            Service::Subscription => "subscription-service",
            Service::Email => "email-service",
            Service::Database => "database",
        }
    }

    /// Path to the service's Dockerfile, relative to the working directory.
    pub fn dockerfile(&self) -> PathBuf {
        PathBuf::from(self.dir_name()).join("Dockerfile")
    }

    /// Local image reference for this service at the given tag.
    pub fn image(&self, tag: &str) -> String {
        format!("{}:{}", self.dir_name(), tag)
    }

    /// Remote image reference under a registry.
    pub fn remote_image(&self, registry: &str, tag: &str) -> String {
        format!("{}/{}:{}", registry, self.dir_name(), tag)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}
