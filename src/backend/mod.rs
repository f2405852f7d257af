//! Execution backends
//!
//! A [`Backend`] runs a shell command inside a container and returns its
//! captured output. There are exactly two:
//! - [`DockerBackend`] spawns a local container runtime,
//! - [`ApiBackend`] relays to a remote execution API.
//!
//! Backends hold no per-command state. Runtime arguments are supplied on
//! every call and validated by the caller (see [`crate::security`]).

pub mod api;
pub mod docker;
pub mod result;
pub mod status;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

pub use api::{ApiBackend, ExecuteRequest};
pub use docker::DockerBackend;
pub use result::CommandResult;
pub use status::{ApiStatus, BackendStatus, DockerStatus};

use crate::error::{DockyterError, Result};

/// Which backend variant is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Docker,
    Api,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Docker => write!(f, "Docker"),
            BackendKind::Api => write!(f, "API"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = DockyterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "docker" => Ok(BackendKind::Docker),
            "api" => Ok(BackendKind::Api),
            other => Err(DockyterError::InvalidBackend(other.to_string())),
        }
    }
}

/// The active execution backend.
#[derive(Debug, Clone)]
pub enum Backend {
    Docker(DockerBackend),
    Api(ApiBackend),
}

impl Backend {
    pub fn docker() -> Self {
        Backend::Docker(DockerBackend::new())
    }

    pub fn api(base_url: &str) -> Result<Self> {
        Ok(Backend::Api(ApiBackend::new(base_url)?))
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Docker(_) => BackendKind::Docker,
            Backend::Api(_) => BackendKind::Api,
        }
    }

    /// Run `command` with the given runtime arguments.
    ///
    /// Arguments are not validated here; callers go through
    /// [`crate::security::check_args`] first.
    pub fn execute(&self, command: &str, args: &str) -> Result<CommandResult> {
        match self {
            Backend::Docker(docker) => Ok(docker.execute(command, args)),
            Backend::Api(api) => api.execute(command, args),
        }
    }

    /// Probe backend health. Always performs a fresh check.
    pub fn probe_status(&self) -> BackendStatus {
        match self {
            Backend::Docker(docker) => docker.probe().into(),
            Backend::Api(api) => api.probe().into(),
        }
    }

    /// Short human description, e.g. `API (http://host:8000)`.
    pub fn describe(&self) -> String {
        match self {
            Backend::Docker(docker) => format!("Docker ({})", docker.runtime()),
            Backend::Api(api) => format!("API ({})", api.base_url()),
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::docker()
    }
}
