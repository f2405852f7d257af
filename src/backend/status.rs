//! Backend health classification
//!
//! Probes are never cached. Each call to a backend's `probe_status` spawns a
//! fresh diagnostic process or issues a fresh HTTP request, and the result is
//! classified here.

use serde::Serialize;

pub const DOCKER_NOT_INSTALLED: &str = "Docker is not installed or not found in PATH.";
pub const DOCKER_DAEMON_NOT_RUNNING: &str = "Docker is installed but the daemon is not running.";
pub const DOCKER_HEALTHY: &str = "Docker is installed and the daemon is running.";

/// Markers in `docker info` output meaning the client could not reach the
/// daemon. Matched case-insensitively as substrings.
pub const DAEMON_FAILURE_MARKERS: &[&str] = &[
    "cannot connect to the docker daemon",
    "is the docker daemon running",
    "error during connect",
    "connection refused",
    "daemon is not running",
];

/// Health of the local container runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DockerStatus {
    NotInstalled,
    DaemonUnreachable,
    Healthy,
}

impl DockerStatus {
    /// Not-installed takes precedence over daemon state.
    pub fn classify(installed: bool, daemon_running: bool) -> Self {
        match (installed, daemon_running) {
            (false, _) => DockerStatus::NotInstalled,
            (true, false) => DockerStatus::DaemonUnreachable,
            (true, true) => DockerStatus::Healthy,
        }
    }

    pub fn daemon_running(&self) -> bool {
        matches!(self, DockerStatus::Healthy)
    }

    pub fn message(&self) -> &'static str {
        match self {
            DockerStatus::NotInstalled => DOCKER_NOT_INSTALLED,
            DockerStatus::DaemonUnreachable => DOCKER_DAEMON_NOT_RUNNING,
            DockerStatus::Healthy => DOCKER_HEALTHY,
        }
    }
}

/// True when diagnostic output shows the daemon could not be reached.
pub fn has_daemon_failure_marker(output: &str) -> bool {
    let lower = output.to_lowercase();
    DAEMON_FAILURE_MARKERS.iter().any(|m| lower.contains(m))
}

/// Health of a remote execution API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ApiStatus {
    Unreachable(String),
    Healthy(String),
}

impl ApiStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, ApiStatus::Healthy(_))
    }

    pub fn message(&self) -> &str {
        match self {
            ApiStatus::Unreachable(msg) | ApiStatus::Healthy(msg) => msg,
        }
    }
}

/// Backend-agnostic `(available, message)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendStatus {
    pub available: bool,
    pub message: String,
}

impl From<DockerStatus> for BackendStatus {
    fn from(status: DockerStatus) -> Self {
        Self {
            available: status.daemon_running(),
            message: status.message().to_string(),
        }
    }
}

impl From<ApiStatus> for BackendStatus {
    fn from(status: ApiStatus) -> Self {
        Self {
            available: status.is_healthy(),
            message: status.message().to_string(),
        }
    }
}
