//! Local container runtime backend
//!
//! Commands run as `<runtime> run --rm <args...> bash -lc <command>` in a
//! blocking child process. The runtime binary defaults to `docker` but any
//! CLI-compatible runtime (podman, nerdctl) works.

use std::io::ErrorKind;
use std::process::Command;

use tracing::{debug, warn};

use super::result::CommandResult;
use super::status::{has_daemon_failure_marker, DockerStatus};
use crate::security::tokenize_args;

pub const DEFAULT_RUNTIME: &str = "docker";

/// Executes commands through a local container runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerBackend {
    runtime: String,
}

impl DockerBackend {
    pub fn new() -> Self {
        Self::with_runtime(DEFAULT_RUNTIME)
    }

    /// Use a different runtime binary, by name or path.
    pub fn with_runtime(runtime: impl Into<String>) -> Self {
        Self {
            runtime: runtime.into(),
        }
    }

    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    /// Arguments passed to the runtime binary for one command.
    pub fn build_invocation(&self, command: &str, args: &str) -> Vec<String> {
        let mut argv = vec!["run".to_string(), "--rm".to_string()];
        argv.extend(tokenize_args(args).into_iter().map(String::from));
        argv.push("bash".to_string());
        argv.push("-lc".to_string());
        argv.push(command.to_string());
        argv
    }

    /// Run `command` in a fresh container and capture its output.
    ///
    /// The exit code is discarded. If the runtime cannot be launched the
    /// launch error ends up in `stderr` and `stdout` is empty.
    pub fn execute(&self, command: &str, args: &str) -> CommandResult {
        let argv = self.build_invocation(command, args);
        debug!(runtime = %self.runtime, ?argv, "spawning container");

        match Command::new(&self.runtime).args(&argv).output() {
            Ok(output) => {
                debug!(status = ?output.status, "container exited");
                CommandResult::from_bytes(&output.stdout, &output.stderr)
            }
            Err(e) => {
                warn!(runtime = %self.runtime, error = %e, "failed to launch container runtime");
                CommandResult::new("", format!("Failed to launch '{}': {}", self.runtime, e))
            }
        }
    }

    /// Run `<runtime> info` and classify the result.
    pub fn probe(&self) -> DockerStatus {
        let output = match Command::new(&self.runtime).arg("info").output() {
            Ok(output) => output,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    warn!(runtime = %self.runtime, error = %e, "runtime diagnostic failed to launch");
                }
                return DockerStatus::classify(false, false);
            }
        };

        // 126/127 are what wrapper scripts report for a missing binary.
        let installed = !matches!(output.status.code(), Some(126) | Some(127));
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let daemon_running = output.status.success()
            && !has_daemon_failure_marker(&stderr)
            && !has_daemon_failure_marker(&stdout);

        debug!(installed, daemon_running, "runtime probe finished");
        DockerStatus::classify(installed, daemon_running)
    }
}

impl Default for DockerBackend {
    fn default() -> Self {
        Self::new()
    }
}
