//! Session owning the active backend
//!
//! A session holds exactly one backend plus the runtime arguments set with
//! `:docker` (or `--args`). It is the only place commands are dispatched
//! from, and it always validates arguments before the backend sees them.

use tracing::{debug, info};

use super::report::StatusReport;
use crate::backend::{Backend, CommandResult};
use crate::error::{DockyterError, Result};
use crate::security::check_args;

/// Active backend and its current runtime arguments.
#[derive(Debug, Default)]
pub struct Session {
    backend: Backend,
    args: String,
}

impl Session {
    /// Create a session on the given backend with no runtime arguments.
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            args: String::new(),
        }
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Current runtime arguments
    pub fn args(&self) -> &str {
        &self.args
    }

    /// Replace the runtime arguments. Rejected arguments leave the previous
    /// ones in place.
    pub fn set_args(&mut self, args: &str) -> Result<()> {
        check_args(args)?;
        self.args = args.trim().to_string();
        debug!(args = %self.args, "runtime arguments updated");
        Ok(())
    }

    /// Swap in a new backend. The old backend is dropped and the runtime
    /// arguments are cleared so nothing carries over.
    pub fn switch_backend(&mut self, backend: Backend) {
        info!(from = %self.backend.describe(), to = %backend.describe(), "switching backend");
        self.backend = backend;
        self.args.clear();
    }

    /// Run a command with the session's runtime arguments.
    pub fn run(&self, command: &str) -> Result<CommandResult> {
        self.run_with_args(command, &self.args)
    }

    /// Run a command with one-off runtime arguments, leaving the stored
    /// arguments untouched.
    pub fn run_with_args(&self, command: &str, args: &str) -> Result<CommandResult> {
        check_args(args)?;
        self.backend.execute(command, args)
    }

    /// Probe the backend and build a report.
    pub fn status(&self, redirected: bool) -> StatusReport {
        StatusReport::new(&self.backend, self.backend.probe_status(), redirected, &self.args)
    }

    /// Fail with `RuntimeUnavailable` unless the backend probes healthy.
    pub fn ensure_available(&self) -> Result<()> {
        let status = self.backend.probe_status();
        if status.available {
            Ok(())
        } else {
            Err(DockyterError::RuntimeUnavailable(status.message))
        }
    }
}
