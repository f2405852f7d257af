//! Shell host that routes commands between the host shell and a session

use std::process::Command;

use tracing::{debug, warn};

use super::redirect::{Handler, Redirection};
use crate::backend::{Backend, CommandResult};
use crate::error::Result;
use crate::session::{Session, StatusReport};

/// Command sent by `connect` to confirm the container starts.
pub const CONNECT_PROBE: &str = "echo 'Connected'";

/// Runs lines on the host with `sh -c` (`cmd /C` on Windows).
#[derive(Debug, Clone, Default)]
pub struct HostShell;

impl HostShell {
    pub fn run(&self, line: &str) -> CommandResult {
        let output = if cfg!(windows) {
            Command::new("cmd").arg("/C").arg(line).output()
        } else {
            Command::new("sh").arg("-c").arg(line).output()
        };

        match output {
            Ok(output) => CommandResult::from_bytes(&output.stdout, &output.stderr),
            Err(e) => {
                warn!(error = %e, "failed to launch host shell");
                CommandResult::new("", format!("Failed to launch host shell: {}", e))
            }
        }
    }
}

/// Host-side collaborator owning the session and the redirection slot.
#[derive(Debug, Default)]
pub struct ShellHost {
    session: Session,
    redirection: Redirection,
    host: HostShell,
}

impl ShellHost {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            redirection: Redirection::new(),
            host: HostShell,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_redirected(&self) -> bool {
        self.redirection.is_enabled()
    }

    /// Send plain shell lines to the container from now on.
    pub fn redirect_on(&mut self) -> usize {
        self.redirection.enable()
    }

    /// Undo one `redirect_on`.
    pub fn redirect_off(&mut self) -> Result<usize> {
        self.redirection.disable()
    }

    /// Store runtime arguments, turn redirection on, and run a connection
    /// check in the container.
    pub fn connect(&mut self, args: &str) -> Result<CommandResult> {
        self.session.set_args(args)?;
        if !self.redirection.is_enabled() {
            self.redirection.enable();
        }
        self.session.run(CONNECT_PROBE)
    }

    /// Run a plain line through whichever handler is current.
    pub fn dispatch(&self, line: &str) -> Result<CommandResult> {
        match self.redirection.current() {
            Handler::Container => {
                debug!(line, "dispatching to container");
                self.session.run(line)
            }
            Handler::Host => {
                debug!(line, "dispatching to host shell");
                Ok(self.host.run(line))
            }
        }
    }

    /// Run a block of text as one containerized command with its own
    /// runtime arguments.
    pub fn run_block(&self, args: &str, block: &str) -> Result<CommandResult> {
        self.session.run_with_args(block, args)
    }

    pub fn switch_backend(&mut self, backend: Backend) {
        self.session.switch_backend(backend);
    }

    pub fn status(&self) -> StatusReport {
        self.session.status(self.is_redirected())
    }
}
