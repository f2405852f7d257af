//! Reference-counted redirection of the default command handler

use crate::error::{DockyterError, Result};

/// Where plain shell lines are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// The host's own shell
    Host,
    /// The session's active backend
    Container,
}

/// The single "current handler" slot of a shell host.
///
/// Every `enable` must be paired with a `disable`; lines go to the container
/// while at least one opt-in is outstanding.
#[derive(Debug, Default)]
pub struct Redirection {
    depth: usize,
}

impl Redirection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opt in. Returns the new depth.
    pub fn enable(&mut self) -> usize {
        self.depth += 1;
        self.depth
    }

    /// Opt out. Fails when there is nothing to undo.
    pub fn disable(&mut self) -> Result<usize> {
        if self.depth == 0 {
            return Err(DockyterError::Shell(
                "redirection is not enabled, nothing to restore".to_string(),
            ));
        }
        self.depth -= 1;
        Ok(self.depth)
    }

    pub fn is_enabled(&self) -> bool {
        self.depth > 0
    }

    pub fn current(&self) -> Handler {
        if self.is_enabled() {
            Handler::Container
        } else {
            Handler::Host
        }
    }
}
