//! Error types for Dockyter

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DockyterError {
    #[error("Forbidden docker argument: {flag}")]
    ValidationRejected { flag: String },

    #[error("Container runtime unavailable: {0}")]
    RuntimeUnavailable(String),

    #[error("Could not reach execution API at {url}: {reason}")]
    RemoteUnreachable { url: String, reason: String },

    #[error("Bad response from execution API: {0}")]
    RemoteBadResponse(String),

    #[error("Unknown backend '{0}'. Use docker or api")]
    InvalidBackend(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Shell error: {0}")]
    Shell(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DockyterError {
    /// True for failures that happened talking to the remote API, as opposed
    /// to a command that ran and reported errors on stderr.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            DockyterError::RemoteUnreachable { .. } | DockyterError::RemoteBadResponse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DockyterError>;
