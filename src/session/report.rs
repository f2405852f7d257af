//! Status report shown by `dockyter status` and `:status`

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::backend::{Backend, BackendKind, BackendStatus};

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub backend: BackendKind,
    pub target: String,
    pub available: bool,
    pub message: String,
    pub redirected: bool,
    pub args: String,
    pub checked_at: DateTime<Utc>,
}

impl StatusReport {
    pub fn new(backend: &Backend, status: BackendStatus, redirected: bool, args: &str) -> Self {
        Self {
            backend: backend.kind(),
            target: backend.describe(),
            available: status.available,
            message: status.message,
            redirected,
            args: args.to_string(),
            checked_at: Utc::now(),
        }
    }
}
