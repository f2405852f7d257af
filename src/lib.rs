//! Dockyter - run shell commands inside containers
//!
//! Commands run either through a local container runtime (`docker run --rm`)
//! or through a remote execution API that does the same server-side. Runtime
//! arguments are checked against a list of forbidden flags before anything
//! is executed.
//!
//! # Example
//!
//! ```no_run
//! use dockyter::{Backend, Session};
//!
//! let mut session = Session::new(Backend::docker());
//! session.set_args("-v /tmp:/work -w /work ubuntu:22.04").unwrap();
//! let result = session.run("ls -la").unwrap();
//! println!("{}", result.stdout);
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod security;
pub mod server;
pub mod session;
pub mod shell;

#[cfg(feature = "repl")]
pub mod repl;

pub use backend::{ApiBackend, Backend, BackendKind, BackendStatus, CommandResult, DockerBackend};
pub use config::Settings;
pub use error::{DockyterError, Result};
pub use output::{format_status, OutputFormat};
pub use security::{check_args, validate_args};
pub use session::{Session, StatusReport};
pub use shell::ShellHost;
