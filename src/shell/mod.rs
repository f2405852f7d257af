//! Shell host integration
//!
//! The host owns a [`Session`](crate::session::Session) and a single
//! redirection slot. Plain lines go to the host shell until redirection is
//! turned on, then to the session's backend.

pub mod host;
pub mod redirect;

pub use host::{HostShell, ShellHost, CONNECT_PROBE};
pub use redirect::{Handler, Redirection};
