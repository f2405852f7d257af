//! Session state: the active backend and its runtime arguments

mod report;
mod state;

pub use report::StatusReport;
pub use state::Session;
