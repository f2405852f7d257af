//! JSON output formatting

use serde_json::json;

use crate::backend::CommandResult;
use crate::session::StatusReport;

pub fn format_result_json(result: &CommandResult) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_status_json(report: &StatusReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_error_json(message: &str) -> String {
    json!({ "error": message }).to_string()
}
