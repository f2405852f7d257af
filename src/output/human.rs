//! Human-readable output formatting

use crate::backend::CommandResult;
use crate::session::StatusReport;

pub fn format_status_human(report: &StatusReport) -> String {
    let mut output = String::from("=== Dockyter Backend Status ===\n");
    output.push_str(&format!("Backend type:   {}\n", report.backend));
    output.push_str(&format!("Target:         {}\n", report.target));
    output.push_str(&format!(
        "Availability:   {}\n",
        if report.available { "available" } else { "unavailable" }
    ));
    output.push_str(&format!("Status:         {}\n", report.message));
    output.push_str(&format!(
        "Redirection:    {}",
        if report.redirected { "on" } else { "off" }
    ));
    if !report.args.is_empty() {
        output.push_str(&format!("\nDocker args:    {}", report.args));
    }
    output
}

/// Print a command result: stdout to stdout, stderr to stderr.
pub fn print_result(result: &CommandResult) {
    if result.has_stdout() {
        print!("{}", with_newline(&result.stdout));
    }
    if result.has_stderr() {
        eprint!("{}", with_newline(&result.stderr));
    }
}

fn with_newline(text: &str) -> String {
    if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{}\n", text)
    }
}
