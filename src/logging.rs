//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `DOCKYTER_LOG` environment variable: a level ("info", "debug") or
//!    filter directives ("warn,dockyter::backend=debug")
//! 3. default to `warn`
//!
//! Logs go to STDERR so that container stdout stays clean.

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

/// Initialise the global logging subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var("DOCKYTER_LOG").ok();
    let filter = build_filter(cli_level, env_value.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))?;

    Ok(())
}

/// Pick the filter: the CLI level wins, then `DOCKYTER_LOG`, then warn.
/// Unparseable env values fall back to warn.
fn build_filter(cli_level: Option<LogLevel>, env_value: Option<&str>) -> EnvFilter {
    if let Some(lvl) = cli_level {
        return level_filter(level_from_log_level(lvl));
    }
    match env_value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => match parse_level_str(value) {
            Some(level) => level_filter(level),
            None => EnvFilter::try_new(value).unwrap_or_else(|_| level_filter(tracing::Level::WARN)),
        },
        None => level_filter(tracing::Level::WARN),
    }
}

fn level_filter(level: tracing::Level) -> EnvFilter {
    EnvFilter::default().add_directive(LevelFilter::from_level(level).into())
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_str() {
        assert_eq!(parse_level_str(" Debug "), Some(tracing::Level::DEBUG));
        assert_eq!(parse_level_str("warning"), Some(tracing::Level::WARN));
        assert_eq!(parse_level_str("loud"), None);
    }

    #[test]
    fn test_cli_level_wins_over_env() {
        let filter = build_filter(Some(LogLevel::Debug), Some("error"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_env_accepts_directives() {
        let filter = build_filter(None, Some("warn,dockyter::backend=trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
        assert!(filter.to_string().contains("dockyter::backend=trace"));

        let filter = build_filter(None, Some("Warning"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_default_is_warn() {
        assert_eq!(build_filter(None, None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(build_filter(None, Some("  ")).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(
            build_filter(None, Some("dockyter=loud")).max_level_hint(),
            Some(LevelFilter::WARN)
        );
    }
}
