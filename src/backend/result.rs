//! Uniform result of a backend execution

use serde::{Deserialize, Serialize};

/// Captured output of one command.
///
/// Both streams are always present. Backends never report the exit code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
}

impl CommandResult {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Build a result from raw process output, replacing invalid UTF-8.
    pub fn from_bytes(stdout: &[u8], stderr: &[u8]) -> Self {
        Self {
            stdout: String::from_utf8_lossy(stdout).into_owned(),
            stderr: String::from_utf8_lossy(stderr).into_owned(),
        }
    }

    pub fn has_stdout(&self) -> bool {
        !self.stdout.is_empty()
    }

    pub fn has_stderr(&self) -> bool {
        !self.stderr.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty() && self.stderr.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_replaces_invalid_utf8() {
        let result = CommandResult::from_bytes(b"ok \xff\xfe", b"");
        assert!(result.stdout.starts_with("ok "));
        assert!(result.stdout.contains('\u{FFFD}'));
        assert_eq!(result.stderr, "");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let result: CommandResult = serde_json::from_str(r#"{"stdout":"a"}"#).unwrap();
        assert_eq!(result, CommandResult::new("a", ""));

        let result: CommandResult = serde_json::from_str("{}").unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_stream_flags() {
        let result = CommandResult::new("", "boom");
        assert!(!result.has_stdout());
        assert!(result.has_stderr());
        assert!(!result.is_empty());
    }
}
