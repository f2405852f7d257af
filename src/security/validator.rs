//! Runtime argument validation
//!
//! Every command that reaches a backend goes through here first. The check
//! is an exact token match on whitespace-separated arguments, so
//! `--privilegedx` is allowed while `--privileged` is not.

use tracing::warn;

use crate::error::{DockyterError, Result};

/// Arguments that would let the container escape its isolation.
pub const FORBIDDEN_FLAGS: &[&str] = &[
    "--privileged",
    "--network=host",
    "--net=host",
    "--pid=host",
    "--ipc=host",
    "--uts=host",
    "--userns=host",
    "--cap-add=ALL",
    "--cap-add=SYS_ADMIN",
];

/// Split a runtime argument string into tokens.
pub fn tokenize_args(args: &str) -> Vec<&str> {
    args.split_whitespace().collect()
}

/// Return the first forbidden flag present in `args`, if any.
pub fn find_forbidden_flag(args: &str) -> Option<&'static str> {
    let tokens = tokenize_args(args);
    FORBIDDEN_FLAGS
        .iter()
        .copied()
        .find(|flag| tokens.iter().any(|token| token == flag))
}

/// Validate runtime arguments, reporting the offending flag as a warning.
pub fn validate_args(args: &str) -> bool {
    match find_forbidden_flag(args) {
        Some(flag) => {
            warn!(flag, "rejected forbidden docker argument");
            false
        }
        None => true,
    }
}

/// Same check as [`validate_args`], but as a `Result` for `?` call sites.
pub fn check_args(args: &str) -> Result<()> {
    match find_forbidden_flag(args) {
        Some(flag) => {
            warn!(flag, "rejected forbidden docker argument");
            Err(DockyterError::ValidationRejected {
                flag: flag.to_string(),
            })
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_args_are_valid() {
        assert!(validate_args(""));
        assert!(validate_args("   "));
    }

    #[test]
    fn test_forbidden_flags_rejected() {
        for flag in FORBIDDEN_FLAGS {
            assert!(!validate_args(flag), "{} should be rejected", flag);
            assert!(!validate_args(&format!("-v /data:/data {} -e X=1", flag)));
        }
    }

    #[test]
    fn test_exact_token_match() {
        assert!(validate_args("--privilegedx"));
        assert!(validate_args("--network=hostile"));
        assert!(validate_args("-e MODE=--privileged"));
    }

    #[test]
    fn test_common_args_pass_through() {
        assert!(validate_args("-v /tmp:/work -w /work ubuntu:22.04"));
        assert!(validate_args("--network=bridge -e FOO=bar python:3.12"));
    }

    #[test]
    fn test_check_args_reports_flag() {
        let err = check_args("ubuntu --privileged").unwrap_err();
        match err {
            DockyterError::ValidationRejected { flag } => assert_eq!(flag, "--privileged"),
            other => panic!("unexpected error: {}", other),
        }
        assert!(check_args("ubuntu").is_ok());
    }

    #[test]
    fn test_tokenize_collapses_whitespace() {
        assert_eq!(tokenize_args("  -v a:b \t ubuntu\n"), vec!["-v", "a:b", "ubuntu"]);
        assert!(tokenize_args("").is_empty());
    }

    proptest! {
        #[test]
        fn prop_any_forbidden_token_rejects(
            prefix in proptest::collection::vec("[a-zA-Z0-9:/=_.-]{1,12}", 0..5),
            suffix in proptest::collection::vec("[a-zA-Z0-9:/=_.-]{1,12}", 0..5),
            idx in 0..FORBIDDEN_FLAGS.len(),
        ) {
            let mut tokens = prefix;
            tokens.push(FORBIDDEN_FLAGS[idx].to_string());
            tokens.extend(suffix);
            prop_assert!(!validate_args(&tokens.join(" ")));
        }

        #[test]
        fn prop_clean_tokens_accept(
            tokens in proptest::collection::vec("[a-zA-Z0-9:/_.]{1,12}", 0..8),
        ) {
            // No '-' in the alphabet, so no token can be a forbidden flag.
            prop_assert!(validate_args(&tokens.join(" ")));
        }
    }
}
