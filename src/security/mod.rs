//! Security module for Dockyter

pub mod validator;

pub use validator::{check_args, find_forbidden_flag, tokenize_args, validate_args, FORBIDDEN_FLAGS};
