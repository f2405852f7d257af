//! Runtime settings
//!
//! Settings come from CLI flags, each of which can also be set through a
//! `DOCKYTER_*` environment variable (see [`crate::cli::Args`]).

use std::time::Duration;

use crate::backend::api::{parse_base_url, DEFAULT_TIMEOUT};
use crate::backend::docker::DEFAULT_RUNTIME;
use crate::backend::{ApiBackend, Backend, BackendKind, DockerBackend};
use crate::cli::Args;
use crate::error::{DockyterError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend: BackendKind,
    pub api_url: Option<String>,
    pub runtime: String,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendKind::Docker,
            api_url: None,
            runtime: DEFAULT_RUNTIME.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Settings {
    pub fn from_args(args: &Args) -> Self {
        Self {
            backend: args.backend,
            api_url: args.api_url.clone(),
            runtime: args.runtime.clone(),
            timeout: Duration::from_secs(args.timeout),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.runtime.trim().is_empty() {
            return Err(DockyterError::Config("runtime must not be empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(DockyterError::Config("timeout must be greater than zero".to_string()));
        }
        if let Some(ref url) = self.api_url {
            parse_base_url(url)?;
        }
        if self.backend == BackendKind::Api && self.api_url.is_none() {
            return Err(DockyterError::Config(
                "the api backend needs --api-url (or DOCKYTER_API_URL)".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate and construct the configured backend.
    pub fn build_backend(&self) -> Result<Backend> {
        self.validate()?;
        self.build(self.backend, self.api_url.as_deref())
    }

    /// Construct a backend of `kind` with these settings' runtime and
    /// timeout. Used for switches at runtime, where the URL comes from
    /// the user rather than the flags.
    pub fn build(&self, kind: BackendKind, api_url: Option<&str>) -> Result<Backend> {
        match kind {
            BackendKind::Docker => Ok(Backend::Docker(DockerBackend::with_runtime(
                self.runtime.trim(),
            ))),
            BackendKind::Api => {
                let url = api_url.ok_or_else(|| {
                    DockyterError::Config("the api backend needs a URL".to_string())
                })?;
                Ok(Backend::Api(ApiBackend::with_timeout(url, self.timeout)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_build_docker() {
        let backend = Settings::default().build_backend().unwrap();
        assert_eq!(backend.kind(), BackendKind::Docker);
    }

    #[test]
    fn test_api_requires_url() {
        let settings = Settings {
            backend: BackendKind::Api,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(DockyterError::Config(_))));

        let settings = Settings {
            backend: BackendKind::Api,
            api_url: Some("http://localhost:8000".to_string()),
            ..Settings::default()
        };
        assert_eq!(settings.build_backend().unwrap().kind(), BackendKind::Api);
    }

    #[test]
    fn test_api_url_must_parse() {
        for url in ["http://localhost:8000", "https://exec.example.com/"] {
            let settings = Settings {
                api_url: Some(url.to_string()),
                ..Settings::default()
            };
            assert!(settings.validate().is_ok(), "{}", url);
        }
        for url in ["localhost:8000", "http://", "http://exa mple:abc"] {
            let settings = Settings {
                backend: BackendKind::Api,
                api_url: Some(url.to_string()),
                ..Settings::default()
            };
            assert!(matches!(settings.validate(), Err(DockyterError::Config(_))), "{}", url);
        }
    }

    #[test]
    fn test_switch_keeps_configured_runtime() {
        let settings = Settings {
            runtime: "podman".to_string(),
            timeout: Duration::from_secs(5),
            ..Settings::default()
        };
        let backend = settings.build(BackendKind::Docker, None).unwrap();
        assert_eq!(backend.describe(), "Docker (podman)");

        let backend = settings.build(BackendKind::Api, Some("http://h:8000/")).unwrap();
        assert_eq!(backend.describe(), "API (http://h:8000)");
    }

    #[test]
    fn test_switch_rejects_malformed_url() {
        let settings = Settings::default();
        assert!(matches!(
            settings.build(BackendKind::Api, Some("localhost:8000")),
            Err(DockyterError::Config(_))
        ));
        assert!(matches!(
            settings.build(BackendKind::Api, None),
            Err(DockyterError::Config(_))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let settings = Settings {
            timeout: Duration::ZERO,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
