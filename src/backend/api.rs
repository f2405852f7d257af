//! Remote execution API backend
//!
//! Relays commands to a service exposing `POST /execute` and `GET /health`.
//! The service runs the container itself; nothing is spawned locally.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::result::CommandResult;
use super::status::ApiStatus;
use crate::error::{DockyterError, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Body of `POST /execute`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub cmd: String,
    #[serde(default)]
    pub args: String,
}

/// Body returned by `POST /execute`. Absent or null streams become empty.
#[derive(Debug, Default, Deserialize)]
struct ExecuteResponse {
    #[serde(default)]
    stdout: Option<String>,
    #[serde(default)]
    stderr: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    #[serde(default)]
    status: Option<String>,
}

/// Executes commands by calling a remote execution API.
#[derive(Debug, Clone)]
pub struct ApiBackend {
    base_url: Url,
    client: Client,
}

/// Parse an API base URL. Only absolute http(s) URLs with a host are
/// accepted; the path always ends in `/` so endpoints join beneath it.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let mut url = Url::parse(raw)
        .map_err(|e| DockyterError::Config(format!("invalid API URL '{}': {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(DockyterError::Config(format!(
            "API URL must use http or https: {}",
            raw
        )));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(DockyterError::Config(format!("API URL has no host: {}", raw)));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

impl ApiBackend {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DockyterError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    /// Base URL without the trailing slash, for display.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| DockyterError::Config(format!("invalid endpoint '{}': {}", path, e)))
    }

    /// Send one command to the API. No retries.
    pub fn execute(&self, command: &str, args: &str) -> Result<CommandResult> {
        let url = self.endpoint("execute")?;
        let request = ExecuteRequest {
            cmd: command.to_string(),
            args: args.to_string(),
        };
        debug!(%url, ?request, "sending command to execution API");

        let response = self
            .client
            .post(url.clone())
            .json(&request)
            .send()
            .map_err(|e| {
                warn!(%url, error = %e, "execution API unreachable");
                DockyterError::RemoteUnreachable {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(DockyterError::RemoteBadResponse(format!(
                "{} returned {}: {}",
                url,
                status,
                body.trim()
            )));
        }

        let body = response.text().map_err(|e| DockyterError::RemoteUnreachable {
            url: url.to_string(),
            reason: format!("failed to read response body: {}", e),
        })?;

        let parsed: ExecuteResponse = serde_json::from_str(&body).map_err(|e| {
            DockyterError::RemoteBadResponse(format!("invalid JSON from {}: {}", url, e))
        })?;

        Ok(CommandResult::new(
            parsed.stdout.unwrap_or_default(),
            parsed.stderr.unwrap_or_default(),
        ))
    }

    /// Call `GET /health`. Any failure is reported as unreachable.
    pub fn probe(&self) -> ApiStatus {
        let url = match self.endpoint("health") {
            Ok(url) => url,
            Err(e) => return ApiStatus::Unreachable(e.to_string()),
        };

        let response = match self.client.get(url).send() {
            Ok(response) => response,
            Err(e) => {
                return ApiStatus::Unreachable(format!(
                    "API is unreachable at {}: {}",
                    self.base_url(),
                    e
                ))
            }
        };

        let status = response.status();
        if !status.is_success() {
            return ApiStatus::Unreachable(format!(
                "API at {} answered health check with {}.",
                self.base_url(),
                status
            ));
        }

        match response.json::<HealthResponse>() {
            Ok(HealthResponse { status: Some(s) }) if s == "ok" => {
                ApiStatus::Healthy(format!("API is reachable at {}.", self.base_url()))
            }
            Ok(other) => ApiStatus::Unreachable(format!(
                "API at {} reported status {:?}.",
                self.base_url(),
                other.status.unwrap_or_default()
            )),
            Err(e) => ApiStatus::Unreachable(format!(
                "API at {} returned an invalid health response: {}",
                self.base_url(),
                e
            )),
        }
    }
}
