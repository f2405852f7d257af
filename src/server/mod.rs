//! Execution API server
//!
//! Serves the endpoints the [`ApiBackend`](crate::backend::ApiBackend)
//! talks to, running each command through a local [`DockerBackend`]:
//!
//! - `GET /health` returns `{"status": "ok"}`
//! - `POST /execute` takes `{"cmd": ..., "args": ...}` and returns
//!   `{"stdout": ..., "stderr": ...}`
//!
//! Requests are handled one at a time on the calling thread.

use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::json;
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};
use tracing::{debug, info, warn};

use crate::backend::{DockerBackend, ExecuteRequest};
use crate::error::{DockyterError, Result};
use crate::output::json::format_error_json;
use crate::security::find_forbidden_flag;

/// A routed reply: HTTP status plus JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    fn json(status: u16, body: String) -> Self {
        Self { status, body }
    }

    fn error(status: u16, message: &str) -> Self {
        Self::json(status, format_error_json(message))
    }
}

pub struct ExecutionServer {
    server: Arc<Server>,
    backend: DockerBackend,
}

impl ExecutionServer {
    /// Bind to `addr` (e.g. `127.0.0.1:8000`, port 0 for any free port).
    pub fn bind(addr: &str, backend: DockerBackend) -> Result<Self> {
        let server = Server::http(addr)
            .map_err(|e| DockyterError::Server(format!("failed to bind {}: {}", addr, e)))?;
        Ok(Self {
            server: Arc::new(server),
            backend,
        })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Handle used to stop [`run`](Self::run) from another thread.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle(Arc::clone(&self.server))
    }

    /// Serve until the shutdown handle fires.
    pub fn run(&self) -> Result<()> {
        for request in self.server.incoming_requests() {
            if let Err(e) = self.respond(request) {
                warn!(error = %e, "failed to answer request");
            }
        }
        info!("execution server stopped");
        Ok(())
    }

    fn respond(&self, mut request: Request) -> Result<()> {
        let mut raw = Vec::new();
        request.as_reader().read_to_end(&mut raw)?;
        let body = String::from_utf8_lossy(&raw);

        let reply = route(&self.backend, request.method(), request.url(), &body);
        debug!(method = %request.method(), url = request.url(), status = reply.status, "request handled");

        let header = Header::from_bytes("Content-Type", "application/json")
            .map_err(|_| DockyterError::Server("invalid content-type header".to_string()))?;
        let response = Response::from_string(reply.body)
            .with_status_code(StatusCode(reply.status))
            .with_header(header);
        request.respond(response)?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct ShutdownHandle(Arc<Server>);

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.0.unblock();
    }
}

/// Dispatch one request to its endpoint.
pub fn route(backend: &DockerBackend, method: &Method, url: &str, body: &str) -> Reply {
    let path = url.split('?').next().unwrap_or_default();

    match (method, path) {
        (Method::Get, "/health") => Reply::json(200, json!({ "status": "ok" }).to_string()),
        (Method::Post, "/execute") => execute(backend, body),
        (_, "/health") | (_, "/execute") => Reply::error(405, "method not allowed"),
        _ => Reply::error(404, "not found"),
    }
}

fn execute(backend: &DockerBackend, body: &str) -> Reply {
    let request: ExecuteRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(e) => return Reply::error(400, &format!("invalid request body: {}", e)),
    };

    if let Some(flag) = find_forbidden_flag(&request.args) {
        warn!(flag, "rejected forbidden docker argument");
        let err = DockyterError::ValidationRejected {
            flag: flag.to_string(),
        };
        return Reply::error(400, &err.to_string());
    }

    let result = backend.execute(&request.cmd, &request.args);
    match serde_json::to_string(&result) {
        Ok(body) => Reply::json(200, body),
        Err(e) => Reply::error(500, &format!("failed to encode result: {}", e)),
    }
}

/// Bind, install a Ctrl-C handler, and serve until interrupted.
pub fn serve(addr: &str, backend: DockerBackend) -> Result<()> {
    let server = ExecutionServer::bind(addr, backend)?;
    let handle = server.shutdown_handle();
    ctrlc::set_handler(move || handle.shutdown())
        .map_err(|e| DockyterError::Server(format!("failed to install Ctrl-C handler: {}", e)))?;

    match server.local_addr() {
        Some(bound) => eprintln!("dockyter execution API listening on http://{}", bound),
        None => eprintln!("dockyter execution API listening on {}", addr),
    }
    server.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> DockerBackend {
        DockerBackend::with_runtime("dockyter-no-such-runtime-binary")
    }

    #[test]
    fn test_health() {
        let reply = route(&backend(), &Method::Get, "/health", "");
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body, r#"{"status":"ok"}"#);
    }

    #[test]
    fn test_unknown_route_and_method() {
        assert_eq!(route(&backend(), &Method::Get, "/nope", "").status, 404);
        assert_eq!(route(&backend(), &Method::Get, "/execute", "").status, 405);
        assert_eq!(route(&backend(), &Method::Post, "/health", "").status, 405);
    }

    #[test]
    fn test_execute_rejects_forbidden_args() {
        let body = r#"{"cmd":"id","args":"--privileged ubuntu"}"#;
        let reply = route(&backend(), &Method::Post, "/execute", body);
        assert_eq!(reply.status, 400);
        assert!(reply.body.contains("--privileged"));
    }

    #[test]
    fn test_execute_bad_body() {
        let reply = route(&backend(), &Method::Post, "/execute", "{\"args\":\"\"}");
        assert_eq!(reply.status, 400);
    }

    #[test]
    fn test_execute_returns_streams() {
        let body = r#"{"cmd":"echo hi","args":""}"#;
        let reply = route(&backend(), &Method::Post, "/execute?x=1", body);
        assert_eq!(reply.status, 200);
        let value: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(value["stdout"], "");
        assert!(value["stderr"].as_str().unwrap().contains("Failed to launch"));
    }
}
