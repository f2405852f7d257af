//! End-to-end tests of the api backend against the bundled execution server.

use std::thread;

use dockyter::backend::ApiBackend;
use dockyter::server::ExecutionServer;
use dockyter::{Backend, DockerBackend, DockyterError, Session};

fn start_server(backend: DockerBackend) -> (String, dockyter::server::ShutdownHandle, thread::JoinHandle<()>) {
    let server = ExecutionServer::bind("127.0.0.1:0", backend).unwrap();
    let addr = server.local_addr().unwrap();
    let handle = server.shutdown_handle();
    let join = thread::spawn(move || {
        server.run().unwrap();
    });
    (format!("http://{}", addr), handle, join)
}

#[test]
fn test_health_probe_through_server() {
    let (url, shutdown, join) =
        start_server(DockerBackend::with_runtime("dockyter-no-such-runtime-binary"));

    let backend = Backend::api(&url).unwrap();
    let status = backend.probe_status();
    assert!(status.available, "{}", status.message);

    shutdown.shutdown();
    join.join().unwrap();
}

#[test]
fn test_forbidden_args_rejected_server_side() {
    let (url, shutdown, join) =
        start_server(DockerBackend::with_runtime("dockyter-no-such-runtime-binary"));

    // Bypass the client-side check to exercise the server's own validation.
    let api = ApiBackend::new(&url).unwrap();
    let err = api.execute("id", "--privileged ubuntu").unwrap_err();
    match err {
        DockyterError::RemoteBadResponse(msg) => {
            assert!(msg.contains("400"));
            assert!(msg.contains("--privileged"));
        }
        other => panic!("unexpected error: {}", other),
    }

    shutdown.shutdown();
    join.join().unwrap();
}

#[test]
fn test_session_validates_before_sending() {
    // Nothing listens here; a validation failure must come back first.
    let session = Session::new(Backend::api("http://127.0.0.1:9").unwrap());
    let err = session.run_with_args("id", "--net=host ubuntu").unwrap_err();
    assert!(matches!(err, DockyterError::ValidationRejected { .. }));
}

#[cfg(unix)]
mod with_fake_runtime {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    /// A runtime that echoes the arguments it was given.
    fn echo_runtime(dir: &tempfile::TempDir) -> DockerBackend {
        let path = dir.path().join("fake-docker");
        fs::write(&path, "#!/bin/sh\necho \"$@\"\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        DockerBackend::with_runtime(path.to_string_lossy())
    }

    #[test]
    fn test_execute_runs_runtime_server_side() {
        let dir = tempfile::tempdir().unwrap();
        let (url, shutdown, join) = start_server(echo_runtime(&dir));

        let mut session = Session::new(Backend::api(&url).unwrap());
        session.set_args("-e MODE=remote alpine").unwrap();
        let result = session.run("echo hi").unwrap();
        assert_eq!(result.stdout, "run --rm -e MODE=remote alpine bash -lc echo hi\n");
        assert_eq!(result.stderr, "");

        shutdown.shutdown();
        join.join().unwrap();
    }

    #[test]
    fn test_switching_backend_drops_previous_args() {
        let dir = tempfile::tempdir().unwrap();
        let (url, shutdown, join) = start_server(echo_runtime(&dir));

        let mut session = Session::new(Backend::Docker(echo_runtime(&dir)));
        session.set_args("-v /secret:/secret ubuntu").unwrap();
        let local = session.run("true").unwrap();
        assert!(local.stdout.contains("/secret"));

        session.switch_backend(Backend::api(&url).unwrap());
        let remote = session.run("true").unwrap();
        assert_eq!(remote.stdout, "run --rm bash -lc true\n");

        shutdown.shutdown();
        join.join().unwrap();
    }
}
