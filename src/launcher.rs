//! Launcher module
//!
//! Gates demo server startup on test-suite success: run the tests as a
//! child process, and only start the server when they pass. The test suite
//! is an atomic pass/fail oracle; no output parsing, no retries.

use std::io::{self, Write};
use std::process::Command;

/// Run the crate's test suite, returning whether it passed
pub fn run_tests() -> bool {
    let mut cmd = Command::new("cargo");
    cmd.arg("test");
    command_succeeds(&mut cmd)
}

/// Spawn the demo server and block until it exits
pub fn start_server() -> io::Result<bool> {
    Command::new("cargo")
        .args(["run", "--bin", "demo-server"])
        .status()
        .map(|status| status.success())
}

/// Run a child command to completion; spawn failure counts as failure
pub fn command_succeeds(cmd: &mut Command) -> bool {
    match cmd.status() {
        Ok(status) => status.success(),
        Err(e) => {
            eprintln!("Failed to run {:?}: {e}", cmd.get_program());
            false
        }
    }
}

/// Sequence tests then server; returns the process exit code
pub fn run() -> i32 {
    run_with(run_tests, start_server)
}

/// Test-then-serve sequencing with injectable steps.
///
/// Test success is a strict gate: the server step never runs after a
/// failing test step.
pub fn run_with<T, S>(run_tests: T, start_server: S) -> i32
where
    T: FnOnce() -> bool,
    S: FnOnce() -> io::Result<bool>,
{
    run_gated(run_tests, start_server, &mut io::stderr())
}

/// Sequencing core with the error stream injectable for tests
fn run_gated<T, S, W>(run_tests: T, start_server: S, err: &mut W) -> i32
where
    T: FnOnce() -> bool,
    S: FnOnce() -> io::Result<bool>,
    W: Write,
{
    if !run_tests() {
        let _ = writeln!(err, "Tests failed. Fix issues before starting the server.");
        return 1;
    }
    match start_server() {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            let _ = writeln!(err, "Failed to start demo server: {e}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_passing_tests_start_server_once() {
        let starts = Cell::new(0);
        let code = run_with(
            || true,
            || {
                starts.set(starts.get() + 1);
                Ok(true)
            },
        );
        assert_eq!(code, 0);
        assert_eq!(starts.get(), 1);
    }

    #[test]
    fn test_failing_tests_never_start_server() {
        let starts = Cell::new(0);
        let mut err = Vec::new();
        let code = run_gated(
            || false,
            || {
                starts.set(starts.get() + 1);
                Ok(true)
            },
            &mut err,
        );
        assert_eq!(code, 1);
        assert_eq!(starts.get(), 0);
        let message = String::from_utf8(err).unwrap();
        assert!(message.contains("Tests failed"));
    }

    #[test]
    fn test_spawn_failure_message_emitted() {
        let mut err = Vec::new();
        let code = run_gated(
            || true,
            || Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
            &mut err,
        );
        assert_eq!(code, 1);
        assert!(String::from_utf8(err)
            .unwrap()
            .contains("Failed to start demo server"));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_succeeds_reflects_exit_status() {
        assert!(command_succeeds(&mut Command::new("true")));
        assert!(!command_succeeds(&mut Command::new("false")));
        assert!(!command_succeeds(&mut Command::new(
            "definitely-not-a-real-binary"
        )));
    }
}
