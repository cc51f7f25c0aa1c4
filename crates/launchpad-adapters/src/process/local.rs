//! Running child processes with timeouts and incrementally captured output.

use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, instrument, warn};
use wait_timeout::ChildExt;

use launchpad_core::application::ApplicationError;
use launchpad_core::application::ports::{CommandOutput, CommandRequest, CommandRunner};

/// Production command runner backed by `std::process`.
///
/// Output pipes are drained on dedicated threads while the child runs, so a
/// chatty install cannot deadlock on a full pipe and progress is visible in
/// the logs line by line. A child that outlives its budget is killed and
/// reaped — never left running against a directory the caller is about to
/// roll back.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProcessRunner;

impl LocalProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for LocalProcessRunner {
    #[instrument(skip_all, fields(command = %request.display_line(), timeout_secs = request.timeout.as_secs()))]
    fn run(&self, request: &CommandRequest) -> Result<CommandOutput, ApplicationError> {
        let mut cmd = Command::new(&request.program);
        cmd.args(&request.args)
            .current_dir(&request.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!("spawning child process");
        let mut child = cmd.spawn().map_err(|e| ApplicationError::Spawn {
            command: request.display_line(),
            reason: e.to_string(),
        })?;

        // Pipes are always requested above; a missing handle is a process
        // API violation, reported rather than unwrapped.
        let stdout = child.stdout.take().ok_or_else(|| ApplicationError::Spawn {
            command: request.display_line(),
            reason: "stdout was not piped".into(),
        })?;
        let stderr = child.stderr.take().ok_or_else(|| ApplicationError::Spawn {
            command: request.display_line(),
            reason: "stderr was not piped".into(),
        })?;

        let stdout_handle = thread::spawn(move || read_stream_logged(stdout, "stdout"));
        let stderr_handle = thread::spawn(move || read_stream_logged(stderr, "stderr"));

        let status = match child.wait_timeout(request.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                warn!(
                    timeout_secs = request.timeout.as_secs(),
                    "command timed out, killing"
                );
                kill_and_reap(&mut child, request);
                // Drop the reader handles after the kill so the pipes close
                // and the threads finish.
                let _ = stdout_handle.join();
                let _ = stderr_handle.join();
                return Err(ApplicationError::InstallTimeout {
                    command: request.display_line(),
                    timeout: request.timeout,
                });
            }
            Err(e) => {
                kill_and_reap(&mut child, request);
                let _ = stdout_handle.join();
                let _ = stderr_handle.join();
                return Err(ApplicationError::Spawn {
                    command: request.display_line(),
                    reason: format!("failed to wait for command: {e}"),
                });
            }
        };

        let stdout = join_output(stdout_handle);
        let stderr = join_output(stderr_handle);

        debug!(exit_code = ?status.code(), "command finished");

        if status.success() {
            Ok(CommandOutput { stdout, stderr })
        } else {
            Err(ApplicationError::InstallFailed {
                command: request.display_line(),
                exit_code: status.code(),
                stderr,
            })
        }
    }
}

fn kill_and_reap(child: &mut std::process::Child, request: &CommandRequest) {
    if let Err(e) = child.kill() {
        warn!(command = %request.display_line(), error = %e, "failed to kill child");
    }
    if let Err(e) = child.wait() {
        warn!(command = %request.display_line(), error = %e, "failed to reap child");
    }
}

/// Drain a pipe line by line, echoing each line to the log as it arrives.
fn read_stream_logged<R: Read>(reader: R, stream: &'static str) -> String {
    let mut collected = String::new();
    for line in BufReader::new(reader).lines() {
        match line {
            Ok(line) => {
                debug!(stream, "{line}");
                collected.push_str(&line);
                collected.push('\n');
            }
            Err(e) => {
                warn!(stream, error = %e, "failed to read child output");
                break;
            }
        }
    }
    collected
}

fn join_output(handle: thread::JoinHandle<String>) -> String {
    handle.join().unwrap_or_else(|_| {
        warn!("output reader thread panicked");
        String::new()
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn request(program: &str, args: &[&str], timeout: Duration) -> CommandRequest {
        CommandRequest::new(
            program,
            args.iter().copied(),
            std::env::temp_dir(),
            timeout,
        )
    }

    #[test]
    fn successful_command_captures_stdout() {
        let runner = LocalProcessRunner::new();
        let output = runner
            .run(&request("echo", &["hello"], Duration::from_secs(5)))
            .unwrap();
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[test]
    fn missing_executable_is_spawn_error() {
        let runner = LocalProcessRunner::new();
        let err = runner
            .run(&request(
                "launchpad-test-no-such-binary",
                &[],
                Duration::from_secs(5),
            ))
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Spawn { .. }));
    }

    #[test]
    fn non_zero_exit_is_install_failed_with_output() {
        let runner = LocalProcessRunner::new();
        let err = runner
            .run(&request(
                "sh",
                &["-c", "echo oops >&2; exit 3"],
                Duration::from_secs(5),
            ))
            .unwrap_err();

        match err {
            ApplicationError::InstallFailed {
                exit_code, stderr, ..
            } => {
                assert_eq!(exit_code, Some(3));
                assert!(stderr.contains("oops"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn timeout_kills_the_child_promptly() {
        let runner = LocalProcessRunner::new();
        let timeout = Duration::from_millis(200);

        let start = Instant::now();
        let err = runner
            .run(&request("sleep", &["30"], timeout))
            .unwrap_err();
        let elapsed = start.elapsed();

        match err {
            ApplicationError::InstallTimeout { timeout: t, .. } => assert_eq!(t, timeout),
            other => panic!("unexpected error: {other:?}"),
        }
        // Timeout plus kill/reap overhead, well under the sleep duration.
        assert!(elapsed < Duration::from_secs(5), "took {elapsed:?}");
    }
}
