use std::io::{self, Read};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::AppError;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs a shell command line and hands back its standard output.
pub trait CommandRunner {
    fn run(&self, command: &str) -> Result<String, AppError>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, command: &str) -> Result<String, AppError> {
        (**self).run(command)
    }
}

/// Executes commands through `bash -c`, optionally bounded by a timeout.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    timeout: Option<Duration>,
}

impl ShellRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    fn wait_with_timeout(
        &self,
        command: &str,
        mut child: Child,
        timeout: Duration,
        deadline: Instant,
    ) -> Result<(std::process::ExitStatus, String, String), AppError> {
        // Drain both pipes off-thread so a chatty child cannot block on a full pipe.
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                if let Err(err) = child.kill()
                    && err.kind() != io::ErrorKind::InvalidInput
                {
                    return Err(AppError::Io(err));
                }
                let _ = child.wait();
                return Err(AppError::Timeout {
                    command: command.to_string(),
                    secs: timeout.as_secs(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        };

        Ok((status, join_reader(stdout)?, join_reader(stderr)?))
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<String, AppError> {
        tracing::debug!(command, "running");
        let mut shell = Command::new("bash");
        shell.arg("-c").arg(command).stdin(Stdio::null());

        // A timeout too large to express as an instant never expires.
        let bounded = self
            .timeout
            .and_then(|timeout| Instant::now().checked_add(timeout).map(|at| (timeout, at)));

        let (status, stdout, stderr) = match bounded {
            None => {
                let output = shell.output()?;
                (
                    output.status,
                    String::from_utf8_lossy(&output.stdout).into_owned(),
                    String::from_utf8_lossy(&output.stderr).into_owned(),
                )
            }
            Some((timeout, deadline)) => {
                let child = shell.stdout(Stdio::piped()).stderr(Stdio::piped()).spawn()?;
                self.wait_with_timeout(command, child, timeout, deadline)?
            }
        };

        if !status.success() {
            return Err(AppError::CommandFailed { command: command.to_string(), status, stderr });
        }

        Ok(stdout)
    }
}

type Reader = Option<thread::JoinHandle<io::Result<Vec<u8>>>>;

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Reader {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf)?;
            Ok(buf)
        })
    })
}

fn join_reader(reader: Reader) -> Result<String, AppError> {
    let Some(handle) = reader else {
        return Ok(String::new());
    };
    let bytes = handle
        .join()
        .map_err(|_| AppError::Io(io::Error::other("output reader thread panicked")))??;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout() {
        let out = ShellRunner::default().run("printf 'a  b\\nc'").unwrap();
        assert_eq!(out, "a  b\nc");
    }

    #[test]
    fn non_zero_exit_is_an_error() {
        let err = ShellRunner::default().run("echo boom >&2; exit 3").unwrap_err();
        match err {
            AppError::CommandFailed { command, stderr, status } => {
                assert_eq!(command, "echo boom >&2; exit 3");
                assert_eq!(stderr.trim(), "boom");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn timeout_kills_slow_commands() {
        let runner = ShellRunner::new(Some(Duration::from_secs(1)));
        let err = runner.run("sleep 5").unwrap_err();
        assert!(matches!(err, AppError::Timeout { secs: 1, .. }));
    }

    #[test]
    fn huge_timeout_runs_unbounded() {
        let runner = ShellRunner::new(Some(Duration::from_secs(u64::MAX)));
        assert_eq!(runner.run("echo ok").unwrap(), "ok\n");
    }

    #[test]
    fn timeout_leaves_fast_commands_alone() {
        let runner = ShellRunner::new(Some(Duration::from_secs(5)));
        assert_eq!(runner.run("echo ok").unwrap(), "ok\n");
    }
}
