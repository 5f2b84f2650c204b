//! External command execution.
//!
//! Every OS tool the panel talks to (`ip`, `nmcli`, `mv`, `systemctl`) is
//! invoked through a [`CommandRunner`], so the network components can be
//! exercised without those tools installed.

use crate::error::{PanelError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tracing::debug;

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external programs.
///
/// Implementations return `Err` only when the program could not be run to
/// completion (missing binary, timeout). A non-zero exit is reported through
/// [`CommandOutput::code`].
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;

    /// Run a command and return its stdout, treating a non-zero exit as an error.
    async fn stdout_of(&self, program: &str, args: &[&str]) -> Result<String> {
        let output = self.run(program, args).await?;
        if output.success() {
            Ok(output.stdout)
        } else {
            Err(PanelError::command_error(
                program,
                format!(
                    "exited with {}: {}",
                    output
                        .code
                        .map_or_else(|| "signal".to_string(), |c| format!("status {}", c)),
                    output.stderr.trim()
                ),
            ))
        }
    }
}

/// [`CommandRunner`] that spawns real processes with a bounded runtime.
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    timeout: Duration,
}

impl SystemCommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::config::DEFAULT_COMMAND_TIMEOUT_SECS))
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        debug!("Running {} {}", program, args.join(" "));

        let child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| PanelError::command_error(program, format!("failed to start: {}", e)))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                PanelError::command_error(program, format!("timed out after {:?}", self.timeout))
            })?
            .map_err(|e| PanelError::command_error(program, e.to_string()))?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_an_error() {
        let runner = SystemCommandRunner::default();
        let result = runner.run("definitely-not-a-real-tool-xyz", &[]).await;
        assert!(matches!(result, Err(PanelError::Command { .. })));
    }

    #[tokio::test]
    async fn test_captures_stdout() {
        let runner = SystemCommandRunner::default();
        let output = runner.run("sh", &["-c", "echo hello"]).await.unwrap();
        assert!(output.success());
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn test_non_zero_exit_fails_stdout_of() {
        let runner = SystemCommandRunner::default();
        let result = runner.stdout_of("sh", &["-c", "echo oops >&2; exit 3"]).await;
        let err = result.unwrap_err().to_string();
        assert!(err.contains("status 3"));
        assert!(err.contains("oops"));
    }

    #[tokio::test]
    async fn test_timeout_kills_hung_command() {
        let runner = SystemCommandRunner::new(Duration::from_millis(100));
        let result = runner.run("sleep", &["5"]).await;
        assert!(result.unwrap_err().to_string().contains("timed out"));
    }
}
