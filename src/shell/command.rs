//! Process execution.
//!
//! Two entry points: [`execute`] runs a program directly with arguments
//! (used for `go install` and `go version`), [`execute_shell`] runs a
//! command line through `sh -c` (used for post-install commands declared
//! as free-form strings in the catalog).

use crate::error::{Result, ToolstrapError};
use std::collections::HashMap;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Last non-empty line of stderr, falling back to stdout.
    ///
    /// Used as a one-line failure detail in summaries.
    pub fn last_error_line(&self) -> Option<&str> {
        fn last(s: &str) -> Option<&str> {
            s.lines().map(str::trim).filter(|l| !l.is_empty()).last()
        }
        last(&self.stderr).or_else(|| last(&self.stdout))
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

impl CommandOptions {
    /// Options that capture both streams.
    pub fn captured() -> Self {
        Self {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        }
    }

    /// Add an environment variable.
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }
}

/// Execute a program directly with arguments.
///
/// A program that cannot be spawned (not found, not executable) is an
/// error; a program that runs and exits non-zero is an `Ok` failure result.
pub fn execute<S: AsRef<str>>(
    program: &Path,
    args: &[S],
    options: &CommandOptions,
) -> Result<CommandResult> {
    let mut cmd = Command::new(program);
    cmd.args(args.iter().map(|a| a.as_ref()));
    let command_line = format!(
        "{} {}",
        program.display(),
        args.iter().map(|a| a.as_ref()).collect::<Vec<_>>().join(" ")
    );
    run(cmd, command_line.trim(), options)
}

/// Execute a command line through `sh -c`.
pub fn execute_shell(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let mut cmd = Command::new(shell_program());
    cmd.arg("-c").arg(command);
    run(cmd, command, options)
}

fn run(mut cmd: Command, command_line: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    // Set environment
    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    // Configure stdio
    cmd.stdin(Stdio::null());
    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    tracing::debug!("Executing: {}", command_line);

    let output = cmd.output().map_err(|e| {
        tracing::debug!("Failed to spawn '{}': {}", command_line, e);
        ToolstrapError::CommandFailed {
            command: command_line.to_string(),
            code: None,
        }
    })?;

    let duration = start.elapsed();

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        tracing::debug!(
            "'{}' exited with {:?} after {:?}",
            command_line,
            output.status.code(),
            duration
        );
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Shell used for free-form commands.
///
/// Always a POSIX `sh`: catalog commands are written for it, and the user's
/// interactive shell may be fish or something else entirely.
fn shell_program() -> &'static str {
    "/bin/sh"
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn execute_shell_successful_command() {
        let result = execute_shell("echo hello", &CommandOptions::captured()).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn execute_shell_failing_command() {
        let result = execute_shell("exit 3", &CommandOptions::captured()).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn execute_shell_with_env() {
        let options = CommandOptions::captured().with_env("MY_VAR", "my_value");
        let result = execute_shell("echo $MY_VAR", &options).unwrap();

        assert!(result.success);
        assert!(result.stdout.contains("my_value"));
    }

    #[test]
    fn spawn_failure_names_command_line() {
        let err = execute(
            Path::new("/nonexistent/toolstrap-go"),
            &["install", "example.com/x@latest"],
            &CommandOptions::captured(),
        )
        .unwrap_err();

        match err {
            ToolstrapError::CommandFailed { command, code } => {
                assert_eq!(command, "/nonexistent/toolstrap-go install example.com/x@latest");
                assert_eq!(code, None);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn execute_program_with_args() {
        let result = execute(
            Path::new("/bin/sh"),
            &["-c", "echo $0", "argzero"],
            &CommandOptions::captured(),
        )
        .unwrap();
        assert!(result.stdout.contains("argzero"));
    }

    #[test]
    fn execute_missing_program_is_error() {
        let result = execute(
            Path::new("/nonexistent/bin/tool"),
            &["version"],
            &CommandOptions::captured(),
        );
        assert!(matches!(
            result,
            Err(ToolstrapError::CommandFailed { code: None, .. })
        ));
    }

    #[test]
    fn last_error_line_prefers_stderr() {
        let result = CommandResult::failure(
            Some(1),
            "building\n".to_string(),
            "go: downloading x\nmodule not found\n\n".to_string(),
            Duration::from_millis(1),
        );
        assert_eq!(result.last_error_line(), Some("module not found"));
    }

    #[test]
    fn last_error_line_none_when_silent() {
        let result =
            CommandResult::failure(Some(1), String::new(), String::new(), Duration::ZERO);
        assert!(result.last_error_line().is_none());
    }
}
