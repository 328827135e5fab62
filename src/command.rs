//! Builder for running external tools with consistent logging and error handling.
//!
//! Both external programs the release tools depend on (`git` and the Docker
//! CLI) are run through [`ToolCommand`]. It either captures output, for
//! commands whose stdout is parsed, or inherits the terminal, for long-running
//! commands whose progress the user should see.

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::core::ReleaseError;

/// Fluent builder for an external command.
///
/// # Examples
///
/// ```rust,no_run
/// use release_kit::command::ToolCommand;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let timestamp = ToolCommand::new("git")
///     .args(["show", "-s", "--format=%ct"])
///     .current_dir(Path::new("."))
///     .execute_stdout()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    /// Executable name or path
    program: String,

    /// Arguments passed to the program
    args: Vec<String>,

    /// Working directory (defaults to the current directory)
    current_dir: Option<PathBuf>,

    /// Capture stdout/stderr (true) or inherit the parent's stdio (false)
    capture_output: bool,

    /// Optional context string for log messages
    context: Option<String>,
}

impl ToolCommand {
    /// Creates a builder for `program` with output capture enabled.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            capture_output: true,
            context: None,
        }
    }

    /// Appends a single argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the working directory.
    #[must_use]
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Lets the child write straight to the terminal instead of capturing output.
    #[must_use]
    pub fn inherit_stdio(mut self) -> Self {
        self.capture_output = false;
        self
    }

    /// Attaches a label used in log messages.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// The program followed by its arguments, space separated.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs the command to completion.
    ///
    /// # Errors
    ///
    /// - [`ReleaseError::CommandNotFound`] if the program cannot be found
    /// - [`ReleaseError::CommandFailed`] if it exits unsuccessfully
    pub async fn execute(self) -> Result<ToolOutput> {
        let command_line = self.command_line();
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }

        match self.context {
            Some(ref ctx) => {
                tracing::debug!(target: "command", "({}) Executing: {}", ctx, command_line);
            }
            None => tracing::debug!(target: "command", "Executing: {}", command_line),
        }

        if self.capture_output {
            cmd.stdout(Stdio::piped());
            cmd.stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit());
            cmd.stderr(Stdio::inherit());
        }

        let output = match cmd.output().await {
            Ok(output) => output,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(ReleaseError::CommandNotFound {
                    program: self.program,
                }
                .into());
            }
            Err(error) => {
                return Err(error).with_context(|| format!("Failed to execute {command_line}"));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            tracing::debug!(
                target: "command",
                "Command failed with exit code: {:?}",
                output.status.code()
            );
            if !stderr.is_empty() {
                tracing::debug!(target: "command", "Error: {}", stderr.trim());
            }

            return Err(ReleaseError::CommandFailed {
                command: command_line,
                code: output.status.code(),
                stderr,
            }
            .into());
        }

        if !stdout.is_empty() {
            tracing::trace!(target: "command", "{}", stdout.trim());
        }

        Ok(ToolOutput {
            stdout,
            stderr,
        })
    }

    /// Runs the command and returns its trimmed stdout.
    pub async fn execute_stdout(self) -> Result<String> {
        let output = self.execute().await?;
        Ok(output.stdout.trim().to_string())
    }

    /// Runs the command, discarding any output.
    pub async fn execute_success(self) -> Result<()> {
        self.execute().await?;
        Ok(())
    }
}

/// Captured output of a finished command.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// Standard output (empty when stdio was inherited)
    pub stdout: String,
    /// Standard error (empty when stdio was inherited)
    pub stderr: String,
}
