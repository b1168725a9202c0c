//! External program invocation shared by the CLI-backed adapters.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use crate::core::SyncError;

/// Captured result of a finished program.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub code: Option<i32>,
    /// Raw standard output.
    pub stdout: Vec<u8>,
    /// Standard error, lossily decoded.
    pub stderr: String,
}

impl CommandOutput {
    /// True when the program exited with status 0.
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }

    /// Decode standard output as UTF-8.
    pub fn stdout_utf8(&self) -> Result<&str, SyncError> {
        std::str::from_utf8(&self.stdout)
            .map_err(|e| SyncError::InvalidOutput(format!("stdout is not UTF-8: {e}")))
    }
}

/// Runs one external program with varying arguments.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: PathBuf,
}

impl CommandRunner {
    /// Runner for `program`, resolved through `PATH` when it has no separator.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Program this runner invokes.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run the program to completion and capture its output.
    ///
    /// Stdin is closed so the program can never block on a prompt.
    pub async fn output<I, A>(&self, args: I) -> Result<CommandOutput, SyncError>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| SyncError::CommandSpawn {
                program: self.program_name(),
                source,
            })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    /// Run the program and fail unless it exits with status 0.
    pub async fn checked<I, A>(&self, args: I) -> Result<CommandOutput, SyncError>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        let output = self.output(args).await?;
        if output.success() {
            Ok(output)
        } else {
            Err(self.failure(output))
        }
    }

    /// Turn an unsuccessful output into [`SyncError::CommandFailed`].
    pub fn failure(&self, output: CommandOutput) -> SyncError {
        tracing::debug!(
            program = %self.program.display(),
            code = ?output.code,
            stderr = %output.stderr,
            "command failed"
        );
        SyncError::CommandFailed {
            program: self.program_name(),
            code: output.code,
            stderr: output.stderr,
        }
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}
