//! Error types for synchronization runs.

use thiserror::Error;

/// Errors produced by the reconciler and its collaborators.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Directory lookup failed for a reason other than a missing group.
    #[error("directory error: {0}")]
    Directory(String),
    /// The configured group does not exist in the directory.
    #[error("group not found: {0}")]
    GroupNotFound(String),
    /// An external program could not be started.
    #[error("failed to run `{program}`: {source}")]
    CommandSpawn {
        /// Program that was invoked.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// An external program exited unsuccessfully.
    #[error("`{program}` exited with {}: {stderr}", exit_label(.code))]
    CommandFailed {
        /// Program that was invoked.
        program: String,
        /// Exit code, if the process was not killed by a signal.
        code: Option<i32>,
        /// Trimmed standard error.
        stderr: String,
    },
    /// A program produced output that could not be interpreted.
    #[error("invalid output: {0}")]
    InvalidOutput(String),
    /// An identifier cannot be passed safely to an external program.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
    /// Configuration was rejected.
    #[error("config invalid: {0}")]
    Config(String),
}

#[allow(clippy::ref_option)]
fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| format!("status {c}"))
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
