//! Slurm accounting store adapter driving the `sacctmgr` CLI.

use std::collections::BTreeSet;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::core::{SchedulerAccounts, SyncError};
use crate::infra::command::CommandRunner;

/// Arguments producing a headerless, pipe-delimited, single-column user report.
pub const LIST_USERS_ARGS: [&str; 4] = ["-noP", "list", "users", "format=User"];

/// Parse a `sacctmgr -noP list users format=User` report.
///
/// Records are newline-separated and the report ends with a newline, so the
/// final empty record is discarded. Other records are kept as-is.
pub fn parse_user_report(report: &str) -> BTreeSet<String> {
    let mut records: Vec<&str> = report.split('\n').collect();
    if records.last().is_some_and(|last| last.is_empty()) {
        records.pop();
    }
    records.into_iter().map(str::to_string).collect()
}

/// Reject identifiers `sacctmgr` would misread.
///
/// `sacctmgr` has no `--` separator, so a leading `-` would be taken as an
/// option, and whitespace or `=` would split or rewrite the `key=value` list.
pub fn validate_identifier(user: &str) -> Result<(), SyncError> {
    if user.is_empty()
        || user.starts_with('-')
        || user.chars().any(|c| c.is_whitespace() || c == '=')
    {
        return Err(SyncError::InvalidIdentifier(user.to_string()));
    }
    Ok(())
}

/// Build the argument vector adding `user` under `account` with immediate commit.
pub fn add_user_args(user: &str, account: &str) -> Vec<String> {
    vec![
        "-i".to_string(),
        "add".to_string(),
        "user".to_string(),
        user.to_string(),
        format!("account={account}"),
    ]
}

/// [`SchedulerAccounts`] backed by the `sacctmgr` binary.
#[derive(Debug, Clone)]
pub struct SacctmgrCli {
    runner: CommandRunner,
}

impl SacctmgrCli {
    /// Adapter invoking `program` (a path or a name resolved through `PATH`).
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            runner: CommandRunner::new(program),
        }
    }
}

impl Default for SacctmgrCli {
    fn default() -> Self {
        Self::new("sacctmgr")
    }
}

#[async_trait]
impl SchedulerAccounts for SacctmgrCli {
    async fn list_users(&self) -> Result<BTreeSet<String>, SyncError> {
        let output = self.runner.checked(LIST_USERS_ARGS).await?;
        Ok(parse_user_report(output.stdout_utf8()?))
    }

    async fn add_user(&self, user: &str, account: &str) -> Result<(), SyncError> {
        validate_identifier(user)?;
        tracing::debug!(user, account, "invoking sacctmgr add user");
        self.runner.checked(add_user_args(user, account)).await?;
        Ok(())
    }
}
