//! Directory adapter over the system name service (`getent`).
//!
//! Hosts that resolve users and groups from LDAP through sssd or nslcd expose
//! the directory through NSS, so `getent` answers the same questions without
//! an LDAP client library.

use std::collections::BTreeSet;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::core::{Directory, SyncError};
use crate::infra::command::CommandRunner;

/// `getent` exit status for "key not found in database".
pub const GETENT_NOT_FOUND: i32 = 2;

/// Extract member names from a `getent group` line.
///
/// The line has the form `name:password:gid:member1,member2`.
pub fn parse_group_entry(line: &str) -> Result<BTreeSet<String>, SyncError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let members = line
        .splitn(4, ':')
        .nth(3)
        .ok_or_else(|| SyncError::InvalidOutput(format!("malformed group entry: {line:?}")))?;
    Ok(members
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect())
}

/// [`Directory`] backed by `getent group` and `getent passwd`.
///
/// Keys follow `--`, so names starting with `-` are never read as options.
#[derive(Debug, Clone)]
pub struct NssDirectory {
    runner: CommandRunner,
}

impl NssDirectory {
    /// Adapter invoking `getent` at `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            runner: CommandRunner::new(program),
        }
    }
}

impl Default for NssDirectory {
    fn default() -> Self {
        Self::new("getent")
    }
}

#[async_trait]
impl Directory for NssDirectory {
    async fn list_group(&self, group: &str) -> Result<BTreeSet<String>, SyncError> {
        let output = self.runner.output(["group", "--", group]).await?;
        match output.code {
            Some(0) => {
                let text = output.stdout_utf8()?;
                let line = text.lines().next().ok_or_else(|| {
                    SyncError::InvalidOutput(format!("empty getent output for group {group}"))
                })?;
                parse_group_entry(line)
            }
            Some(GETENT_NOT_FOUND) => Err(SyncError::GroupNotFound(group.to_string())),
            _ => Err(self.runner.failure(output)),
        }
    }

    async fn user_exists(&self, user: &str) -> Result<bool, SyncError> {
        let output = self.runner.output(["passwd", "--", user]).await?;
        match output.code {
            Some(0) => Ok(true),
            Some(GETENT_NOT_FOUND) => Ok(false),
            _ => Err(self.runner.failure(output)),
        }
    }
}
