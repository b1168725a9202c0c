//! In-memory directory for development/testing.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::{Directory, SyncError};

/// Directory kept in memory, recording every existence check.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    groups: BTreeMap<String, BTreeSet<String>>,
    accounts: BTreeSet<String>,
    unreachable: bool,
    failing_checks: BTreeSet<String>,
    checked: Mutex<Vec<String>>,
}

impl InMemoryDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group with the given members.
    #[must_use]
    pub fn with_group<I, U>(mut self, name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<String>,
    {
        self.groups
            .insert(name.into(), members.into_iter().map(Into::into).collect());
        self
    }

    /// Add accounts that `user_exists` answers true for.
    #[must_use]
    pub fn with_accounts<I, U>(mut self, accounts: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<String>,
    {
        self.accounts.extend(accounts.into_iter().map(Into::into));
        self
    }

    /// Make every lookup fail as if the server could not be reached.
    #[must_use]
    pub const fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Make `user_exists` fail for `user` while other lookups keep working.
    #[must_use]
    pub fn failing_check(mut self, user: impl Into<String>) -> Self {
        self.failing_checks.insert(user.into());
        self
    }

    /// Identifiers passed to `user_exists`, in call order.
    pub fn checked(&self) -> Vec<String> {
        self.checked
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn ensure_reachable(&self) -> Result<(), SyncError> {
        if self.unreachable {
            return Err(SyncError::Directory("server unreachable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn list_group(&self, group: &str) -> Result<BTreeSet<String>, SyncError> {
        self.ensure_reachable()?;
        self.groups
            .get(group)
            .cloned()
            .ok_or_else(|| SyncError::GroupNotFound(group.to_string()))
    }

    async fn user_exists(&self, user: &str) -> Result<bool, SyncError> {
        self.ensure_reachable()?;
        self.checked
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(user.to_string());
        if self.failing_checks.contains(user) {
            return Err(SyncError::Directory(format!("lookup of {user} timed out")));
        }
        Ok(self.accounts.contains(user))
    }
}
