//! In-memory accounting store for development/testing.

use std::collections::BTreeSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::{SchedulerAccounts, SyncError};

#[derive(Debug, Default)]
struct State {
    users: BTreeSet<String>,
    added: Vec<(String, String)>,
    list_calls: usize,
    fail_list: Option<i32>,
    fail_adds: BTreeSet<String>,
}

/// Accounting store kept in memory, recording every add request.
#[derive(Debug, Default)]
pub struct InMemoryAccounts {
    state: Mutex<State>,
}

impl InMemoryAccounts {
    /// Create a store that already knows `users`.
    pub fn new<I, U>(users: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<String>,
    {
        let state = State {
            users: users.into_iter().map(Into::into).collect(),
            ..State::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    /// Make `list_users` fail as if the report command exited with `code`.
    #[must_use]
    pub fn failing_list(self, code: i32) -> Self {
        self.with_state(|s| s.fail_list = Some(code));
        self
    }

    /// Make `add_user` fail for `user`.
    #[must_use]
    pub fn failing_add(self, user: impl Into<String>) -> Self {
        let user = user.into();
        self.with_state(|s| {
            s.fail_adds.insert(user);
        });
        self
    }

    /// Users currently known.
    pub fn users(&self) -> BTreeSet<String> {
        self.with_state(|s| s.users.clone())
    }

    /// Every add request that reached the store, as `(user, account)`.
    pub fn added(&self) -> Vec<(String, String)> {
        self.with_state(|s| s.added.clone())
    }

    /// Number of times the user list was requested.
    pub fn list_calls(&self) -> usize {
        self.with_state(|s| s.list_calls)
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let mut guard = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut guard)
    }
}

#[async_trait]
impl SchedulerAccounts for InMemoryAccounts {
    async fn list_users(&self) -> Result<BTreeSet<String>, SyncError> {
        self.with_state(|s| {
            s.list_calls += 1;
            if let Some(code) = s.fail_list {
                return Err(SyncError::CommandFailed {
                    program: "sacctmgr".to_string(),
                    code: Some(code),
                    stderr: String::new(),
                });
            }
            Ok(s.users.clone())
        })
    }

    async fn add_user(&self, user: &str, account: &str) -> Result<(), SyncError> {
        self.with_state(|s| {
            s.added.push((user.to_string(), account.to_string()));
            if s.fail_adds.contains(user) {
                return Err(SyncError::CommandFailed {
                    program: "sacctmgr".to_string(),
                    code: Some(1),
                    stderr: format!("could not add {user}"),
                });
            }
            s.users.insert(user.to_string());
            Ok(())
        })
    }
}
