//! Per-run outcome records.

use std::collections::BTreeSet;

/// What happened to a single candidate during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// The user was registered with the scheduler.
    Added {
        /// User identifier.
        user: String,
        /// Association the user was attached to.
        account: String,
    },
    /// Dry run: the user would have been registered.
    WouldAdd {
        /// User identifier.
        user: String,
        /// Association the user would be attached to.
        account: String,
    },
    /// The directory has no account for this group member.
    Missing {
        /// User identifier.
        user: String,
    },
    /// The add command failed; the run continued.
    AddFailed {
        /// User identifier.
        user: String,
        /// Association the user was to be attached to.
        account: String,
        /// Rendered error.
        reason: String,
    },
}

impl SyncEvent {
    /// User identifier the event refers to.
    pub fn user(&self) -> &str {
        match self {
            Self::Added { user, .. }
            | Self::WouldAdd { user, .. }
            | Self::Missing { user }
            | Self::AddFailed { user, .. } => user,
        }
    }
}

/// Diagnostic line for a `group` member without a directory account.
pub fn missing_account_line(group: &str, user: &str) -> String {
    format!("User {user} in the {group} group does not exist.")
}

/// Dry-run line for a user that would be added under `account`.
pub fn would_add_line(user: &str, account: &str) -> String {
    format!("Would add user {user} to account {account}.")
}

/// Result of one reconciliation run.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Directory group that was reconciled.
    pub group: String,
    /// Group members absent from the scheduler.
    pub candidates: BTreeSet<String>,
    /// One event per candidate, in processing order.
    pub events: Vec<SyncEvent>,
}

impl SyncReport {
    /// Create an empty report for `group`.
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            ..Self::default()
        }
    }

    /// Append an event.
    pub fn record(&mut self, event: SyncEvent) {
        self.events.push(event);
    }

    /// True when the scheduler already knew every group member.
    pub fn is_noop(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Users that were registered.
    pub fn added(&self) -> Vec<&str> {
        self.users_matching(|e| matches!(e, SyncEvent::Added { .. }))
    }

    /// Users skipped because the directory has no such account.
    pub fn missing(&self) -> Vec<&str> {
        self.users_matching(|e| matches!(e, SyncEvent::Missing { .. }))
    }

    /// Users whose add command failed.
    pub fn failed(&self) -> Vec<&str> {
        self.users_matching(|e| matches!(e, SyncEvent::AddFailed { .. }))
    }

    /// One line per missing account, suitable for standard output.
    pub fn diagnostics(&self) -> Vec<String> {
        self.missing()
            .into_iter()
            .map(|user| missing_account_line(&self.group, user))
            .collect()
    }

    fn users_matching(&self, pred: impl Fn(&SyncEvent) -> bool) -> Vec<&str> {
        self.events
            .iter()
            .filter(|e| pred(e))
            .map(SyncEvent::user)
            .collect()
    }
}
