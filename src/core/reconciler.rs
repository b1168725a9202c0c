//! Group-to-scheduler reconciliation.
//!
//! A run has three phases:
//!
//! 1. **Fetch**: read the group members from the [`Directory`] and the known
//!    users from [`SchedulerAccounts`]. Either failure aborts the run.
//! 2. **Diff**: candidates are group members the scheduler does not know.
//! 3. **Apply**: each candidate is checked against the directory, then
//!    registered under the default account. Missing accounts and failed adds
//!    are recorded in the [`SyncReport`] and do not stop the run.
//!
//! Per-user lines go to the [`DiagnosticSink`] as soon as they are decided,
//! so they are not lost when a later existence check aborts the run.

use std::collections::BTreeSet;

use tracing::Instrument;

use super::{
    missing_account_line, would_add_line, DiagnosticSink, Directory, SchedulerAccounts,
    StdoutDiagnostics, SyncError, SyncEvent, SyncReport,
};

/// Parameters of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Directory group whose members must be scheduler users.
    pub group: String,
    /// Association new users are attached to.
    pub default_account: String,
    /// Record would-be additions without invoking the add command.
    pub dry_run: bool,
}

impl ReconcileOptions {
    /// Options for `group` and `default_account` with dry run disabled.
    pub fn new(group: impl Into<String>, default_account: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            default_account: default_account.into(),
            dry_run: false,
        }
    }

    /// Enable or disable dry run.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Group members the scheduler does not know yet.
pub fn compute_candidates(
    membership: &BTreeSet<String>,
    scheduler_users: &BTreeSet<String>,
) -> BTreeSet<String> {
    membership.difference(scheduler_users).cloned().collect()
}

/// Adds directory group members missing from the scheduler's accounting store.
pub struct Reconciler<D, S> {
    directory: D,
    accounts: S,
    options: ReconcileOptions,
    diagnostics: Box<dyn DiagnosticSink>,
}

impl<D, S> Reconciler<D, S>
where
    D: Directory,
    S: SchedulerAccounts,
{
    /// Create a reconciler over the given collaborators.
    ///
    /// Diagnostics go to standard output until [`Self::with_diagnostics`]
    /// replaces the sink.
    pub fn new(directory: D, accounts: S, options: ReconcileOptions) -> Self {
        Self {
            directory,
            accounts,
            options,
            diagnostics: Box::new(StdoutDiagnostics),
        }
    }

    /// Send per-user lines to `sink` instead of standard output.
    #[must_use]
    pub fn with_diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.diagnostics = Box::new(sink);
        self
    }

    /// Options this reconciler runs with.
    pub const fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    /// Directory collaborator.
    pub const fn directory(&self) -> &D {
        &self.directory
    }

    /// Scheduler collaborator.
    pub const fn accounts(&self) -> &S {
        &self.accounts
    }

    /// Perform one reconciliation run.
    ///
    /// # Errors
    ///
    /// Returns the underlying error when the group cannot be listed, the
    /// scheduler's user report cannot be produced, or an existence check
    /// cannot be answered. Failed adds are not errors; they are reported as
    /// [`SyncEvent::AddFailed`].
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        let run_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!(
            "reconcile",
            %run_id,
            group = %self.options.group,
            dry_run = self.options.dry_run
        );
        self.run_inner().instrument(span).await
    }

    async fn run_inner(&self) -> Result<SyncReport, SyncError> {
        let ReconcileOptions {
            group,
            default_account,
            dry_run,
        } = &self.options;

        let membership = self.directory.list_group(group).await?;
        let scheduler_users = self.accounts.list_users().await?;
        tracing::debug!(
            members = membership.len(),
            scheduler_users = scheduler_users.len(),
            "fetched user sets"
        );

        let mut report = SyncReport::new(group.clone());
        let candidates = compute_candidates(&membership, &scheduler_users);
        if candidates.is_empty() {
            tracing::debug!("scheduler already up to date");
            return Ok(report);
        }
        tracing::info!(candidates = candidates.len(), "found users to add");

        for user in &candidates {
            if !self.directory.user_exists(user).await? {
                tracing::debug!(user = %user, "group member has no directory account");
                self.diagnostics.emit(&missing_account_line(group, user));
                report.record(SyncEvent::Missing { user: user.clone() });
                continue;
            }

            let account = default_account.clone();
            if *dry_run {
                tracing::info!(user = %user, account = %account, "dry run, not adding user");
                self.diagnostics.emit(&would_add_line(user, &account));
                report.record(SyncEvent::WouldAdd {
                    user: user.clone(),
                    account,
                });
                continue;
            }

            match self.accounts.add_user(user, &account).await {
                Ok(()) => {
                    tracing::info!(user = %user, account = %account, "added user");
                    report.record(SyncEvent::Added {
                        user: user.clone(),
                        account,
                    });
                }
                Err(e) => {
                    tracing::warn!(user = %user, account = %account, error = %e, "failed to add user");
                    report.record(SyncEvent::AddFailed {
                        user: user.clone(),
                        account,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report.candidates = candidates;
        Ok(report)
    }
}
