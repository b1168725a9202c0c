//! Reconciliation logic and the collaborator abstractions it depends on.

pub mod collaborators;
pub mod diagnostics;
pub mod error;
pub mod reconciler;
pub mod report;

pub use collaborators::{Directory, SchedulerAccounts};
pub use diagnostics::{DiagnosticSink, InMemoryDiagnostics, StdoutDiagnostics};
pub use error::{AppResult, SyncError};
pub use reconciler::{compute_candidates, ReconcileOptions, Reconciler};
pub use report::{missing_account_line, would_add_line, SyncEvent, SyncReport};
