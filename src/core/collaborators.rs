//! Collaborator traits consumed by the reconciler.
//!
//! The reconciler never talks to LDAP or Slurm directly. It drives two narrow
//! capabilities, so production adapters and in-memory fakes are interchangeable.

use std::collections::BTreeSet;

use async_trait::async_trait;

use super::SyncError;

/// Read access to the directory service holding groups and accounts.
///
/// # Example
///
/// ```rust,ignore
/// use std::collections::BTreeSet;
/// use async_trait::async_trait;
/// use hpc_user_sync::core::{Directory, SyncError};
///
/// struct Static;
///
/// #[async_trait]
/// impl Directory for Static {
///     async fn list_group(&self, _group: &str) -> Result<BTreeSet<String>, SyncError> {
///         Ok(BTreeSet::from(["alice".to_string()]))
///     }
///
///     async fn user_exists(&self, user: &str) -> Result<bool, SyncError> {
///         Ok(user == "alice")
///     }
/// }
/// ```
#[async_trait]
pub trait Directory: Send + Sync {
    /// Return the members of `group`.
    ///
    /// Fails with [`SyncError::GroupNotFound`] for an unknown group and with
    /// another variant when the directory cannot be queried.
    async fn list_group(&self, group: &str) -> Result<BTreeSet<String>, SyncError>;

    /// Return whether an account named `user` exists.
    async fn user_exists(&self, user: &str) -> Result<bool, SyncError>;
}

/// Read/write access to the scheduler's accounting store.
#[async_trait]
pub trait SchedulerAccounts: Send + Sync {
    /// Return every user currently known to the accounting store.
    async fn list_users(&self) -> Result<BTreeSet<String>, SyncError>;

    /// Register `user` under the association `account`, committing immediately.
    async fn add_user(&self, user: &str, account: &str) -> Result<(), SyncError>;
}

#[async_trait]
impl<T: Directory + ?Sized> Directory for Box<T> {
    async fn list_group(&self, group: &str) -> Result<BTreeSet<String>, SyncError> {
        (**self).list_group(group).await
    }

    async fn user_exists(&self, user: &str) -> Result<bool, SyncError> {
        (**self).user_exists(user).await
    }
}

#[async_trait]
impl<T: SchedulerAccounts + ?Sized> SchedulerAccounts for Box<T> {
    async fn list_users(&self) -> Result<BTreeSet<String>, SyncError> {
        (**self).list_users().await
    }

    async fn add_user(&self, user: &str, account: &str) -> Result<(), SyncError> {
        (**self).add_user(user, account).await
    }
}
