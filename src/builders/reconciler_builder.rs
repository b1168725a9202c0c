//! Builders to construct a reconciler from configuration.

use crate::config::{DirectoryBackendConfig, SyncConfig};
use crate::core::{Directory, ReconcileOptions, Reconciler, SchedulerAccounts, SyncError};
use crate::infra::{LdapsearchDirectory, LdapsearchSettings, NssDirectory, SacctmgrCli};

/// Reconciler over configuration-selected backends.
pub type ConfiguredReconciler = Reconciler<Box<dyn Directory>, Box<dyn SchedulerAccounts>>;

/// Build the directory backend named by `cfg`.
pub fn build_directory(cfg: &DirectoryBackendConfig) -> Box<dyn Directory> {
    match cfg {
        DirectoryBackendConfig::Nss { getent } => Box::new(NssDirectory::new(getent.clone())),
        DirectoryBackendConfig::Ldapsearch {
            program,
            uri,
            group_base,
            people_base,
        } => Box::new(LdapsearchDirectory::new(LdapsearchSettings {
            program: program.clone(),
            uri: uri.clone(),
            group_base: group_base.clone(),
            people_base: people_base.clone(),
        })),
    }
}

/// Build the scheduler accounting backend for `cfg`.
pub fn build_accounts(cfg: &SyncConfig) -> Box<dyn SchedulerAccounts> {
    Box::new(SacctmgrCli::new(cfg.sacctmgr.clone()))
}

/// Reconcile options derived from `cfg`.
pub fn build_options(cfg: &SyncConfig, dry_run: bool) -> ReconcileOptions {
    ReconcileOptions::new(cfg.group.clone(), cfg.default_account.clone()).with_dry_run(dry_run)
}

/// Validate `cfg` and build a reconciler over its backends.
pub fn build_reconciler(cfg: &SyncConfig, dry_run: bool) -> Result<ConfiguredReconciler, SyncError> {
    cfg.validate().map_err(SyncError::Config)?;
    tracing::debug!(
        group = %cfg.group,
        account = %cfg.default_account,
        sacctmgr = %cfg.sacctmgr.display(),
        "building reconciler"
    );
    Ok(Reconciler::new(
        build_directory(&cfg.directory),
        build_accounts(cfg),
        build_options(cfg, dry_run),
    ))
}
