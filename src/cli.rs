use std::path::PathBuf;

use clap::Parser;

use hpc_user_sync::config::ConfigOverrides;

/// Add members of a directory group to the Slurm accounting store.
///
/// Group members unknown to Slurm are checked against the directory and added
/// with `sacctmgr -i add user <name> account=<account>`.
#[derive(Parser, Debug)]
#[command(name = "hpc-user-sync", version, about)]
pub struct CliArgs {
    /// JSON configuration file
    #[arg(long, env = "HPC_SYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory group to synchronize (default: ocfhpc)
    #[arg(long, env = "HPC_SYNC_GROUP")]
    pub group: Option<String>,

    /// Slurm account new users are attached to (default: users)
    #[arg(long, env = "HPC_SYNC_ACCOUNT")]
    pub account: Option<String>,

    /// Path to sacctmgr (default: resolved through PATH)
    #[arg(long, env = "HPC_SYNC_SACCTMGR")]
    pub sacctmgr: Option<PathBuf>,

    /// Check candidates without adding them
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// Overrides to apply on top of the configuration file.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            group: self.group.clone(),
            default_account: self.account.clone(),
            sacctmgr: self.sacctmgr.clone(),
        }
    }
}
