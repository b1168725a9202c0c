//! `hpc-user-sync`: one-shot directory group to Slurm user synchronization.

mod cli;

use anyhow::{anyhow, Context};
use clap::Parser;

use hpc_user_sync::builders::build_reconciler;
use hpc_user_sync::config::SyncConfig;
use hpc_user_sync::core::AppResult;
use hpc_user_sync::util::init_tracing;

use crate::cli::CliArgs;

#[tokio::main(flavor = "current_thread")]
async fn main() -> AppResult<()> {
    // Loaded before tracing so RUST_LOG may come from .env.
    let dotenv = dotenvy::dotenv();
    init_tracing();
    match dotenv {
        Err(e) if !e.not_found() => tracing::warn!(error = %e, "ignoring unreadable .env file"),
        _ => {}
    }

    let args = CliArgs::parse();

    let base = match &args.config {
        Some(path) => SyncConfig::from_json_file(path)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => SyncConfig::default(),
    };
    let config = base.with_overrides(args.overrides());

    // Per-user lines reach stdout from inside the run, as they are decided.
    let reconciler = build_reconciler(&config, args.dry_run)?;
    reconciler.run().await?;

    Ok(())
}
