//! # HPC User Sync
//!
//! Adds members of a directory group to the Slurm accounting store so they can
//! submit jobs.
//!
//! The crate is built to run as a one-shot job from cron or a systemd timer.
//! Each run recomputes everything from the two systems of record:
//!
//! - **Directory**: group members and account existence, read through NSS
//!   (`getent`) or `ldapsearch`
//! - **Scheduler**: known users, read with `sacctmgr -noP list users format=User`
//!
//! Group members the scheduler does not know are checked against the
//! directory and registered with `sacctmgr -i add user <name> account=<default>`.
//! Members without a directory account are reported and skipped. A failed add is
//! logged and reported but does not stop the run.
//!
//! ## Library use
//!
//! ```rust,ignore
//! use hpc_user_sync::core::{ReconcileOptions, Reconciler};
//! use hpc_user_sync::infra::{NssDirectory, SacctmgrCli};
//!
//! let reconciler = Reconciler::new(
//!     NssDirectory::default(),
//!     SacctmgrCli::default(),
//!     ReconcileOptions::new("ocfhpc", "users"),
//! );
//! let report = reconciler.run().await?;
//! for line in report.diagnostics() {
//!     println!("{line}");
//! }
//! ```
//!
//! Runs are not locked internally. Two concurrent runs against the same
//! accounting store may both try to add the same user; serialize them
//! externally (e.g. `flock` in the cron entry).

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Reconciliation logic, collaborator traits, and run reports.
pub mod core;
/// Configuration models for the group, scheduler CLI, and directory backend.
pub mod config;
/// Builders to construct a reconciler from configuration.
pub mod builders;
/// Infrastructure adapters for the directory service and the scheduler CLI.
pub mod infra;
/// Shared utilities.
pub mod util;
