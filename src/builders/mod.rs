//! Builders wiring configuration to concrete collaborators.

pub mod reconciler_builder;

pub use reconciler_builder::{
    build_accounts, build_directory, build_options, build_reconciler, ConfiguredReconciler,
};
