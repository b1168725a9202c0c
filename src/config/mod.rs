//! Configuration models for the group, the scheduler CLI and the directory backend.

pub mod sync;

pub use sync::{ConfigOverrides, DirectoryBackendConfig, SyncConfig, DEFAULT_ACCOUNT, DEFAULT_GROUP};
