//! Tests for utility functions

use hpc_user_sync::util::{init_tracing, init_tracing_with, DEFAULT_FILTER};

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
    init_tracing_with("debug");
    assert!(tracing::dispatcher::has_been_set());
}

#[test]
fn test_default_filter_is_quiet() {
    assert_eq!(DEFAULT_FILTER, "warn");
}
