//! Tests for builder modules

use std::path::PathBuf;

use hpc_user_sync::builders::{build_options, build_reconciler};
use hpc_user_sync::config::{DirectoryBackendConfig, SyncConfig};
use hpc_user_sync::core::SyncError;

#[test]
fn test_build_options_from_config() {
    let config = SyncConfig {
        group: "staff".to_string(),
        default_account: "research".to_string(),
        ..SyncConfig::default()
    };

    let options = build_options(&config, true);
    assert_eq!(options.group, "staff");
    assert_eq!(options.default_account, "research");
    assert!(options.dry_run);
}

#[test]
fn test_build_reconciler_defaults() {
    let reconciler = build_reconciler(&SyncConfig::default(), false).unwrap();
    assert_eq!(reconciler.options().group, "ocfhpc");
    assert_eq!(reconciler.options().default_account, "users");
    assert!(!reconciler.options().dry_run);
}

#[test]
fn test_build_reconciler_ldapsearch_backend() {
    let config = SyncConfig {
        directory: DirectoryBackendConfig::Ldapsearch {
            program: PathBuf::from("ldapsearch"),
            uri: "ldap://localhost".to_string(),
            group_base: "ou=Group,dc=example,dc=org".to_string(),
            people_base: "ou=People,dc=example,dc=org".to_string(),
        },
        ..SyncConfig::default()
    };
    assert!(build_reconciler(&config, false).is_ok());
}

#[test]
fn test_build_reconciler_rejects_invalid_config() {
    let config = SyncConfig {
        default_account: String::new(),
        ..SyncConfig::default()
    };
    let result = build_reconciler(&config, false);
    assert!(matches!(result, Err(SyncError::Config(_))));
}
