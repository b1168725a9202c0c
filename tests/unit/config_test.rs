//! Tests for configuration validation

use std::path::PathBuf;

use hpc_user_sync::config::{ConfigOverrides, DirectoryBackendConfig, SyncConfig};

fn ldap_backend() -> DirectoryBackendConfig {
    DirectoryBackendConfig::Ldapsearch {
        program: PathBuf::from("ldapsearch"),
        uri: "ldaps://ldap.example.org".to_string(),
        group_base: "ou=Group,dc=example,dc=org".to_string(),
        people_base: "ou=People,dc=example,dc=org".to_string(),
    }
}

#[test]
fn test_default_config() {
    let config = SyncConfig::default();
    assert_eq!(config.group, "ocfhpc");
    assert_eq!(config.default_account, "users");
    assert_eq!(config.sacctmgr, PathBuf::from("sacctmgr"));
    assert!(matches!(config.directory, DirectoryBackendConfig::Nss { .. }));
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_group_rejected() {
    let config = SyncConfig {
        group: String::new(),
        ..SyncConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_account_with_equals_rejected() {
    let config = SyncConfig {
        default_account: "users account=root".to_string(),
        ..SyncConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.contains("default_account"));
}

#[test]
fn test_empty_sacctmgr_rejected() {
    let config = SyncConfig {
        sacctmgr: PathBuf::new(),
        ..SyncConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_ldapsearch_backend_validation() {
    let mut config = SyncConfig {
        directory: ldap_backend(),
        ..SyncConfig::default()
    };
    assert!(config.validate().is_ok());

    if let DirectoryBackendConfig::Ldapsearch { uri, .. } = &mut config.directory {
        uri.clear();
    }
    let err = config.validate().unwrap_err();
    assert!(err.starts_with("directory invalid"));
}

#[test]
fn test_config_from_json_uses_defaults() {
    let config = SyncConfig::from_json_str("{}").unwrap();
    assert_eq!(config, SyncConfig::default());
}

#[test]
fn test_config_from_json_ldapsearch() {
    let json = r#"{
        "group": "hpcusers",
        "default_account": "research",
        "sacctmgr": "/usr/bin/sacctmgr",
        "directory": {
            "backend": "ldapsearch",
            "uri": "ldaps://ldap.example.org",
            "group_base": "ou=Group,dc=example,dc=org",
            "people_base": "ou=People,dc=example,dc=org"
        }
    }"#;

    let config = SyncConfig::from_json_str(json).unwrap();
    assert_eq!(config.group, "hpcusers");
    assert_eq!(config.default_account, "research");
    assert_eq!(config.sacctmgr, PathBuf::from("/usr/bin/sacctmgr"));
    assert_eq!(config.directory, ldap_backend());
}

#[test]
fn test_config_from_json_nss_custom_getent() {
    let json = r#"{ "directory": { "backend": "nss", "getent": "/usr/bin/getent" } }"#;
    let config = SyncConfig::from_json_str(json).unwrap();
    assert_eq!(
        config.directory,
        DirectoryBackendConfig::Nss {
            getent: PathBuf::from("/usr/bin/getent")
        }
    );
}

#[test]
fn test_config_from_json_rejects_invalid() {
    assert!(SyncConfig::from_json_str(r#"{ "group": "" }"#).is_err());
    assert!(SyncConfig::from_json_str(r#"{ "directory": { "backend": "ad" } }"#).is_err());
    assert!(SyncConfig::from_json_str("not json").is_err());
}

#[test]
fn test_config_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sync.json");
    std::fs::write(&path, r#"{ "group": "staff" }"#).unwrap();

    let config = SyncConfig::from_json_file(&path).unwrap();
    assert_eq!(config.group, "staff");

    let missing = SyncConfig::from_json_file(dir.path().join("absent.json"));
    assert!(missing.unwrap_err().contains("cannot read"));
}

#[test]
fn test_overrides_take_precedence() {
    let config = SyncConfig::default().with_overrides(ConfigOverrides {
        group: Some("staff".to_string()),
        default_account: None,
        sacctmgr: Some(PathBuf::from("/opt/slurm/bin/sacctmgr")),
    });
    assert_eq!(config.group, "staff");
    assert_eq!(config.default_account, "users");
    assert_eq!(config.sacctmgr, PathBuf::from("/opt/slurm/bin/sacctmgr"));
}
