//! Tests for error types

use hpc_user_sync::core::SyncError;

#[test]
fn test_group_not_found_error() {
    let err = SyncError::GroupNotFound("ocfhpc".to_string());
    assert_eq!(format!("{}", err), "group not found: ocfhpc");
}

#[test]
fn test_command_failed_error() {
    let err = SyncError::CommandFailed {
        program: "sacctmgr".to_string(),
        code: Some(1),
        stderr: "Problem talking to the database".to_string(),
    };
    assert_eq!(
        format!("{}", err),
        "`sacctmgr` exited with status 1: Problem talking to the database"
    );
}

#[test]
fn test_command_killed_error() {
    let err = SyncError::CommandFailed {
        program: "getent".to_string(),
        code: None,
        stderr: String::new(),
    };
    assert_eq!(format!("{}", err), "`getent` exited with signal: ");
}

#[test]
fn test_command_spawn_error_keeps_source() {
    let err = SyncError::CommandSpawn {
        program: "/nonexistent/sacctmgr".to_string(),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    };
    assert!(format!("{}", err).starts_with("failed to run `/nonexistent/sacctmgr`"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_config_error() {
    let err = SyncError::Config("group must not be empty".to_string());
    assert_eq!(format!("{}", err), "config invalid: group must not be empty");
}
