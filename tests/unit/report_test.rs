//! Tests for run reports

use hpc_user_sync::core::{SyncEvent, SyncReport};

fn sample_report() -> SyncReport {
    let mut report = SyncReport::new("ocfhpc");
    report.candidates = ["bob", "dave", "erin"].iter().map(|s| (*s).to_string()).collect();
    report.record(SyncEvent::Added {
        user: "bob".to_string(),
        account: "users".to_string(),
    });
    report.record(SyncEvent::Missing {
        user: "dave".to_string(),
    });
    report.record(SyncEvent::AddFailed {
        user: "erin".to_string(),
        account: "users".to_string(),
        reason: "exit 1".to_string(),
    });
    report
}

#[test]
fn test_report_partitions_events() {
    let report = sample_report();
    assert!(!report.is_noop());
    assert_eq!(report.added(), vec!["bob"]);
    assert_eq!(report.missing(), vec!["dave"]);
    assert_eq!(report.failed(), vec!["erin"]);
}

#[test]
fn test_report_diagnostics_name_missing_users() {
    let report = sample_report();
    assert_eq!(
        report.diagnostics(),
        vec!["User dave in the ocfhpc group does not exist.".to_string()]
    );
}

#[test]
fn test_empty_report_is_noop() {
    let report = SyncReport::new("ocfhpc");
    assert!(report.is_noop());
    assert!(report.diagnostics().is_empty());
}

#[test]
fn test_event_user() {
    let event = SyncEvent::WouldAdd {
        user: "frank".to_string(),
        account: "users".to_string(),
    };
    assert_eq!(event.user(), "frank");
}
