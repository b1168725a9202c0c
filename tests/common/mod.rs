//! Fake `sacctmgr` and `getent` scripts shared by the process-level tests.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

// Spawning a script another thread is still writing fails with ETXTBSY.
static SCRIPTS: Mutex<()> = Mutex::new(());

/// Serialize script creation and execution within one test binary.
pub fn lock_scripts() -> MutexGuard<'static, ()> {
    SCRIPTS
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

/// `sacctmgr` printing `report` (printf escapes allowed) for the list command
/// and appending every other invocation to `log` before exiting `add_status`.
pub fn fake_sacctmgr(dir: &Path, report: &str, log: &Path, add_status: i32) -> PathBuf {
    let body = format!(
        r#"if [ "$1" = "-noP" ]; then
  printf '{report}'
  exit 0
fi
echo "$@" >> "{log}"
if [ {add_status} -ne 0 ]; then
  echo "sacctmgr: error: could not add $4" >&2
fi
exit {add_status}
"#,
        log = log.display()
    );
    write_script(dir, "sacctmgr", &body)
}

/// `sacctmgr` whose list command fails.
pub fn broken_sacctmgr(dir: &Path) -> PathBuf {
    write_script(
        dir,
        "sacctmgr",
        "echo 'sacctmgr: error: Problem talking to the database' >&2\nexit 1\n",
    )
}

/// `getent` knowing group `ocfhpc` = {alice, bob, dave} and accounts alice and bob.
///
/// Keys are only answered after `--`; anything else exits 1.
pub fn fake_getent(dir: &Path) -> PathBuf {
    write_script(
        dir,
        "getent",
        r#"case "$1:$2:$3" in
  group:--:ocfhpc) echo "ocfhpc:*:2390:alice,bob,dave"; exit 0 ;;
  group:--:*) exit 2 ;;
  passwd:--:alice|passwd:--:bob) echo "$3:x:1000:1000::/home/$3:/bin/bash"; exit 0 ;;
  passwd:--:*) exit 2 ;;
esac
exit 1
"#,
    )
}

pub fn read_log(log: &Path) -> Vec<String> {
    std::fs::read_to_string(log)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
