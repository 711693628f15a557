#![cfg(unix)]

use copy_with_hash::config::create_template_config;
use copy_with_hash::platform::{open_log_file_secure_append, set_dir_mode_0700};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use tempfile::tempdir;

fn mode_of(p: &std::path::Path) -> u32 {
    fs::metadata(p).expect("metadata").permissions().mode() & 0o777
}

#[test]
fn template_config_is_private() {
    let td = tempdir().expect("tempdir");
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg = base.join("app").join("config.xml");

    create_template_config(&cfg).expect("create_template_config");
    assert_eq!(mode_of(&cfg), 0o600, "config file mode");
    assert_eq!(mode_of(cfg.parent().unwrap()), 0o700, "config dir mode");
}

#[test]
fn new_log_file_is_0600_and_dir_helper_sets_0700() {
    let td = tempdir().expect("tempdir");
    let dir = td.path().join("logs");
    fs::create_dir_all(&dir).unwrap();
    set_dir_mode_0700(&dir).expect("set_dir_mode_0700");
    assert_eq!(mode_of(&dir), 0o700);

    let log = dir.join("run.log");
    drop(open_log_file_secure_append(&log).expect("open log"));
    assert_eq!(mode_of(&log), 0o600);
}
