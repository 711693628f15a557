use assert_fs::TempDir;
use assert_fs::prelude::*;
use serial_test::serial;
use std::path::PathBuf;

use copy_with_hash::{DurabilityMode, LogLevel, default_config_path, load_config, load_config_from_xml_path};

#[test]
fn reads_every_field() {
    let td = TempDir::new().unwrap();
    let cfg = td.child("config.xml");
    cfg.write_str(
        r#"<config>
  <log_level>debug</log_level>
  <log_file>/var/log/copy_with_hash.log</log_file>
  <dry_run>yes</dry_run>
  <durability>data</durability>
</config>"#,
    )
    .unwrap();

    let c = load_config_from_xml_path(cfg.path()).expect("load");
    assert_eq!(c.log_level, LogLevel::Debug);
    assert_eq!(c.log_file, Some(PathBuf::from("/var/log/copy_with_hash.log")));
    assert!(c.dry_run);
    assert_eq!(c.durability, DurabilityMode::Data);
}

#[test]
fn missing_and_blank_fields_fall_back_to_defaults() {
    let td = TempDir::new().unwrap();
    let cfg = td.child("config.xml");
    cfg.write_str("<config>\n  <log_file>   </log_file>\n  <log_level> info </log_level>\n</config>")
        .unwrap();

    let c = load_config_from_xml_path(cfg.path()).unwrap();
    assert_eq!(c.log_level, LogLevel::Info);
    assert!(c.log_file.is_none());
    assert!(!c.dry_run);
    assert_eq!(c.durability, DurabilityMode::Full);
}

#[test]
fn unknown_field_is_rejected() {
    let td = TempDir::new().unwrap();
    let cfg = td.child("config.xml");
    cfg.write_str("<config><dryrun>true</dryrun></config>").unwrap();
    assert!(load_config_from_xml_path(cfg.path()).is_err());
}

#[test]
fn malformed_xml_is_rejected() {
    let td = TempDir::new().unwrap();
    let cfg = td.child("config.xml");
    cfg.write_str("<config><log_level>debug</config>").unwrap();
    assert!(load_config_from_xml_path(cfg.path()).is_err());
}

#[test]
#[serial]
fn env_override_drives_path_and_load() {
    let td = TempDir::new().unwrap();
    let cfg = td.child("custom.xml");
    cfg.write_str("<config><log_level>quiet</log_level></config>").unwrap();

    unsafe {
        std::env::set_var("COPY_WITH_HASH_CONFIG", cfg.path());
    }
    let resolved = default_config_path().expect("default_config_path");
    let loaded = load_config();
    unsafe {
        std::env::remove_var("COPY_WITH_HASH_CONFIG");
    }

    assert_eq!(resolved, cfg.path());
    assert_eq!(loaded.expect("load_config").log_level, LogLevel::Quiet);
}

#[test]
#[serial]
fn env_override_pointing_nowhere_is_an_error() {
    let td = TempDir::new().unwrap();
    let missing = td.child("absent.xml");

    unsafe {
        std::env::set_var("COPY_WITH_HASH_CONFIG", missing.path());
    }
    let loaded = load_config();
    unsafe {
        std::env::remove_var("COPY_WITH_HASH_CONFIG");
    }

    assert!(loaded.is_err(), "an explicit config path must exist");
}
