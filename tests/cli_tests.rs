use assert_cmd::cargo;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::tempdir;

const TEST_STRING_HASH: &str = "6f8db599de986fab7a21625b7916589c";

fn write_cfg(path: &Path, level: &str) {
    let xml = format!(
        r#"<config>
  <log_level>{level}</log_level>
  <dry_run>false</dry_run>
  <durability>data</durability>
</config>"#
    );
    fs::write(path, xml).unwrap();
}

/// Run the binary with an isolated config file.
fn run_bin(cfg: &Path, args: &[&Path], extra: &[&str]) -> Output {
    let me = cargo::cargo_bin!("copy_with_hash");
    Command::new(me)
        .env("COPY_WITH_HASH_CONFIG", cfg)
        .args(extra)
        .args(args)
        .output()
        .expect("spawn binary")
}

fn setup(level: &str) -> (tempfile::TempDir, PathBuf, PathBuf) {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg = base.join("config.xml");
    write_cfg(&cfg, level);
    let work = base.join("work");
    fs::create_dir_all(&work).unwrap();
    (td, cfg, work)
}

fn names(dir: &Path) -> Vec<String> {
    let mut v: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    v.sort();
    v
}

#[test]
fn one_directory_renames_in_place() {
    let (_td, cfg, work) = setup("quiet");
    fs::write(work.join("k3x9q2lf.zpa"), "test string").unwrap();

    let out = run_bin(&cfg, &[&work], &[]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(names(&work), vec![format!("k3x9q2lf.{TEST_STRING_HASH}.zpa")]);
}

#[test]
fn two_directories_copy() {
    let (_td, cfg, work) = setup("quiet");
    let dst = work.join("dst_dir");
    fs::write(work.join("k3x9q2lf.zpa"), "test string").unwrap();

    let out = run_bin(&cfg, &[&work, &dst], &[]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(names(&dst), vec![format!("k3x9q2lf.{TEST_STRING_HASH}.zpa")]);
    assert!(work.join("k3x9q2lf.zpa").exists(), "source must not be renamed by a copy");

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("copied 1"), "stdout: {stdout}");
}

#[test]
fn wrong_argument_count_prints_usage() {
    let (_td, cfg, work) = setup("quiet");
    fs::write(work.join("keep.txt"), "test string").unwrap();

    for args in [vec![], vec![work.as_path(), work.as_path(), work.as_path()]] {
        let out = run_bin(&cfg, &args, &[]);
        assert_eq!(out.status.code(), Some(2), "args: {args:?}");
        let stdout = String::from_utf8_lossy(&out.stdout);
        assert!(stdout.contains("Usage: copy_with_hash"), "stdout: {stdout}");
    }
    assert_eq!(names(&work), vec!["keep.txt".to_string()]);
}

#[test]
fn missing_directory_fails() {
    let (_td, cfg, work) = setup("quiet");
    let out = run_bin(&cfg, &[&work.join("absent")], &[]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Directory not found"), "stderr: {stderr}");
}

#[test]
fn dry_run_flag_touches_nothing() {
    let (_td, cfg, work) = setup("quiet");
    let dst = work.join("dst_dir");
    fs::write(work.join("a.txt"), "test string").unwrap();

    let out = run_bin(&cfg, &[&work], &["--dry-run"]);
    assert!(out.status.success());
    assert_eq!(names(&work), vec!["a.txt".to_string()]);

    let out = run_bin(&cfg, &[&work, &dst], &["--dry-run"]);
    assert!(out.status.success());
    assert!(!dst.exists(), "dry-run must not create the destination");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("dry-run copy"), "stdout: {stdout}");
}

#[test]
fn quoted_path_is_sanitized() {
    let (_td, cfg, work) = setup("quiet");
    fs::write(work.join("a.txt"), "test string").unwrap();
    let quoted = format!("\"{}\"", work.display());

    let out = run_bin(&cfg, &[Path::new(&quoted)], &[]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(names(&work), vec![format!("a.{TEST_STRING_HASH}.txt")]);
}

#[test]
fn json_logs_on_stderr() {
    let (_td, cfg, work) = setup("normal");
    fs::write(work.join("a.txt"), "test string").unwrap();

    let out = run_bin(&cfg, &[&work], &["--json"]);
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    let events: Vec<serde_json::Value> = stderr
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap_or_else(|e| panic!("not JSON ({e}): {l}")))
        .collect();
    let renamed = events
        .iter()
        .find(|ev| ev["fields"]["message"] == "Renamed")
        .unwrap_or_else(|| panic!("no Renamed event in: {stderr}"));
    assert_eq!(renamed["fields"]["hash"], TEST_STRING_HASH);
    assert_eq!(renamed["level"], "INFO");
}

#[test]
fn log_file_from_flag_receives_events() {
    let (_td, cfg, work) = setup("normal");
    fs::write(work.join("a.txt"), "test string").unwrap();
    let log = cfg.with_file_name("run.log");

    let out = run_bin(&cfg, &[&work], &["--log-file", &log.to_string_lossy()]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let contents = fs::read_to_string(&log).expect("log file written");
    assert!(contents.contains("Renamed"), "log: {contents}");
}

#[test]
fn print_config_shows_env_override() {
    let (_td, cfg, _work) = setup("quiet");
    let out = run_bin(&cfg, &[], &["--print-config"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("COPY_WITH_HASH_CONFIG"), "stdout: {stdout}");
    assert!(stdout.contains(&cfg.display().to_string()), "stdout: {stdout}");
}

#[test]
fn init_config_writes_template_once() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg = base.join("nested").join("config.xml");

    let out = run_bin(&cfg, &[], &["--init-config"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let written = copy_with_hash::load_config_from_xml_path(&cfg).expect("template parses");
    assert!(!written.dry_run);

    let again = run_bin(&cfg, &[], &["--init-config"]);
    assert!(!again.status.success(), "second init must refuse to overwrite");
}

#[test]
fn invalid_config_value_fails_before_any_work() {
    let (_td, cfg, work) = setup("quiet");
    fs::write(&cfg, "<config><durability>sometimes</durability></config>").unwrap();
    fs::write(work.join("a.txt"), "test string").unwrap();

    let out = run_bin(&cfg, &[&work], &[]);
    assert!(!out.status.success());
    assert_eq!(names(&work), vec!["a.txt".to_string()]);
}
