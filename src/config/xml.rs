//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Writes a commented template on request (`--init-config`), never implicitly.
//!
//! Notes:
//! - This module only reads/writes the config file; directory validation happens elsewhere.
//! - Unknown XML fields are rejected so typos surface instead of being ignored.
//! - Values are read as strings and trimmed before parsing; empty elements mean "unset".

use anyhow::{Context, Result, anyhow, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::{config_path_override, default_config_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use crate::fs_ops::DurabilityMode;
use crate::platform::{set_dir_mode_0700, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "dry_run")]
    dry_run: Option<String>,
    #[serde(rename = "durability")]
    durability: Option<String>,
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|t| !t.is_empty())
}

fn parse_bool(field: &str, s: &str) -> Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => bail!("invalid boolean for <{field}>: '{s}'"),
    }
}

// Map XmlConfig -> Config, starting from defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = s.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
    }
    if let Some(s) = non_empty(parsed.log_file.as_deref()) {
        cfg.log_file = Some(PathBuf::from(s));
    }
    if let Some(s) = non_empty(parsed.dry_run.as_deref()) {
        cfg.dry_run = parse_bool("dry_run", s)?;
    }
    if let Some(s) = non_empty(parsed.durability.as_deref()) {
        cfg.durability = s.parse::<DurabilityMode>()?;
    }

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in '{}'", path.display()))
}

/// Resolve and load the effective config.
///
/// - `$COPY_WITH_HASH_CONFIG` set: that file must exist and parse.
/// - Otherwise the default path is used if a file exists there.
/// - Otherwise built-in defaults.
pub fn load_config() -> Result<Config> {
    if let Some(p) = config_path_override() {
        debug!(path = %p.display(), "Loading config from environment override");
        return load_config_from_xml_path(&p);
    }

    match default_config_path() {
        Ok(p) if p.is_file() => {
            debug!(path = %p.display(), "Loading config from default location");
            load_config_from_xml_path(&p)
        }
        _ => Ok(Config::default()),
    }
}

const TEMPLATE: &str = r#"<!--
  copy_with_hash configuration (XML)

    log_level   -> quiet | normal | info | debug
    log_file    -> path to a log file (optional; stderr is always used)
    dry_run     -> true/false; decide and report but never touch files
    durability  -> full (fsync every copy) | data (flush only)

  CLI flags override XML values.
-->
<config>
  <log_level>normal</log_level>
  <log_file></log_file>
  <dry_run>false</dry_run>
  <durability>full</durability>
</config>
"#;

/// Write the template config to `path`. Fails if the file already exists.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config dir '{}'", parent.display()))?;
        let _ = set_dir_mode_0700(parent);
    }

    write_config_secure_new_0600(path, TEMPLATE.as_bytes())?;
    debug!(path = %path.display(), "Created template config");
    Ok(())
}
