//! Config module.
//! Provides configuration types, the config file location, XML loading, and
//! directory validation performed before a run.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{config_path_override, default_config_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use validate::{ensure_destination_dir, ensure_source_dir};
pub use xml::{create_template_config, load_config, load_config_from_xml_path};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "COPY_WITH_HASH_CONFIG";
/// Directory created under the OS config dir.
pub const APP_DIR_NAME: &str = "copy_with_hash";
pub const CONFIG_FILE_NAME: &str = "config.xml";
