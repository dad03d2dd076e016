//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{data_root, default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, DiskConfig, LogLevel, Visibility};
pub use validate::validate_and_normalize;
pub use xml::{create_template_config, load_config, load_config_from_xml_path};

/// Defaults shared across submodules.
pub const DEFAULT_DISK: &str = "public";
pub const PRIVATE_DISK: &str = "private";
pub const DEFAULT_FOLDER: &str = "files";
pub const DEFAULT_PUBLIC_URL: &str = "/storage";
pub const DEFAULT_PRIVATE_URL: &str = "/private/file";
pub const CATALOG_FILE: &str = "catalog.json";
/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FILES_MANAGER_CONFIG";
