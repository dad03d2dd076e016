//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template on request.
//!
//! Notes:
//! - This module only reads/writes the config file; disk roots are checked in `validate`.
//! - Unknown top-level elements are rejected so typos surface early.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{data_root, default_config_path, path_has_symlink_ancestor};
use super::types::{Config, DiskConfig, LogLevel, Visibility};
use super::{DEFAULT_DISK, DEFAULT_FOLDER, DEFAULT_PRIVATE_URL, DEFAULT_PUBLIC_URL, PRIVATE_DISK};
use crate::naming::DEFAULT_EXTENSION;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    /// Base directory for the default disks and the catalog
    root: Option<String>,
    default_disk: Option<String>,
    default_folder: Option<String>,
    default_extension: Option<String>,
    catalog: Option<String>,
    private_url: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    disks: Option<XmlDisks>,
    extensions: Option<XmlExtensions>,
}

#[derive(Debug, Deserialize)]
struct XmlDisks {
    #[serde(rename = "disk", default)]
    disk: Vec<XmlDisk>,
}

#[derive(Debug, Deserialize)]
struct XmlDisk {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@root")]
    root: String,
    #[serde(rename = "@visibility", default)]
    visibility: Option<String>,
    #[serde(rename = "@url", default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct XmlExtensions {
    #[serde(rename = "extension", default)]
    extension: Vec<XmlExtension>,
}

#[derive(Debug, Deserialize)]
struct XmlExtension {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "$text", default)]
    category: String,
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = match non_empty(parsed.root.as_deref()) {
        Some(root) => Config::with_root(root),
        None => Config::default(),
    };

    if let Some(s) = non_empty(parsed.default_disk.as_deref()) {
        cfg.default_disk = s.to_string();
    }
    if let Some(s) = parsed.default_folder.as_deref() {
        cfg.default_folder = s.trim().trim_matches('/').to_string();
    }
    if let Some(s) = non_empty(parsed.default_extension.as_deref()) {
        cfg.default_extension = s.to_string();
    }
    if let Some(s) = non_empty(parsed.catalog.as_deref()) {
        cfg.catalog_path = PathBuf::from(s);
    }
    if let Some(s) = non_empty(parsed.private_url.as_deref()) {
        cfg.private_url = s.to_string();
    }
    if let Some(s) = non_empty(parsed.log_level.as_deref()) {
        if let Ok(level) = s.parse::<LogLevel>() {
            cfg.log_level = level;
        }
    }
    if let Some(s) = parsed.log_file.as_deref() {
        // An explicit empty element turns file logging off.
        cfg.log_file = non_empty(Some(s)).map(PathBuf::from);
    }

    // Listed disks replace the defaults entirely.
    if let Some(disks) = parsed.disks {
        let mut map = BTreeMap::new();
        for d in disks.disk {
            let name = d.name.trim().to_string();
            if name.is_empty() {
                bail!("disk entry without a name");
            }
            let visibility = match non_empty(d.visibility.as_deref()) {
                Some(v) => v
                    .parse::<Visibility>()
                    .map_err(|e| anyhow::anyhow!("disk '{name}': {e}"))?,
                None => Visibility::Public,
            };
            map.insert(
                name,
                DiskConfig {
                    root: PathBuf::from(d.root.trim()),
                    visibility,
                    url: non_empty(d.url.as_deref()).map(str::to_string),
                },
            );
        }
        cfg.disks = map;
    }

    if let Some(exts) = parsed.extensions {
        for e in exts.extension {
            cfg.extensions.insert(&e.name, e.category.trim());
        }
    }

    Ok(cfg)
}

/// Load a Config from a specific XML file path (quick_xml).
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid config xml '{}'", path.display()))
}

/// Resolve and load the effective config.
///
/// Precedence: `explicit` path (must exist) > `$FILES_MANAGER_CONFIG` / OS default path
/// (used if present) > built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(p) = explicit {
        debug!(path = %p.display(), "loading explicit config");
        return load_config_from_xml_path(p);
    }
    let path = default_config_path()?;
    if path.exists() {
        debug!(path = %path.display(), "loading config");
        return load_config_from_xml_path(&path);
    }
    debug!(path = %path.display(), "no config file; using defaults");
    Ok(Config::default())
}

/// Create a commented template config at `path` (refuses to overwrite or follow symlinked ancestors).
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
    }

    let root = data_root();
    let content = format!(
        "<!--\n  files_manager configuration (XML)\n\n    root               -> base directory for the default disks and the catalog\n    default_disk       -> disk used when a command doesn't pass --disk\n    default_folder     -> folder used when a command doesn't pass --folder\n    default_extension  -> extension for content whose name has none\n    catalog            -> JSON file holding file records\n    private_url        -> link prefix for files on private disks\n    log_level          -> quiet | normal | info | debug\n    log_file           -> path to log file (empty = stdout only)\n    disks              -> <disk name=\"..\" root=\"..\" visibility=\"public|private\" url=\"..\"/>\n    extensions         -> <extension name=\"jpg\">img</extension>; name=\"*\" sets the fallback\n\n  CLI flags override XML values.\n-->\n<config>\n  <root>{root}</root>\n  <default_disk>{DEFAULT_DISK}</default_disk>\n  <default_folder>{DEFAULT_FOLDER}</default_folder>\n  <default_extension>{DEFAULT_EXTENSION}</default_extension>\n  <private_url>{DEFAULT_PRIVATE_URL}</private_url>\n  <log_level>normal</log_level>\n  <disks>\n    <disk name=\"{DEFAULT_DISK}\" root=\"{public}\" visibility=\"public\" url=\"{DEFAULT_PUBLIC_URL}\"/>\n    <disk name=\"{PRIVATE_DISK}\" root=\"{private}\" visibility=\"private\"/>\n  </disks>\n  <extensions>\n    <extension name=\"*\">file</extension>\n  </extensions>\n</config>\n",
        root = root.display(),
        public = root.join(DEFAULT_DISK).display(),
        private = root.join(PRIVATE_DISK).display(),
    );

    let mut opts = OpenOptions::new();
    opts.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let mut file = opts
        .open(path)
        .with_context(|| format!("create config '{}'", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("write config '{}'", path.display()))?;

    info!("Created template config at {}", path.display());
    Ok(())
}
