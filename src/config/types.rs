//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.
//! - Visibility decides how links to a disk's files are built.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::paths;
use super::{
    CATALOG_FILE, DEFAULT_DISK, DEFAULT_FOLDER, DEFAULT_PRIVATE_URL, DEFAULT_PUBLIC_URL,
    PRIVATE_DISK,
};
use crate::naming::{DEFAULT_EXTENSION, ExtensionMap};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Public disks link straight to `{url}/{path}`; private disks link through `private_url`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        })
    }
}

impl FromStr for Visibility {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            other => Err(format!("invalid visibility: '{other}'")),
        }
    }
}

/// One configured local disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskConfig {
    pub root: PathBuf,
    pub visibility: Visibility,
    /// URL prefix for links to public files
    pub url: Option<String>,
}

/// Runtime configuration used by the manager.
#[derive(Debug, Clone)]
pub struct Config {
    /// Disk used when an operation doesn't name one
    pub default_disk: String,
    /// Folder used when an operation doesn't name one
    pub default_folder: String,
    /// Extension for content whose name carries none
    pub default_extension: String,
    /// Disks by name
    pub disks: BTreeMap<String, DiskConfig>,
    /// Extension -> category (file type)
    pub extensions: ExtensionMap,
    /// Where file records are persisted
    pub catalog_path: PathBuf,
    /// Link prefix for files on private disks (`{private_url}/{id}`)
    pub private_url: String,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let mut cfg = Self::with_root(paths::data_root());
        cfg.log_file = paths::default_log_path().ok();
        cfg
    }
}

impl Config {
    /// Config with the `public` and `private` disks and the catalog under `root`.
    /// File logging is off.
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let mut disks = BTreeMap::new();
        disks.insert(
            DEFAULT_DISK.to_string(),
            DiskConfig {
                root: root.join(DEFAULT_DISK),
                visibility: Visibility::Public,
                url: Some(DEFAULT_PUBLIC_URL.to_string()),
            },
        );
        disks.insert(
            PRIVATE_DISK.to_string(),
            DiskConfig {
                root: root.join(PRIVATE_DISK),
                visibility: Visibility::Private,
                url: None,
            },
        );

        Self {
            default_disk: DEFAULT_DISK.to_string(),
            default_folder: DEFAULT_FOLDER.to_string(),
            default_extension: DEFAULT_EXTENSION.to_string(),
            disks,
            extensions: ExtensionMap::default(),
            catalog_path: root.join(CATALOG_FILE),
            private_url: DEFAULT_PRIVATE_URL.to_string(),
            log_level: LogLevel::Normal,
            log_file: None,
        }
    }
}
