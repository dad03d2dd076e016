//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/data/log paths and detects symlinked ancestors for safety.

use anyhow::{Result, anyhow};
use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::CONFIG_ENV;

/// Config path: `$FILES_MANAGER_CONFIG` if set, else the OS config dir.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(p));
    }
    if let Some(base) = config_dir() {
        return Ok(base.join("files_manager").join("config.xml"));
    }
    env::var("HOME")
        .map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join("files_manager")
                .join("config.xml")
        })
        .map_err(|_| anyhow!("cannot determine a config directory (no config dir and no HOME)"))
}

/// OS data directory for disks and the catalog.
pub fn data_root() -> PathBuf {
    if let Some(base) = data_dir() {
        return base.join("files_manager");
    }
    env::var("HOME")
        .map(|h| PathBuf::from(h).join(".local").join("share").join("files_manager"))
        .unwrap_or_else(|_| PathBuf::from("files_manager"))
}

/// OS-appropriate default log file path (inside the data root).
pub fn default_log_path() -> Result<PathBuf> {
    let base = data_root();
    // ensure dir exists (best-effort)
    let _ = fs::create_dir_all(&base);
    Ok(base.join("files_manager.log"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
