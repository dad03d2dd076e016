//! Config validation logic.
//! Ensures the default disk exists, disk roots are usable directories, and the catalog directory exists.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use super::types::Config;
use crate::naming::normalize_extension;

/// Validate the config, creating missing disk roots and canonicalizing them in place.
pub fn validate_and_normalize(cfg: &mut Config) -> Result<()> {
    if cfg.disks.is_empty() {
        bail!("no disks configured");
    }
    if !cfg.disks.contains_key(&cfg.default_disk) {
        error!(disk = %cfg.default_disk, "default disk is not configured");
        bail!(
            "default_disk '{}' is not one of the configured disks ({})",
            cfg.default_disk,
            cfg.disks.keys().cloned().collect::<Vec<_>>().join(", ")
        );
    }

    cfg.default_folder = cfg.default_folder.trim().trim_matches('/').to_string();
    if cfg.default_folder.split('/').any(|seg| seg == "..") {
        bail!("default_folder must not contain '..': {}", cfg.default_folder);
    }

    let ext = normalize_extension(&cfg.default_extension);
    if ext.is_empty() {
        bail!("default_extension '{}' is not a usable extension", cfg.default_extension);
    }
    cfg.default_extension = ext;

    if cfg.private_url.trim().is_empty() {
        bail!("private_url must not be empty");
    }

    for (name, disk) in cfg.disks.iter_mut() {
        ensure_dir_is_or_create(&disk.root, name)?;
        disk.root = dunce::canonicalize(&disk.root)
            .with_context(|| format!("canonicalize root of disk '{name}'"))?;
        debug!(disk = %name, root = %disk.root.display(), visibility = %disk.visibility, "disk ready");
    }

    if let Some(parent) = cfg.catalog_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_is_or_create(parent, "catalog directory")?;
    }

    info!(
        "Config validated: default_disk='{}' default_folder='{}' catalog='{}' log_file='{}'",
        cfg.default_disk,
        cfg.default_folder,
        cfg.catalog_path.display(),
        cfg.log_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<none>".into())
    );
    Ok(())
}

/// Ensure directory exists (create if missing). If exists, it must be a directory.
fn ensure_dir_is_or_create(path: &Path, name: &str) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            error!("{name} exists but isn't a directory: {}", path.display());
            bail!("{name} exists but isn't a directory: {}", path.display());
        }
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create {name} directory '{}'", path.display()))?;
        info!("Created {name} directory: {}", path.display());
    }
    Ok(())
}
