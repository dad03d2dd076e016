//! Storage disks: named backends holding file content.
//!
//! Paths handed to a disk are disk-relative `folder/name` strings. They are
//! checked for traversal before any backend touches them.

mod atomic;
pub mod helpers;
mod local;
mod memory;

pub use atomic::write_atomic;
pub use local::LocalDisk;
pub use memory::MemoryDisk;

use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::{Config, Visibility};
use crate::errors::FilesError;

/// Content capability the manager relies on.
pub trait Disk: Send + Sync + fmt::Debug {
    /// Short driver name recorded on each file (e.g. "local").
    fn driver(&self) -> &'static str;

    /// Write `bytes` at `path`, replacing existing content.
    fn put(&self, path: &str, bytes: &[u8]) -> Result<()>;

    fn get(&self, path: &str) -> Result<Vec<u8>>;

    fn exists(&self, path: &str) -> Result<bool>;

    /// Remove `path`. Missing content is not an error.
    fn delete(&self, path: &str) -> Result<()>;

    /// File names directly inside `folder`.
    fn list(&self, folder: &str) -> Result<Vec<String>>;
}

/// Reject absolute paths, traversal segments, backslashes and NUL bytes.
pub fn checked_path(path: &str) -> Result<&str> {
    let unsafe_path = path.is_empty()
        || path.starts_with('/')
        || path.contains('\\')
        || path.contains('\0')
        || path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..");
    if unsafe_path {
        return Err(FilesError::UnsafePath(path.to_string()).into());
    }
    Ok(path)
}

/// A registered disk with its visibility and public URL prefix.
#[derive(Debug)]
pub struct DiskEntry {
    pub visibility: Visibility,
    pub url: Option<String>,
    backend: Box<dyn Disk>,
}

impl DiskEntry {
    pub fn disk(&self) -> &dyn Disk {
        self.backend.as_ref()
    }
}

/// Name -> disk registry.
#[derive(Debug, Default)]
pub struct Disks {
    entries: BTreeMap<String, DiskEntry>,
}

impl Disks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Local disks for every disk configured in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut disks = Disks::new();
        for (name, disk) in &config.disks {
            disks.register(
                name,
                disk.visibility,
                disk.url.clone(),
                LocalDisk::new(&disk.root),
            );
        }
        Ok(disks)
    }

    /// Register (or replace) a disk under `name`.
    pub fn register(
        &mut self,
        name: &str,
        visibility: Visibility,
        url: Option<String>,
        backend: impl Disk + 'static,
    ) {
        self.entries.insert(
            name.to_string(),
            DiskEntry {
                visibility,
                url,
                backend: Box::new(backend),
            },
        );
    }

    /// Builder form of [`Disks::register`].
    pub fn with_disk(
        mut self,
        name: &str,
        visibility: Visibility,
        url: Option<&str>,
        backend: impl Disk + 'static,
    ) -> Self {
        self.register(name, visibility, url.map(str::to_string), backend);
        self
    }

    pub fn get(&self, name: &str) -> Result<&DiskEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| FilesError::UnknownDisk(name.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::checked_path;

    #[test]
    fn traversal_and_absolute_paths_are_rejected() {
        assert!(checked_path("files/a.jpg").is_ok());
        assert!(checked_path("a.jpg").is_ok());
        for bad in ["", "/etc/passwd", "files/../../x", "./a", "a//b", "a\\b", "a\0b"] {
            assert!(checked_path(bad).is_err(), "accepted {bad:?}");
        }
    }
}
