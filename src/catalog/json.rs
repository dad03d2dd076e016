//! JSON file catalog.
//!
//! Every mutation runs under an exclusive advisory lock on a sidecar `.lock`
//! file: the catalog is re-read, changed, and rewritten atomically before the
//! lock is released. Reads serve the snapshot from the last open or mutation.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{MemoryCatalog, RecordStore};
use crate::record::{FileRecord, Namespace, NewRecord, Owner, RecordId};
use crate::storage::helpers::io_error_with_help;
use crate::storage::write_atomic;

#[derive(Debug)]
pub struct JsonCatalog {
    path: PathBuf,
    inner: MemoryCatalog,
}

impl JsonCatalog {
    /// Open the catalog at `path`; a missing file yields an empty catalog.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let inner = read_catalog(&path)?;
        debug!(path = %path.display(), records = inner.len(), "catalog opened");
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> impl Iterator<Item = &FileRecord> {
        self.inner.records()
    }

    /// Apply `change` to the on-disk catalog while holding the lock.
    ///
    /// The snapshot is replaced only after the rewrite succeeds, so a failed
    /// change or write leaves both the file and the snapshot untouched.
    fn mutate<T>(&mut self, change: impl FnOnce(&mut MemoryCatalog) -> Result<T>) -> Result<T> {
        let _lock = CatalogLock::acquire(&self.path)?;
        let mut fresh = read_catalog(&self.path)?;
        let out = change(&mut fresh)?;
        let json = serde_json::to_vec_pretty(&fresh).context("serialize catalog")?;
        write_atomic(&self.path, &json)
            .with_context(|| format!("write catalog '{}'", self.path.display()))?;
        self.inner = fresh;
        Ok(out)
    }
}

fn read_catalog(path: &Path) -> Result<MemoryCatalog> {
    match fs::read_to_string(path) {
        Ok(contents) if contents.trim().is_empty() => Ok(MemoryCatalog::default()),
        Ok(contents) => serde_json::from_str(&contents)
            .with_context(|| format!("parse catalog '{}'", path.display())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(MemoryCatalog::default()),
        Err(e) => Err(io_error_with_help("read catalog", path)(e)),
    }
}

impl RecordStore for JsonCatalog {
    fn names_in(&self, namespace: &Namespace) -> Result<HashSet<String>> {
        self.inner.names_in(namespace)
    }

    fn insert(&mut self, record: NewRecord) -> Result<FileRecord> {
        self.mutate(|catalog| catalog.insert(record))
    }

    fn get(&self, id: RecordId) -> Result<Option<FileRecord>> {
        self.inner.get(id)
    }

    fn owned_by(&self, owner: &Owner) -> Result<Vec<FileRecord>> {
        self.inner.owned_by(owner)
    }

    fn remove(&mut self, id: RecordId) -> Result<Option<FileRecord>> {
        self.mutate(|catalog| catalog.remove(id))
    }
}

/// Exclusive lock on `<catalog>.lock`, released on drop.
struct CatalogLock {
    file: File,
    path: PathBuf,
}

impl CatalogLock {
    fn acquire(catalog: &Path) -> Result<Self> {
        let path = catalog.with_extension("lock");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(io_error_with_help("create catalog directory", parent))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(io_error_with_help("open catalog lock", &path))?;
        file.lock_exclusive()
            .map_err(io_error_with_help("lock catalog", &path))?;
        Ok(Self { file, path })
    }
}

impl Drop for CatalogLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!(path = %self.path.display(), error = %e, "failed to release catalog lock");
        }
    }
}
