//! In-process disk, handy for tests and throwaway managers.

use anyhow::{Result, anyhow};
use std::collections::BTreeMap;
use std::sync::Mutex;

use super::{Disk, checked_path};
use crate::errors::FilesError;

#[derive(Debug, Default)]
pub struct MemoryDisk {
    blobs: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryDisk {
    pub fn new() -> Self {
        Self::default()
    }

    fn blobs(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.blobs
            .lock()
            .map_err(|_| anyhow!("memory disk lock poisoned"))
    }
}

impl Disk for MemoryDisk {
    fn driver(&self) -> &'static str {
        "memory"
    }

    fn put(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let path = checked_path(path)?;
        self.blobs()?.insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    fn get(&self, path: &str) -> Result<Vec<u8>> {
        let path = checked_path(path)?;
        self.blobs()?.get(path).cloned().ok_or_else(|| {
            FilesError::MissingContent {
                disk: "memory".into(),
                path: path.to_string(),
            }
            .into()
        })
    }

    fn exists(&self, path: &str) -> Result<bool> {
        let path = checked_path(path)?;
        Ok(self.blobs()?.contains_key(path))
    }

    fn delete(&self, path: &str) -> Result<()> {
        let path = checked_path(path)?;
        self.blobs()?.remove(path);
        Ok(())
    }

    fn list(&self, folder: &str) -> Result<Vec<String>> {
        let folder = folder.trim_matches('/');
        let prefix = if folder.is_empty() {
            String::new()
        } else {
            format!("{folder}/")
        };
        Ok(self
            .blobs()?
            .keys()
            .filter_map(|k| k.strip_prefix(prefix.as_str()))
            .filter(|rest| !rest.contains('/'))
            .map(str::to_string)
            .collect())
    }
}
