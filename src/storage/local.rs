//! Filesystem disk rooted at a directory.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::debug;
use walkdir::WalkDir;

use super::atomic::{TEMP_PREFIX, write_atomic};
use super::helpers::io_error_with_help;
use super::{Disk, checked_path};
use crate::errors::FilesError;

#[derive(Debug, Clone)]
pub struct LocalDisk {
    root: PathBuf,
}

impl LocalDisk {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn full_path(&self, path: &str) -> Result<PathBuf> {
        Ok(self.root.join(checked_path(path)?))
    }
}

impl Disk for LocalDisk {
    fn driver(&self) -> &'static str {
        "local"
    }

    fn put(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let full = self.full_path(path)?;
        write_atomic(&full, bytes)?;
        debug!(path = %full.display(), bytes = bytes.len(), "local disk: wrote content");
        Ok(())
    }

    fn get(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.full_path(path)?;
        match fs::read(&full) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(FilesError::MissingContent {
                disk: self.root.display().to_string(),
                path: path.to_string(),
            }
            .into()),
            Err(e) => Err(io_error_with_help("read content", &full)(e)),
        }
    }

    fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.full_path(path)?.is_file())
    }

    fn delete(&self, path: &str) -> Result<()> {
        let full = self.full_path(path)?;
        match fs::remove_file(&full) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error_with_help("delete content", &full)(e)),
        }
    }

    fn list(&self, folder: &str) -> Result<Vec<String>> {
        let folder = folder.trim_matches('/');
        let dir = if folder.is_empty() {
            self.root.clone()
        } else {
            self.full_path(folder)?
        };
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names: Vec<String> = WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .filter(|name| !name.starts_with(TEMP_PREFIX))
            .collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_list_delete() {
        let td = tempfile::tempdir().unwrap();
        let disk = LocalDisk::new(td.path());

        disk.put("files/a.txt", b"hello").unwrap();
        disk.put("files/b.txt", b"world").unwrap();
        assert!(disk.exists("files/a.txt").unwrap());
        assert_eq!(disk.get("files/a.txt").unwrap(), b"hello");
        assert_eq!(disk.list("files").unwrap(), vec!["a.txt", "b.txt"]);

        disk.delete("files/a.txt").unwrap();
        disk.delete("files/a.txt").unwrap();
        assert_eq!(disk.list("/files/").unwrap(), vec!["b.txt"]);
        assert!(disk.list("nowhere").unwrap().is_empty());
    }

    #[test]
    fn missing_content_is_typed() {
        let td = tempfile::tempdir().unwrap();
        let disk = LocalDisk::new(td.path());
        let err = disk.get("files/none.txt").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FilesError>(),
            Some(FilesError::MissingContent { .. })
        ));
    }

    #[test]
    fn escaping_the_root_is_refused() {
        let td = tempfile::tempdir().unwrap();
        let disk = LocalDisk::new(td.path().join("root"));
        assert!(disk.put("../outside.txt", b"x").is_err());
        assert!(!td.path().join("outside.txt").exists());
    }
}
