use anyhow::{Result, anyhow};
use std::fs;
use std::path::Path;

use crate::naming::{extension_of, stem_of};
use crate::storage::helpers::io_error_with_help;

/// Incoming file content with the name the client gave it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(original_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            original_name: original_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a local file; its file name becomes the original name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let original_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow!("upload path has no UTF-8 file name: {}", path.display()))?
            .to_string();
        let bytes = fs::read(path).map_err(io_error_with_help("read upload", path))?;
        Ok(Self::new(original_name, bytes))
    }

    /// Original base name without extension.
    pub fn stem(&self) -> &str {
        stem_of(&self.original_name)
    }

    pub fn extension(&self) -> Option<String> {
        extension_of(&self.original_name)
    }
}
