//! File records, owners and namespaces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type RecordId = u64;

/// The entity a file belongs to, written `kind:id` (e.g. `user:1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Owner {
    pub kind: String,
    pub id: String,
}

impl Owner {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

impl FromStr for Owner {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once(':') {
            Some((kind, id)) if !kind.trim().is_empty() && !id.trim().is_empty() => {
                Ok(Owner::new(kind.trim(), id.trim()))
            }
            _ => Err(format!("invalid owner '{s}': expected KIND:ID")),
        }
    }
}

/// A (disk, folder) pair. File names are unique within one namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace {
    pub disk: String,
    pub folder: String,
}

impl Namespace {
    /// Build a namespace; surrounding slashes on the folder are dropped.
    pub fn new(disk: impl Into<String>, folder: &str) -> Self {
        Self {
            disk: disk.into(),
            folder: folder.trim().trim_matches('/').to_string(),
        }
    }

    /// Disk-relative path of `name` inside this namespace.
    pub fn path_of(&self, name: &str) -> String {
        if self.folder.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.folder, name)
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:/{}", self.disk, self.folder)
    }
}

/// Metadata of one stored file. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: RecordId,
    pub owner: Owner,
    /// Resolved, collision-free name including extension.
    pub name: String,
    pub folder: String,
    pub disk: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub description: String,
    pub extension: String,
    /// Category from the extension map (img, word, pdf, ...).
    pub file_type: String,
    pub mime: String,
    /// Driver of the disk the content was written to.
    pub driver: String,
    pub size: u64,
    pub created_at: DateTime<Utc>,
}

impl FileRecord {
    pub fn namespace(&self) -> Namespace {
        Namespace::new(self.disk.clone(), &self.folder)
    }

    /// Disk-relative path of the content.
    pub fn path(&self) -> String {
        self.namespace().path_of(&self.name)
    }

    /// Name without its extension.
    pub fn stem(&self) -> &str {
        self.name
            .strip_suffix(self.extension.as_str())
            .and_then(|s| s.strip_suffix('.'))
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.name)
    }
}

/// Record fields before the store assigns an id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub owner: Owner,
    pub name: String,
    pub folder: String,
    pub disk: String,
    pub group: String,
    pub description: String,
    pub extension: String,
    pub file_type: String,
    pub mime: String,
    pub driver: String,
    pub size: u64,
}

impl NewRecord {
    pub fn namespace(&self) -> Namespace {
        Namespace::new(self.disk.clone(), &self.folder)
    }

    pub fn path(&self) -> String {
        self.namespace().path_of(&self.name)
    }

    pub fn into_record(self, id: RecordId, created_at: DateTime<Utc>) -> FileRecord {
        FileRecord {
            id,
            owner: self.owner,
            name: self.name,
            folder: self.folder,
            disk: self.disk,
            group: self.group,
            description: self.description,
            extension: self.extension,
            file_type: self.file_type,
            mime: self.mime,
            driver: self.driver,
            size: self.size,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_round_trips_through_display() {
        let owner: Owner = "user:42".parse().unwrap();
        assert_eq!(owner, Owner::new("user", "42"));
        assert_eq!(owner.to_string(), "user:42");
        assert!("user".parse::<Owner>().is_err());
        assert!(":1".parse::<Owner>().is_err());
    }

    #[test]
    fn namespace_paths() {
        assert_eq!(Namespace::new("public", "/testing/files/").path_of("a.pdf"), "testing/files/a.pdf");
        assert_eq!(Namespace::new("public", "").path_of("a.pdf"), "a.pdf");
    }
}
