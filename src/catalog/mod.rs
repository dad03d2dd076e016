//! Record stores: persistence of file metadata.
//!
//! The manager only needs the names used in a namespace plus insert/lookup/remove.
//! Stores enforce the one-name-per-namespace invariant on insert.

mod json;
mod memory;

pub use json::JsonCatalog;
pub use memory::MemoryCatalog;

use anyhow::Result;
use std::collections::HashSet;

use crate::record::{FileRecord, NewRecord, Namespace, Owner, RecordId};

pub trait RecordStore {
    /// Names currently occupying `namespace`.
    fn names_in(&self, namespace: &Namespace) -> Result<HashSet<String>>;

    /// Persist a new record; fails with `FilesError::NameTaken` if the name is in use.
    fn insert(&mut self, record: NewRecord) -> Result<FileRecord>;

    fn get(&self, id: RecordId) -> Result<Option<FileRecord>>;

    /// Records of `owner`, oldest first.
    fn owned_by(&self, owner: &Owner) -> Result<Vec<FileRecord>>;

    fn remove(&mut self, id: RecordId) -> Result<Option<FileRecord>>;
}
