use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::RecordStore;
use crate::errors::FilesError;
use crate::record::{FileRecord, Namespace, NewRecord, Owner, RecordId};

/// Records kept in a map; ids are assigned from 1 upwards and never reused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCatalog {
    next_id: RecordId,
    records: BTreeMap<RecordId, FileRecord>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.values()
    }
}

impl RecordStore for MemoryCatalog {
    fn names_in(&self, namespace: &Namespace) -> Result<HashSet<String>> {
        Ok(self
            .records
            .values()
            .filter(|r| &r.namespace() == namespace)
            .map(|r| r.name.clone())
            .collect())
    }

    fn insert(&mut self, record: NewRecord) -> Result<FileRecord> {
        let namespace = record.namespace();
        if self
            .records
            .values()
            .any(|r| r.name == record.name && r.namespace() == namespace)
        {
            return Err(FilesError::NameTaken {
                namespace: namespace.to_string(),
                name: record.name,
            }
            .into());
        }

        self.next_id += 1;
        let stored = record.into_record(self.next_id, Utc::now());
        self.records.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn get(&self, id: RecordId) -> Result<Option<FileRecord>> {
        Ok(self.records.get(&id).cloned())
    }

    fn owned_by(&self, owner: &Owner) -> Result<Vec<FileRecord>> {
        Ok(self
            .records
            .values()
            .filter(|r| &r.owner == owner)
            .cloned()
            .collect())
    }

    fn remove(&mut self, id: RecordId) -> Result<Option<FileRecord>> {
        Ok(self.records.remove(&id))
    }
}
