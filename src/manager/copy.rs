//! Copy operations.
//!
//! - `copy` / `copy_to_owner`: duplicate one record's content into the target namespace.
//! - `copy_many` / `copy_many_to_owner`: fold over the records in order, carrying the names
//!   placed so far per namespace so siblings never collide.
//!
//! Unset `disk`, `folder` and `name` overrides inherit from the source; `group` and
//! `description` are not inherited. Batches stop at the first failing element; copies
//! made before it are kept.

use anyhow::{Context, Result};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use tracing::{error, info, warn};

use super::{FileManager, desired_name, insert_or_cleanup, occupied_names};
use crate::catalog::RecordStore;
use crate::errors::FilesError;
use crate::naming::{resolve, resolve_normalized};
use crate::options::CopyOptions;
use crate::record::{FileRecord, Namespace, NewRecord, Owner};
use crate::shutdown;
use crate::storage::Disk;

/// Names taken per namespace during one copy operation.
///
/// A namespace is seeded from the store and disk the first time it is targeted;
/// afterwards every name placed by the operation is added to it.
#[derive(Debug, Default)]
pub struct UsedNames {
    by_namespace: HashMap<Namespace, HashSet<String>>,
}

impl UsedNames {
    pub fn new() -> Self {
        Self::default()
    }

    fn names_for<S: RecordStore>(
        &mut self,
        store: &S,
        disk: &dyn Disk,
        namespace: &Namespace,
    ) -> Result<&mut HashSet<String>> {
        match self.by_namespace.entry(namespace.clone()) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => Ok(e.insert(occupied_names(store, disk, namespace)?)),
        }
    }

    fn claim(&mut self, namespace: &Namespace, name: String) {
        self.by_namespace
            .entry(namespace.clone())
            .or_default()
            .insert(name);
    }
}

impl<S: RecordStore> FileManager<S> {
    /// Copy `source` for its own owner.
    pub fn copy(&mut self, source: &FileRecord, overrides: &CopyOptions) -> Result<FileRecord> {
        let owner = source.owner.clone();
        self.copy_record(source, &owner, overrides, &mut UsedNames::new())
    }

    /// Copy `source` and attach the copy to `owner`.
    pub fn copy_to_owner(
        &mut self,
        source: &FileRecord,
        owner: &Owner,
        overrides: &CopyOptions,
    ) -> Result<FileRecord> {
        self.copy_record(source, owner, overrides, &mut UsedNames::new())
    }

    /// Copy every record (each for its own owner), applying one override set.
    pub fn copy_many(
        &mut self,
        sources: &[FileRecord],
        overrides: &CopyOptions,
    ) -> Result<Vec<FileRecord>> {
        self.copy_batch(sources, None, overrides)
    }

    /// Copy every record to `owner`, applying one override set.
    pub fn copy_many_to_owner(
        &mut self,
        sources: &[FileRecord],
        owner: &Owner,
        overrides: &CopyOptions,
    ) -> Result<Vec<FileRecord>> {
        self.copy_batch(sources, Some(owner), overrides)
    }

    fn copy_batch(
        &mut self,
        sources: &[FileRecord],
        owner: Option<&Owner>,
        overrides: &CopyOptions,
    ) -> Result<Vec<FileRecord>> {
        let (_, copies) = sources.iter().enumerate().try_fold(
            (UsedNames::new(), Vec::with_capacity(sources.len())),
            |(mut used, mut copies), (index, source)| -> Result<(UsedNames, Vec<FileRecord>)> {
                if shutdown::is_requested() {
                    warn!(index, completed = copies.len(), "batch copy interrupted");
                    return Err(FilesError::Interrupted.into());
                }
                let target_owner = owner.unwrap_or(&source.owner);
                let copy = self
                    .copy_record(source, target_owner, overrides, &mut used)
                    .map_err(|e| {
                        error!(index, source = source.id, completed = copies.len(), error = %format!("{e:#}"), "batch copy aborted");
                        e.context(FilesError::BatchAborted {
                            index,
                            completed: copies.len(),
                        })
                    })?;
                copies.push(copy);
                Ok((used, copies))
            },
        )?;
        info!(count = copies.len(), "batch copy complete");
        Ok(copies)
    }

    fn copy_record(
        &mut self,
        source: &FileRecord,
        owner: &Owner,
        overrides: &CopyOptions,
        used: &mut UsedNames,
    ) -> Result<FileRecord> {
        let namespace = Namespace::new(
            overrides
                .disk
                .clone()
                .unwrap_or_else(|| source.disk.clone()),
            overrides.folder.as_deref().unwrap_or(&source.folder),
        );
        let target = self.disks.get(&namespace.disk)?;
        let bytes = self
            .disks
            .get(&source.disk)?
            .disk()
            .get(&source.path())
            .with_context(|| format!("read source file {} ('{}')", source.id, source.path()))?;

        let taken = used.names_for(&self.store, target.disk(), &namespace)?;
        let name = match desired_name(overrides) {
            Some(desired) => resolve(desired, &source.extension, taken),
            None => resolve_normalized(source.stem(), &source.extension, taken),
        };

        let draft = NewRecord {
            owner: owner.clone(),
            name: name.clone(),
            folder: namespace.folder.clone(),
            disk: namespace.disk.clone(),
            group: overrides.group.clone().unwrap_or_default(),
            description: overrides.description.clone().unwrap_or_default(),
            extension: source.extension.clone(),
            file_type: source.file_type.clone(),
            mime: source.mime.clone(),
            driver: target.disk().driver().to_string(),
            size: bytes.len() as u64,
        };

        let path = draft.path();
        target
            .disk()
            .put(&path, &bytes)
            .map_err(|e| FilesError::DuplicationFailed {
                name: name.clone(),
                reason: format!("{e:#}"),
            })?;
        let record = insert_or_cleanup(&mut self.store, target.disk(), draft)?;
        used.claim(&namespace, record.name.clone());

        info!(source = source.id, copy = record.id, owner = %record.owner, namespace = %namespace, name = %record.name, "copied file");
        Ok(record)
    }
}
