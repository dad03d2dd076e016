//! File manager: store, list, read, delete, link and copy owner files.
//!
//! Names are resolved against the names already used in the target
//! (disk, folder) namespace: the record store's names plus whatever the disk
//! already holds in that folder.

mod copy;
mod upload;

pub use copy::UsedNames;
pub use upload::Upload;

use anyhow::{Context, Result};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::catalog::{JsonCatalog, RecordStore};
use crate::config::{Config, Visibility};
use crate::errors::FilesError;
use crate::naming::{ExtensionMap, PLACEHOLDER_BASE, normalize_extension, resolve};
use crate::options::StoreOptions;
use crate::record::{FileRecord, Namespace, NewRecord, Owner, RecordId};
use crate::storage::{Disk, Disks};

/// Group reserved for an owner's single avatar.
pub const AVATAR_GROUP: &str = "avatar";

#[derive(Debug)]
pub struct FileManager<S: RecordStore> {
    config: Config,
    disks: Disks,
    store: S,
}

impl FileManager<JsonCatalog> {
    /// Local disks from `config` plus the JSON catalog at `config.catalog_path`.
    pub fn open(config: Config) -> Result<Self> {
        let disks = Disks::from_config(&config)?;
        let store = JsonCatalog::open(&config.catalog_path)?;
        Ok(Self::new(config, disks, store))
    }
}

impl<S: RecordStore> FileManager<S> {
    pub fn new(config: Config, disks: Disks, store: S) -> Self {
        Self {
            config,
            disks,
            store,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn disks(&self) -> &Disks {
        &self.disks
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store an upload for `owner`.
    ///
    /// The base name is `options.name` or the upload's own stem; the extension
    /// comes from the upload's name, else the configured default.
    pub fn add_file(
        &mut self,
        owner: &Owner,
        upload: &Upload,
        options: &StoreOptions,
    ) -> Result<FileRecord> {
        let extension = upload
            .extension()
            .unwrap_or_else(|| self.config.default_extension.clone());
        let desired = desired_name(options).unwrap_or(upload.stem());
        self.store_content(owner, &upload.bytes, desired, &extension, options, None)
    }

    /// Store raw content with an explicit extension.
    pub fn add_file_with_content(
        &mut self,
        owner: &Owner,
        bytes: &[u8],
        extension: &str,
        options: &StoreOptions,
    ) -> Result<FileRecord> {
        let mut extension = normalize_extension(extension);
        if extension.is_empty() {
            extension = self.config.default_extension.clone();
        }
        let desired = desired_name(options).unwrap_or(PLACEHOLDER_BASE);
        self.store_content(owner, bytes, desired, &extension, options, None)
    }

    /// Store `upload` as the owner's avatar, then drop any previous avatar.
    ///
    /// `options.group` is ignored; avatars always use [`AVATAR_GROUP`].
    pub fn set_avatar(
        &mut self,
        owner: &Owner,
        upload: &Upload,
        options: &StoreOptions,
    ) -> Result<FileRecord> {
        let previous = self.files_in_group(owner, AVATAR_GROUP)?;
        let extension = upload
            .extension()
            .unwrap_or_else(|| self.config.default_extension.clone());
        let desired = desired_name(options).unwrap_or(upload.stem());
        let avatar = self.store_content(
            owner,
            &upload.bytes,
            desired,
            &extension,
            options,
            Some(AVATAR_GROUP),
        )?;

        for old in previous {
            self.delete(old.id)
                .with_context(|| format!("remove previous avatar {} of {owner}", old.id))?;
        }
        Ok(avatar)
    }

    /// The owner's current avatar, if any.
    pub fn avatar(&self, owner: &Owner) -> Result<Option<FileRecord>> {
        Ok(self.files_in_group(owner, AVATAR_GROUP)?.pop())
    }

    /// All records of `owner`, oldest first.
    pub fn files(&self, owner: &Owner) -> Result<Vec<FileRecord>> {
        self.store.owned_by(owner)
    }

    pub fn files_in_group(&self, owner: &Owner, group: &str) -> Result<Vec<FileRecord>> {
        let mut files = self.store.owned_by(owner)?;
        files.retain(|r| r.group == group);
        Ok(files)
    }

    pub fn record(&self, id: RecordId) -> Result<FileRecord> {
        self.store
            .get(id)?
            .ok_or_else(|| FilesError::RecordNotFound(id).into())
    }

    /// Read a record's content back from its disk.
    pub fn content(&self, record: &FileRecord) -> Result<Vec<u8>> {
        self.disks
            .get(&record.disk)?
            .disk()
            .get(&record.path())
            .with_context(|| format!("read file {} ('{}')", record.id, record.path()))
    }

    /// Remove a record, then its content.
    ///
    /// Content that cannot be removed is left behind with a warning, so a
    /// record never points at missing content.
    pub fn delete(&mut self, id: RecordId) -> Result<FileRecord> {
        let record = self.record(id)?;
        let disk = self.disks.get(&record.disk)?.disk();
        self.store
            .remove(id)?
            .ok_or(FilesError::RecordNotFound(id))?;
        if let Err(e) = disk.delete(&record.path()) {
            warn!(id, disk = %record.disk, path = %record.path(), error = %format!("{e:#}"), "record removed but content could not be deleted");
        }
        info!(id, disk = %record.disk, path = %record.path(), "deleted file");
        Ok(record)
    }

    /// Link for a record: `{url}/{path}` on public disks, `{private_url}/{id}` on private ones.
    pub fn link(&self, record: &FileRecord) -> Result<String> {
        let entry = self.disks.get(&record.disk)?;
        Ok(match entry.visibility {
            Visibility::Public => format!(
                "{}/{}",
                entry.url.as_deref().unwrap_or("").trim_end_matches('/'),
                record.path()
            ),
            Visibility::Private => format!(
                "{}/{}",
                self.config.private_url.trim_end_matches('/'),
                record.id
            ),
        })
    }

    fn store_content(
        &mut self,
        owner: &Owner,
        bytes: &[u8],
        desired: &str,
        extension: &str,
        options: &StoreOptions,
        forced_group: Option<&str>,
    ) -> Result<FileRecord> {
        let namespace = Namespace::new(
            options
                .disk
                .clone()
                .unwrap_or_else(|| self.config.default_disk.clone()),
            options
                .folder
                .as_deref()
                .unwrap_or(&self.config.default_folder),
        );
        let target = self.disks.get(&namespace.disk)?;
        let existing = occupied_names(&self.store, target.disk(), &namespace)?;
        let extension = normalize_extension(extension);
        let name = resolve(desired, &extension, &existing);
        debug!(desired, name = %name, namespace = %namespace, "resolved file name");

        let draft = NewRecord {
            owner: owner.clone(),
            name,
            folder: namespace.folder.clone(),
            disk: namespace.disk.clone(),
            group: forced_group
                .map(str::to_string)
                .or_else(|| options.group.clone())
                .unwrap_or_default(),
            description: options.description.clone().unwrap_or_default(),
            file_type: self.config.extensions.category(&extension).to_string(),
            mime: ExtensionMap::mime(&extension),
            extension,
            driver: target.disk().driver().to_string(),
            size: bytes.len() as u64,
        };

        let path = draft.path();
        target
            .disk()
            .put(&path, bytes)
            .with_context(|| format!("store content at '{path}' on disk '{}'", namespace.disk))?;
        let record = insert_or_cleanup(&mut self.store, target.disk(), draft)?;
        info!(id = record.id, owner = %record.owner, disk = %record.disk, path = %record.path(), "stored file");
        Ok(record)
    }
}

/// The requested base name; blank counts as unset.
pub(crate) fn desired_name(options: &StoreOptions) -> Option<&str> {
    options.name.as_deref().filter(|n| !n.trim().is_empty())
}

/// Names taken in `namespace`: recorded names plus files already on the disk.
pub(crate) fn occupied_names<S: RecordStore>(
    store: &S,
    disk: &dyn Disk,
    namespace: &Namespace,
) -> Result<HashSet<String>> {
    let mut names = store.names_in(namespace)?;
    names.extend(disk.list(&namespace.folder)?);
    Ok(names)
}

/// Insert `draft`; if the store refuses it, remove the content already written.
pub(crate) fn insert_or_cleanup<S: RecordStore>(
    store: &mut S,
    disk: &dyn Disk,
    draft: NewRecord,
) -> Result<FileRecord> {
    let path = draft.path();
    match store.insert(draft) {
        Ok(record) => Ok(record),
        Err(e) => {
            if let Err(cleanup) = disk.delete(&path) {
                warn!(path = %path, error = %cleanup, "failed to remove content after record insert failed");
            }
            Err(e)
        }
    }
}
