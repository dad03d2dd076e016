//! Core library for `files_manager`.
//!
//! Attaches files to owner entities on named storage disks:
//! - `naming`: collision-safe names (`name.jpg`, `name_(1).jpg`, ...).
//! - `manager`: store, copy (single and batch), list, read, delete and link files.
//! - `storage` / `catalog`: the disk and record-store seams with local/JSON/memory backends.
//! - `config`: XML config with sensible defaults.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod manager;
pub mod naming;
pub mod options;
pub mod output;
pub mod record;
pub mod shutdown;
pub mod storage;

pub use catalog::{JsonCatalog, MemoryCatalog, RecordStore};
pub use config::{
    Config, DiskConfig, LogLevel, Visibility, default_config_path, default_log_path,
    path_has_symlink_ancestor,
};
pub use errors::FilesError;
pub use manager::{AVATAR_GROUP, FileManager, Upload, UsedNames};
pub use naming::{resolve, resolve_normalized, slugify};
pub use options::{CopyOptions, StoreOptions};
pub use record::{FileRecord, Namespace, NewRecord, Owner, RecordId};
pub use storage::{Disk, Disks, LocalDisk, MemoryDisk};
