//! Per-operation options.
//!
//! Each store/copy call takes its own immutable options value instead of
//! carrying "current disk/folder" state on the owner between calls.

/// Options for storing a new file. Unset fields use the configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreOptions {
    pub disk: Option<String>,
    pub folder: Option<String>,
    /// Desired base name (slugified; the extension comes from the content).
    pub name: Option<String>,
    pub group: Option<String>,
    pub description: Option<String>,
}

/// Overrides for a copy. Unset `disk`, `folder` and `name` inherit from the
/// source record; unset `group` and `description` become empty.
pub type CopyOptions = StoreOptions;

impl StoreOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_disk(mut self, disk: impl Into<String>) -> Self {
        self.disk = Some(disk.into());
        self
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
