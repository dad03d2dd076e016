//! Extension derivation and the extension -> category map.
//!
//! A missing or unrecognized extension is never an error: uploads fall back to
//! [`DEFAULT_EXTENSION`] and unknown categories fall back to the `*` entry.

use std::collections::BTreeMap;
use std::path::Path;

/// Extension used when the original name has none.
pub const DEFAULT_EXTENSION: &str = "txt";
/// Map key holding the category for unmapped extensions.
pub const FALLBACK_KEY: &str = "*";
/// Category used when neither the extension nor `*` is mapped.
pub const FALLBACK_CATEGORY: &str = "file";

const BUILTIN_CATEGORIES: &[(&str, &str)] = &[
    ("jpg", "img"),
    ("jpeg", "img"),
    ("png", "img"),
    ("gif", "img"),
    ("bmp", "img"),
    ("svg", "img"),
    ("webp", "img"),
    ("doc", "word"),
    ("docx", "word"),
    ("odt", "word"),
    ("xls", "excel"),
    ("xlsx", "excel"),
    ("csv", "excel"),
    ("ppt", "powerpoint"),
    ("pptx", "powerpoint"),
    ("pdf", "pdf"),
    ("zip", "zip"),
    ("rar", "zip"),
    ("7z", "zip"),
    ("mp3", "audio"),
    ("wav", "audio"),
    ("mp4", "video"),
    ("avi", "video"),
    ("mov", "video"),
    ("txt", "text"),
    (FALLBACK_KEY, FALLBACK_CATEGORY),
];

/// Lower-case an extension and drop a leading dot and any non-alphanumeric characters.
pub fn normalize_extension(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('.')
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Extension carried by an original file name, if it is usable.
///
/// "avatar.JPG" -> Some("jpg"); "name" -> None; ".env" -> None.
pub fn extension_of(original_name: &str) -> Option<String> {
    let ext = Path::new(original_name).extension()?.to_str()?;
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Base name of an original file name, without directories or extension.
pub fn stem_of(original_name: &str) -> &str {
    // Client-supplied names may carry either separator.
    let file_name = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);
    match extension_of(file_name) {
        Some(ext) => file_name
            .get(..file_name.len() - ext.len() - 1)
            .filter(|stem| !stem.is_empty())
            .unwrap_or(file_name),
        None => file_name,
    }
}

/// Extension -> category mapping (the record's `file_type`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionMap {
    categories: BTreeMap<String, String>,
}

impl Default for ExtensionMap {
    fn default() -> Self {
        Self {
            categories: BUILTIN_CATEGORIES
                .iter()
                .map(|(ext, category)| (ext.to_string(), category.to_string()))
                .collect(),
        }
    }
}

impl ExtensionMap {
    /// An empty map; every lookup yields [`FALLBACK_CATEGORY`] until entries are added.
    pub fn empty() -> Self {
        Self {
            categories: BTreeMap::new(),
        }
    }

    /// Add or replace a mapping. The `*` key sets the fallback category.
    pub fn insert(&mut self, extension: &str, category: impl Into<String>) {
        let key = if extension.trim() == FALLBACK_KEY {
            FALLBACK_KEY.to_string()
        } else {
            normalize_extension(extension)
        };
        if !key.is_empty() {
            self.categories.insert(key, category.into());
        }
    }

    /// Category for `extension`, falling back to `*` and then to [`FALLBACK_CATEGORY`].
    pub fn category(&self, extension: &str) -> &str {
        self.categories
            .get(&normalize_extension(extension))
            .or_else(|| self.categories.get(FALLBACK_KEY))
            .map(String::as_str)
            .unwrap_or(FALLBACK_CATEGORY)
    }

    /// Best-effort MIME type for `extension`.
    pub fn mime(extension: &str) -> String {
        mime_guess::from_ext(&normalize_extension(extension))
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }
}
