//! Name resolution inside a (disk, folder) namespace.
//!
//! Policy:
//! - Use `base.ext` when it is free.
//! - Otherwise append `_(n)` before the extension for n = 1, 2, ... and take the first free name.
//!
//! Notes:
//! - This only decides the name against the snapshot of names it is given. Callers that share a
//!   namespace with concurrent writers rely on the record store's uniqueness check.

use std::collections::HashSet;
use tracing::trace;

use super::extension::normalize_extension;
use super::slug::slugify;

/// Base used when a desired name normalizes to nothing.
pub const PLACEHOLDER_BASE: &str = "file";

// Typical POSIX/EXT limit for a single path segment.
const MAX_NAME_LEN: usize = 255;

/// Resolve a collision-free name for `desired_base` with `extension`.
///
/// The base is slugified first; an empty slug falls back to [`PLACEHOLDER_BASE`].
///
/// Examples (existing = {"name.jpg"}):
/// - ("name", "jpg") -> "name_(1).jpg"
/// - ("My Photo", "JPG") -> "my_photo.jpg"
pub fn resolve(desired_base: &str, extension: &str, existing: &HashSet<String>) -> String {
    let base = slugify(desired_base);
    resolve_normalized(&base, extension, existing)
}

/// Like [`resolve`] but keeps `base` verbatim (it already came from a resolved name).
pub fn resolve_normalized(base: &str, extension: &str, existing: &HashSet<String>) -> String {
    let base = if base.trim().is_empty() {
        PLACEHOLDER_BASE
    } else {
        base
    };
    let extension = normalize_extension(extension);

    let candidate = build_name_with_suffix(base, &extension, "");
    if !existing.contains(&candidate) {
        return candidate;
    }

    // Existing is finite, so this terminates.
    let mut n: u64 = 1;
    loop {
        let suffix = format!("_({n})");
        let candidate = build_name_with_suffix(base, &extension, &suffix);
        if !existing.contains(&candidate) {
            return candidate;
        }
        if n == 3 {
            trace!(base, extension = %extension, "naming: multiple collisions, continuing to probe suffixes");
        }
        n += 1;
    }
}

/// Truncate the base if needed so `base + suffix + ["." + ext]` fits in MAX_NAME_LEN bytes.
fn build_name_with_suffix(base: &str, extension: &str, suffix: &str) -> String {
    let mut overhead = suffix.len();
    if !extension.is_empty() {
        overhead += 1 + extension.len();
    }

    let budget = MAX_NAME_LEN.saturating_sub(overhead).max(1);
    let mut cut = base.len().min(budget);
    while !base.is_char_boundary(cut) {
        cut -= 1;
    }
    let base = if cut == 0 { PLACEHOLDER_BASE } else { &base[..cut] };

    let mut name = String::with_capacity(base.len() + overhead);
    name.push_str(base);
    name.push_str(suffix);
    if !extension.is_empty() {
        name.push('.');
        name.push_str(extension);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn long_base_is_truncated_to_fit() {
        let base = "a".repeat(400);
        let name = resolve_normalized(&base, "jpg", &HashSet::new());
        assert_eq!(name.len(), MAX_NAME_LEN);
        assert!(name.ends_with(".jpg"));

        let taken = set(&[name.as_str()]);
        let next = resolve_normalized(&base, "jpg", &taken);
        assert_eq!(next.len(), MAX_NAME_LEN);
        assert!(next.ends_with("_(1).jpg"));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let base = "é".repeat(200);
        let name = resolve_normalized(&base, "png", &HashSet::new());
        assert!(name.len() <= MAX_NAME_LEN);
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn empty_extension_omits_dot() {
        assert_eq!(resolve_normalized("notes", "", &HashSet::new()), "notes");
        assert_eq!(resolve_normalized("notes", "", &set(&["notes"])), "notes_(1)");
    }
}
