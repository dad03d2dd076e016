//! Atomic write helper:
//! - Writes to a temp file in the destination directory
//! - Fsyncs the temp file before renaming
//! - Renames temp -> dest (Windows overwrite-safe)
//! - Fsyncs the destination directory (Unix, best-effort)

use anyhow::{Context, Result, anyhow};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::helpers::io_error_with_help;

/// Prefix of transient files; listings skip these.
pub(crate) const TEMP_PREFIX: &str = ".files_manager.";

pub fn write_atomic(dest: &Path, bytes: &[u8]) -> Result<()> {
    let dest_dir = dest
        .parent()
        .ok_or_else(|| anyhow!("destination has no parent: {}", dest.display()))?;

    fs::create_dir_all(dest_dir)
        .map_err(io_error_with_help("create destination directory", dest_dir))?;

    let tmp_path = unique_temp_path(dest_dir);
    if let Err(e) = write_new_synced(&tmp_path, bytes) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error_with_help("write temporary file", &tmp_path)(e));
    }

    if let Err(e) = rename_replacing(&tmp_path, dest) {
        // Best-effort cleanup of the temp file on failure.
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| {
            format!(
                "rename temporary file '{}' -> '{}'",
                tmp_path.display(),
                dest.display()
            )
        });
    }

    Ok(())
}

fn write_new_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut f = OpenOptions::new().write(true).create_new(true).open(path)?;
    f.write_all(bytes)?;
    f.sync_all()
}

fn rename_replacing(src: &Path, dst: &Path) -> Result<()> {
    // Windows: rename does not overwrite an existing destination.
    #[cfg(windows)]
    {
        if let Err(e) = fs::remove_file(dst) {
            if e.kind() != io::ErrorKind::NotFound {
                return Err(e).with_context(|| {
                    format!("remove existing destination before rename: {}", dst.display())
                });
            }
        }
    }

    fs::rename(src, dst)
        .with_context(|| format!("atomic rename '{}' -> '{}'", src.display(), dst.display()))?;

    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        // Ignore fsync errors to avoid turning a successful rename into a failure.
        let _ = File::open(parent).and_then(|d| d.sync_all());
    }

    Ok(())
}

fn unique_temp_path(dst_dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    dst_dir.join(format!("{TEMP_PREFIX}{pid}.{nanos}.tmp"))
}
