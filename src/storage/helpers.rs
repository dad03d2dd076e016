//! I/O error enrichment for disk and catalog operations.
//!
//! Usage:
//!   fs::read(&full).map_err(io_error_with_help("read content", &full))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// "op 'path': error" plus a short hint for the common failure modes.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    let hint = match e.raw_os_error() {
        #[cfg(unix)]
        Some(libc::ENOSPC) => Some("disk is full"),
        #[cfg(unix)]
        Some(libc::EROFS) => Some("disk root is on a read-only filesystem"),
        #[cfg(unix)]
        Some(libc::ENAMETOOLONG) => Some("folder or file name too long"),
        #[cfg(windows)]
        Some(112) => Some("disk is full"),
        _ => match e.kind() {
            io::ErrorKind::PermissionDenied => {
                Some("permission denied; check ownership of the disk root")
            }
            io::ErrorKind::NotFound => Some("not found on this disk"),
            io::ErrorKind::AlreadyExists => Some("already exists"),
            _ => None,
        },
    };
    if let Some(hint) = hint {
        msg.push_str(" (");
        msg.push_str(hint);
        msg.push(')');
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// Closure for `.map_err(...)` converting io::Error -> anyhow::Error with context.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}
