use crate::entry::Entry;
use crate::error::RenameError;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// Empty or identical name; nothing was attempted.
    Unchanged,
    /// The file now lives at this path.
    Renamed(PathBuf),
}

/// Rename `entry` within its own directory.
///
/// An existing target is refused rather than replaced. On Linux the refusal
/// is atomic (`RENAME_NOREPLACE`); elsewhere, or on filesystems without that
/// flag, the target is checked just before an ordinary rename.
pub fn rename_entry(entry: &Entry, new_name: &str) -> Result<RenameOutcome, RenameError> {
    if new_name.is_empty() || new_name == entry.display_name() {
        return Ok(RenameOutcome::Unchanged);
    }
    validate_name(new_name)?;

    let from = entry.full_path();
    let to = from
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(new_name);

    match rename_no_replace(from, &to) {
        Ok(()) => {
            info!(from = %from.display(), to = %to.display(), "renamed");
            Ok(RenameOutcome::Renamed(to))
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            warn!(from = %from.display(), to = %to.display(), "rename target exists");
            Err(RenameError::TargetExists(to))
        }
        Err(source) => {
            warn!(from = %from.display(), to = %to.display(), error = %source, "rename failed");
            Err(RenameError::Io {
                from: from.to_path_buf(),
                to,
                source,
            })
        }
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn rename_no_replace(from: &Path, to: &Path) -> io::Result<()> {
    use rustix::fs::{CWD, RenameFlags, renameat_with};
    use rustix::io::Errno;

    match renameat_with(CWD, from, CWD, to, RenameFlags::NOREPLACE) {
        Ok(()) => Ok(()),
        // Old kernel, or a filesystem that does not support the flag.
        Err(e) if e == Errno::INVAL || e == Errno::NOSYS => {
            tracing::debug!(to = %to.display(), error = %e, "no-replace rename unsupported");
            rename_if_absent(from, to)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn rename_no_replace(from: &Path, to: &Path) -> io::Result<()> {
    rename_if_absent(from, to)
}

// Not atomic: a target created after the check is replaced by the rename.
fn rename_if_absent(from: &Path, to: &Path) -> io::Result<()> {
    if fs::symlink_metadata(to).is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "rename target exists",
        ));
    }
    fs::rename(from, to)
}

// The new name must stay a single component of the entry's own directory.
fn validate_name(name: &str) -> Result<(), RenameError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(c)), None) if c == name && !name.contains('/') => Ok(()),
        _ => Err(RenameError::InvalidName(name.to_string())),
    }
}
