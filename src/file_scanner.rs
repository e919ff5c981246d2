use crate::entry::Entry;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Traversal knobs exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Descend into symlinked directories.
    pub follow_links: bool,
    /// Deepest level (relative to the root) to visit; `None` is unbounded.
    pub max_depth: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            follow_links: true,
            max_depth: None,
        }
    }
}

/// Collect every non-directory under `root`, at any depth.
///
/// Unreadable subtrees (permissions, races, symlink loops, a missing root)
/// are logged and skipped; the walk itself never fails.
pub fn scan(root: &Path, options: &ScanOptions) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(options.follow_links);
    if let Some(depth) = options.max_depth {
        walker = walker.max_depth(depth);
    }

    for result in walker {
        let dirent = match result {
            Ok(v) => v,
            Err(e) => {
                if let Some(entry) = dangling_link_entry(&e) {
                    entries.push(entry);
                } else {
                    warn!(error = %e, "skipping unreadable path during scan");
                }
                continue;
            }
        };

        if dirent.file_type().is_dir() {
            continue;
        }
        entries.push(Entry::from_path(dirent.into_path()));
    }

    debug!(root = %root.display(), count = entries.len(), "scan complete");
    entries
}

// When following links, walkdir reports a symlink whose target is gone as an
// error. It is still a non-directory entry on disk, so keep it.
fn dangling_link_entry(err: &walkdir::Error) -> Option<Entry> {
    if err.loop_ancestor().is_some() {
        return None;
    }
    let path = err.path()?;
    let meta = std::fs::symlink_metadata(path).ok()?;
    if meta.file_type().is_symlink() && std::fs::metadata(path).is_err() {
        Some(Entry::from_path(path.to_path_buf()))
    } else {
        None
    }
}
