use crate::entry::Entry;
use crate::error::SessionError;
use crate::file_scanner::{self, ScanOptions};
use crate::ordering::{self, Collation};
use crate::renamer::{self, RenameOutcome};
use std::path::{Path, PathBuf};
use tracing::info;

/// Names one row of one published list.
///
/// A handle stops resolving as soon as the list is rebuilt, even if a row
/// still exists at the same position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHandle {
    generation: u64,
    index: usize,
}

/// The chosen root and the sorted entries last scanned from it.
#[derive(Debug, Default)]
pub struct Session {
    root: Option<PathBuf>,
    entries: Vec<Entry>,
    generation: u64,
    options: ScanOptions,
    collation: Collation,
}

impl Session {
    /// A session ordering names by the environment's locale.
    pub fn new(options: ScanOptions) -> Self {
        Session::with_collation(options, Collation::from_env())
    }

    pub fn with_collation(options: ScanOptions, collation: Collation) -> Self {
        info!(locale = ?collation.locale(), "collation selected");
        Session {
            root: None,
            entries: Vec::new(),
            generation: 0,
            options,
            collation,
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn flagged_count(&self) -> usize {
        self.entries.iter().take_while(|e| e.flagged()).count()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn select_root(&mut self, root: PathBuf) {
        info!(root = %root.display(), "root selected");
        self.root = Some(root);
        self.refresh();
    }

    /// Rescan the current root, replacing the whole list. No-op without a root.
    pub fn refresh(&mut self) {
        let Some(root) = self.root.as_deref() else {
            return;
        };
        let mut entries = file_scanner::scan(root, &self.options);
        ordering::sort(&mut entries, &self.collation);
        self.publish(entries);
    }

    fn publish(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.generation += 1;
        info!(
            generation = self.generation,
            entries = self.entries.len(),
            flagged = self.flagged_count(),
            "published entries"
        );
    }

    pub fn handle(&self, index: usize) -> Option<RowHandle> {
        (index < self.entries.len()).then_some(RowHandle {
            generation: self.generation,
            index,
        })
    }

    pub fn lookup(&self, handle: RowHandle) -> Option<&Entry> {
        if handle.generation != self.generation {
            return None;
        }
        self.entries.get(handle.index)
    }

    /// Current position of the entry at `path`, for callers that need to
    /// follow a file across a refresh.
    pub fn position_of(&self, path: &Path) -> Option<usize> {
        self.entries.iter().position(|e| e.full_path() == path)
    }

    /// Apply an edit to the row named by `handle`.
    ///
    /// A successful rename rescans the root; a failed one leaves the session
    /// exactly as it was.
    pub fn rename(
        &mut self,
        handle: RowHandle,
        new_name: &str,
    ) -> Result<RenameOutcome, SessionError> {
        let entry = self.lookup(handle).ok_or(SessionError::StaleHandle)?;
        let outcome = renamer::rename_entry(entry, new_name)?;
        if let RenameOutcome::Renamed(_) = outcome {
            self.refresh();
        }
        Ok(outcome)
    }
}
