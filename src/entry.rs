use crate::markup::{Markup, generate_markup};
use std::path::{Path, PathBuf};

/// One file discovered by a scan.
///
/// Fields are private so the markup and flag can only ever be derived from
/// the name they were built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    full_path: PathBuf,
    display_name: String,
    markup: Markup,
    flagged: bool,
}

impl Entry {
    pub fn new(full_path: PathBuf, display_name: String) -> Self {
        let (markup, flagged) = generate_markup(&display_name);
        Entry {
            full_path,
            display_name,
            markup,
            flagged,
        }
    }

    /// Builds an entry from a path, using its last component as the name.
    pub fn from_path(full_path: PathBuf) -> Self {
        let display_name = full_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Entry::new(full_path, display_name)
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn markup(&self) -> &Markup {
        &self.markup
    }

    pub fn flagged(&self) -> bool {
        self.flagged
    }
}
