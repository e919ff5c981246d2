//! Internal library crate for spacecheck.
//!
//! The shipped application is the `spacecheck` binary (`src/main.rs`). The
//! library exists so the binary and the integration tests share one set of
//! modules:
//! - [markup]: whitespace-run classification and styled rendering of names.
//! - [file_scanner]: recursive collection of [entry::Entry] values.
//! - [ordering]: flagged-first, collated display order.
//! - [renamer]: single-file rename that never replaces an existing file.
//! - [session]: the current root and last published list.
//! - [tui]: the terminal front end.

pub mod cli;
pub mod entry;
pub mod error;
pub mod file_scanner;
pub mod logging;
pub mod markup;
pub mod ordering;
pub mod renamer;
pub mod session;
pub mod tui;
pub mod utils;
pub mod workflow;

pub use entry::Entry;
pub use error::{RenameError, SessionError};
pub use file_scanner::{ScanOptions, scan};
pub use markup::{Markup, Segment, generate_markup};
pub use renamer::{RenameOutcome, rename_entry};
pub use session::{RowHandle, Session};
