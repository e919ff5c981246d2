use crate::file_scanner::ScanOptions;
use clap::Parser;
use std::path::PathBuf;

/// spacecheck – find and fix filenames with doubled spaces
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root to scan. Without it, the interactive mode asks for one.
    #[arg(value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Do not descend deeper than this many levels below the root.
    /// Files directly in DIR are level 1.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_depth: Option<u64>,

    /// Treat symlinks as plain entries instead of following them.
    #[arg(long)]
    pub no_follow_links: bool,

    /// Print the sorted list and exit without the TUI.
    /// Requires DIR to be specified.
    #[arg(long, requires = "root")]
    pub headless: bool,

    /// Append diagnostics to this file (filter with SPACECHECK_LOG).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            follow_links: !self.no_follow_links,
            max_depth: self
                .max_depth
                .map(|d| usize::try_from(d).unwrap_or(usize::MAX)),
        }
    }
}
