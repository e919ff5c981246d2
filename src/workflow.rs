use crate::session::Session;
use crate::{cli, logging, tui, utils};
use anyhow::{Result, bail};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

// Resolve the DIR argument, if any, to an existing directory.
fn determine_root(cli_args: &cli::Cli) -> Result<Option<PathBuf>> {
    let Some(root) = cli_args.root.as_ref() else {
        return Ok(None);
    };
    match utils::resolve_dir(&root.to_string_lossy()) {
        Some(dir) => Ok(Some(dir)),
        None => bail!("'{}' is not a directory", root.display()),
    }
}

/// Print the sorted list: flagged entries prefixed with `!! `, then a summary.
pub fn write_report(session: &Session, out: &mut impl Write) -> io::Result<()> {
    let Some(root) = session.root() else {
        return Ok(());
    };
    for entry in session.entries() {
        let marker = if entry.flagged() { "!! " } else { "   " };
        writeln!(
            out,
            "{}{}",
            marker,
            utils::relative_display(entry.full_path(), root)
        )?;
    }
    writeln!(
        out,
        "{} files scanned, {} with repeated spaces.",
        session.entries().len(),
        session.flagged_count()
    )
}

fn run_headless_mode(session: &Session) -> Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_report(session, &mut lock)?;
    Ok(())
}

fn run_interactive_mode(session: Session) -> Result<()> {
    let session = tui::run_tui(session)?;
    if session.root().is_some() && session.flagged_count() > 0 {
        println!(
            "{} file(s) under {} still contain repeated spaces.",
            session.flagged_count(),
            session.root().map(|p| p.display().to_string()).unwrap_or_default()
        );
    }
    Ok(())
}

// Main orchestrator for the spacecheck application logic.
pub fn run_spacecheck(cli_args: cli::Cli) -> Result<()> {
    // Held until exit so buffered log lines are flushed.
    let _log_guard = match cli_args.log_file.as_deref() {
        Some(path) => Some(logging::init_file_logging(path)?),
        None => None,
    };

    let root = determine_root(&cli_args)?;
    let mut session = Session::new(cli_args.scan_options());
    if let Some(root) = root {
        session.select_root(root);
    }
    info!(headless = cli_args.headless, "starting");

    if cli_args.headless {
        run_headless_mode(&session)
    } else {
        run_interactive_mode(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_scanner::ScanOptions;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn report_lists_flagged_entries_first() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::write(dir.path().join("sub/b  b.txt"), "").unwrap();
        let mut session = Session::new(ScanOptions::default());
        session.select_root(dir.path().to_path_buf());

        let mut out = Vec::new();
        write_report(&session, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        let flagged_line = format!("!! {}", std::path::Path::new("sub").join("b  b.txt").display());
        assert_eq!(lines[0], flagged_line);
        assert_eq!(lines[1], "   a.txt");
        assert_eq!(lines[2], "2 files scanned, 1 with repeated spaces.");
    }

    #[test]
    fn report_without_root_is_empty() {
        let mut out = Vec::new();
        write_report(&Session::default(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn rejects_missing_root_argument() {
        let cli_args = <cli::Cli as clap::Parser>::parse_from(["spacecheck", "/no/such/spacecheck/dir"]);
        assert!(determine_root(&cli_args).is_err());
    }
}
