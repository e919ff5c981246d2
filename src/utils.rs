use std::path::{Path, PathBuf};

/// Path of `path` relative to `root` for display; falls back to the full path.
pub fn relative_display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

/// Resolve a user-typed directory against the working directory.
pub fn resolve_dir(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let path = PathBuf::from(trimmed);
    if !path.is_dir() {
        return None;
    }
    Some(path.canonicalize().unwrap_or(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_display_strips_root() {
        let root = Path::new("/data/music");
        assert_eq!(
            relative_display(Path::new("/data/music/a/b  c.mp3"), root),
            Path::new("a").join("b  c.mp3").display().to_string()
        );
        assert_eq!(relative_display(Path::new("/elsewhere/x"), root), "/elsewhere/x");
    }

    #[test]
    fn resolve_dir_rejects_files_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f.txt");
        std::fs::write(&file, "").unwrap();
        assert!(resolve_dir("   ").is_none());
        assert!(resolve_dir(&file.display().to_string()).is_none());
        let resolved = resolve_dir(&dir.path().display().to_string()).unwrap();
        assert!(resolved.is_dir());
    }
}
