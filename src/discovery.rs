use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, SearchError};
use crate::types::FileEntry;

/// Collect every file beneath `root`, at any depth.
///
/// Entries come back in directory-listing order. Symlinked directories are
/// not descended into, devices and sockets are skipped, and an entry that
/// cannot be read is logged and skipped without stopping the walk.
pub fn find_files(root: impl AsRef<Path>) -> Result<Vec<FileEntry>> {
    let root = root.as_ref();
    let is_dir = fs::metadata(root).map(|m| m.is_dir()).unwrap_or(false);
    if !is_dir {
        return Err(SearchError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(
                    path = ?e.path(),
                    error = %e,
                    "skipping unreadable entry"
                );
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_file() || (file_type.is_symlink() && points_to_file(entry.path())) {
            files.push(entry.into_path());
        } else if !file_type.is_dir() {
            tracing::debug!(path = %entry.path().display(), "skipping non-regular file");
        }
    }

    tracing::debug!(root = %root.display(), files = files.len(), "discovery finished");
    Ok(files)
}

fn points_to_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, "word\n").unwrap();
    }

    #[test]
    fn test_find_files_recurses() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();

        let expected: HashSet<PathBuf> = [
            dir.path().join("top.txt"),
            dir.path().join("a").join("mid.txt"),
            nested.join("deep.txt"),
            nested.join("deeper.log"),
        ]
        .into_iter()
        .collect();
        for path in &expected {
            touch(path);
        }

        let found: HashSet<PathBuf> = find_files(dir.path()).unwrap().into_iter().collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_find_files_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(find_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_find_files_rejects_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            find_files(&missing),
            Err(SearchError::NotADirectory { path }) if path == missing
        ));
    }

    #[test]
    fn test_find_files_rejects_file_root() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        touch(&file);
        assert!(matches!(
            find_files(&file),
            Err(SearchError::NotADirectory { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_find_files_does_not_follow_directory_cycles() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        touch(&sub.join("inner.txt"));
        std::os::unix::fs::symlink(dir.path(), sub.join("loop")).unwrap();
        std::os::unix::fs::symlink(sub.join("inner.txt"), dir.path().join("alias.txt")).unwrap();

        let found: HashSet<PathBuf> = find_files(dir.path()).unwrap().into_iter().collect();
        let expected: HashSet<PathBuf> = [sub.join("inner.txt"), dir.path().join("alias.txt")]
            .into_iter()
            .collect();
        assert_eq!(found, expected);
    }

    #[cfg(unix)]
    #[test]
    fn test_find_files_skips_unreadable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        touch(&locked.join("hidden.txt"));
        touch(&dir.path().join("visible.txt"));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can list the directory regardless of its mode.
        let still_readable = fs::read_dir(&locked).is_ok();
        let found = find_files(dir.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let found = found.unwrap();
        assert!(found.contains(&dir.path().join("visible.txt")));
        if !still_readable {
            assert_eq!(found.len(), 1);
        }
    }
}
