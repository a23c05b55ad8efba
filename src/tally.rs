use std::fs;
use std::path::Path;

use crate::error::{Result, SearchError};
use crate::types::{FileResult, WordTally};

/// Count every line of `text` as one lower-cased word.
///
/// Blank lines count as the empty word; nothing is trimmed.
pub fn tally_text(text: &str) -> WordTally {
    split_lines(text).map(str::to_lowercase).collect()
}

/// Split `text` at every line boundary.
///
/// Besides `\n` and `\r\n`, a lone `\r`, vertical tab, form feed, the
/// `\x1c`..`\x1e` separators, NEL, and U+2028/U+2029 all end a line. A
/// terminator at the very end does not produce a trailing empty line.
pub fn split_lines(text: &str) -> SplitLines<'_> {
    SplitLines { rest: text }
}

#[derive(Clone, Debug)]
pub struct SplitLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for SplitLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        match self.rest.char_indices().find(|&(_, c)| is_line_break(c)) {
            Some((i, c)) => {
                let line = &self.rest[..i];
                let mut end = i + c.len_utf8();
                if c == '\r' && self.rest[end..].starts_with('\n') {
                    end += 1;
                }
                self.rest = &self.rest[end..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Read one file and tally its lines
pub fn tally_file(path: impl AsRef<Path>) -> Result<FileResult> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| SearchError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(FileResult::new(file_name(path), path, tally_text(&content)))
}

/// Like [`tally_file`], but an unreadable file yields an empty tally
/// carrying the failure instead of an error
pub fn tally_file_or_mark(path: impl AsRef<Path>) -> FileResult {
    let path = path.as_ref();
    match tally_file(path) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "treating file as empty");
            FileResult::unreadable(file_name(path), path, e.to_string())
        }
    }
}

/// Last path component, or the whole path when there is none
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_tally_text_folds_case_and_keeps_blank_lines() {
        let tally = tally_text("a\nA\nb\n\n");
        assert_eq!(tally.get("a"), Some(2));
        assert_eq!(tally.get("b"), Some(1));
        assert_eq!(tally.get(""), Some(1));
        assert_eq!(tally.len(), 3);
    }

    #[test]
    fn test_tally_text_is_line_based() {
        let tally = tally_text("Hello World\r\nhello world\n  hello world");
        assert_eq!(tally.get("hello world"), Some(2));
        assert_eq!(tally.get("  hello world"), Some(1));
        assert!(!tally.contains("hello"));
    }

    #[test]
    fn test_tally_text_bare_carriage_returns() {
        let tally = tally_text("a\rb\ra\r");
        assert_eq!(tally.get("a"), Some(2));
        assert_eq!(tally.get("b"), Some(1));
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn test_split_lines_boundaries() {
        let lines: Vec<_> = split_lines("x\u{0c}y\u{2028}x").collect();
        assert_eq!(lines, vec!["x", "y", "x"]);

        let lines: Vec<_> = split_lines("a\r\nb\x0bc\x1cd\u{85}e\u{2029}").collect();
        assert_eq!(lines, vec!["a", "b", "c", "d", "e"]);

        let lines: Vec<_> = split_lines("\r\n\n\r").collect();
        assert_eq!(lines, vec!["", "", ""]);

        let lines: Vec<_> = split_lines("no terminator").collect();
        assert_eq!(lines, vec!["no terminator"]);

        assert_eq!(split_lines("").count(), 0);
    }

    #[test]
    fn test_tally_text_empty_input() {
        assert!(tally_text("").is_empty());
    }

    #[test]
    fn test_tally_file_uses_base_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "a\nA\nb\n\n").unwrap();

        let result = tally_file(&path).unwrap();
        assert_eq!(result.name, "words.txt");
        assert_eq!(result.path, path);
        assert_eq!(result.tally.get("a"), Some(2));
        assert_eq!(result.tally.get(""), Some(1));
        assert!(!result.is_unreadable());
    }

    #[test]
    fn test_tally_file_long_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("long.txt");
        let line = "X".repeat(1 << 20);
        fs::write(&path, format!("{line}\n{line}\n")).unwrap();

        let result = tally_file(&path).unwrap();
        assert_eq!(result.tally.get(&line.to_lowercase()), Some(2));
    }

    #[test]
    fn test_tally_file_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.txt");
        assert!(matches!(
            tally_file(&path),
            Err(SearchError::FileUnreadable { .. })
        ));
    }

    #[test]
    fn test_tally_file_or_mark_binary_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.bin");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x9f]).unwrap();

        let result = tally_file_or_mark(&path);
        assert_eq!(result.name, "blob.bin");
        assert!(result.tally.is_empty());
        assert!(result.is_unreadable());
    }
}
