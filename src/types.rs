use std::collections::hash_map::{self, HashMap};
use std::path::PathBuf;

use serde::Serialize;

/// A discovered file path
pub type FileEntry = PathBuf;

/// Occurrences of each line-as-word within a single file.
///
/// Keys are stored exactly as counted; a word that never occurred has no
/// entry at all, so every stored count is at least one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordTally {
    counts: HashMap<String, usize>,
}

impl WordTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `word`
    pub fn count(&mut self, word: impl Into<String>) {
        *self.counts.entry(word.into()).or_insert(0) += 1;
    }

    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    /// Stored count for `word`, `None` when it never occurred
    pub fn get(&self, word: &str) -> Option<usize> {
        self.counts.get(word).copied()
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, usize> {
        self.counts.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for WordTally {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tally = WordTally::new();
        for word in iter {
            tally.count(word);
        }
        tally
    }
}

/// Tally of one file, as handed from the worker pool to the ranker
#[derive(Clone, Debug)]
pub struct FileResult {
    /// Base name of the file
    pub name: String,
    /// Path the file was read from
    pub path: FileEntry,
    pub tally: WordTally,
    /// Set when the file could not be read; the tally is then empty
    pub error: Option<String>,
}

impl FileResult {
    pub fn new(name: impl Into<String>, path: impl Into<FileEntry>, tally: WordTally) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            tally,
            error: None,
        }
    }

    /// Result for a file that could not be read
    pub fn unreadable(name: impl Into<String>, path: impl Into<FileEntry>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            tally: WordTally::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_unreadable(&self) -> bool {
        self.error.is_some()
    }
}

/// One line of the final ranking
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    #[serde(rename = "file")]
    pub name: String,
    /// Occurrences of the target word, zero when it never appeared
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RankedEntry {
    pub fn new(name: impl Into<String>, count: usize) -> Self {
        Self {
            name: name.into(),
            count,
            error: None,
        }
    }
}

/// Search report as handed to presentation layers
#[derive(Clone, Debug, Serialize)]
pub struct WordMap {
    pub word: String,
    pub word_map: Vec<RankedEntry>,
}
