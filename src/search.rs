use std::path::Path;
use std::time::Instant;

use crate::config::SearchOptions;
use crate::error::Result;
use crate::pool::count_words_in_files;
use crate::rank::rank;
use crate::types::{RankedEntry, WordMap};

/// Rank every file under `root` by occurrences of `word`, using default options
pub fn search(root: impl AsRef<Path>, word: &str) -> Result<Vec<RankedEntry>> {
    search_with(root, word, &SearchOptions::default())
}

/// Discover, tally in parallel, then rank.
///
/// Fails only when `root` is not a directory or no worker could be started;
/// unreadable files are ranked with a zero count and their error attached.
pub fn search_with(root: impl AsRef<Path>, word: &str, options: &SearchOptions) -> Result<Vec<RankedEntry>> {
    let root = root.as_ref();
    let start = Instant::now();

    let results = count_words_in_files(root, options)?;

    let word = options.lookup_word(word);
    let ranked = rank(&word, &results);

    tracing::info!(
        root = %root.display(),
        word = %word,
        files = ranked.len(),
        unreadable = ranked.iter().filter(|e| e.error.is_some()).count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "search complete"
    );
    Ok(ranked)
}

/// Run a search and package it as a report carrying the word that was
/// actually looked up
pub fn search_directory(root: impl AsRef<Path>, word: &str, options: &SearchOptions) -> Result<WordMap> {
    Ok(WordMap {
        word: options.lookup_word(word),
        word_map: search_with(root, word, options)?,
    })
}
