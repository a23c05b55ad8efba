use crate::types::{FileResult, RankedEntry};

/// Rank files by how often `word` occurs in them, fewest first.
///
/// `word` is looked up exactly as given. Files tied on count keep the order
/// in which they appear in `results`.
pub fn rank<'a, I>(word: &str, results: I) -> Vec<RankedEntry>
where
    I: IntoIterator<Item = &'a FileResult>,
{
    let mut ranked: Vec<RankedEntry> = results
        .into_iter()
        .map(|result| RankedEntry {
            name: result.name.clone(),
            count: result.tally.get(word).unwrap_or(0),
            error: result.error.clone(),
        })
        .collect();

    // sort_by_key is stable
    ranked.sort_by_key(|entry| entry.count);
    ranked
}
