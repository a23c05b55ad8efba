//! Search options

use std::num::NonZeroUsize;

/// Options controlling a search run
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Upper bound on execution units; `None` uses what the machine reports
    pub max_workers: Option<usize>,
    /// Lower-case the target word before ranking
    pub fold_case: bool,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of workers
    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = Some(workers);
        self
    }

    /// Matches the target word case-insensitively
    pub fn fold_case(mut self, fold: bool) -> Self {
        self.fold_case = fold;
        self
    }

    /// The word as it is looked up in the tallies
    pub fn lookup_word(&self, word: &str) -> String {
        if self.fold_case {
            word.to_lowercase()
        } else {
            word.to_string()
        }
    }

    /// Execution units available to the worker pool, never less than one
    pub fn available_units(&self) -> usize {
        let detected = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        self.max_workers.map_or(detected, |cap| cap.min(detected)).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_units_respects_cap() {
        assert_eq!(SearchOptions::new().with_max_workers(1).available_units(), 1);
        assert_eq!(SearchOptions::new().with_max_workers(0).available_units(), 1);
        assert!(SearchOptions::new().available_units() >= 1);
    }

    #[test]
    fn test_lookup_word() {
        assert_eq!(SearchOptions::new().lookup_word("ToDo"), "ToDo");
        assert_eq!(SearchOptions::new().fold_case(true).lookup_word("ToDo"), "todo");
    }
}
