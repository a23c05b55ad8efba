use std::path::Path;

use rayon::prelude::*;

use crate::config::SearchOptions;
use crate::discovery::find_files;
use crate::error::{Result, SearchError};
use crate::tally::tally_file_or_mark;
use crate::types::{FileEntry, FileResult};

/// Static division of a file list across workers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolPlan {
    pub workers: usize,
    pub chunk_size: usize,
}

impl PoolPlan {
    /// Plan for `file_count` files, or `None` when there is nothing to do
    pub fn new(file_count: usize, available_units: usize) -> Option<Self> {
        if file_count == 0 {
            return None;
        }
        let workers = file_count.min(available_units.max(1));
        Some(Self {
            workers,
            chunk_size: file_count.div_ceil(workers),
        })
    }

    /// Contiguous chunks in dispatch order
    pub fn chunks<'a, T>(&self, items: &'a [T]) -> std::slice::Chunks<'a, T> {
        items.chunks(self.chunk_size)
    }
}

/// Tally every file, each worker walking its own contiguous chunk.
///
/// Unreadable files come back as empty tallies with their error attached.
pub fn tally_all(files: &[FileEntry], options: &SearchOptions) -> Result<Vec<FileResult>> {
    let Some(plan) = PoolPlan::new(files.len(), options.available_units()) else {
        return Ok(Vec::new());
    };
    tracing::debug!(
        files = files.len(),
        workers = plan.workers,
        chunk_size = plan.chunk_size,
        "dispatching tally workers"
    );

    let per_worker = run_chunks(plan, files, |chunk| {
        tracing::debug!(files = chunk.len(), "worker started");
        chunk.iter().map(tally_file_or_mark).collect::<Vec<_>>()
    })?;

    Ok(per_worker.into_iter().flatten().collect())
}

/// Run `f` once per planned chunk on a dedicated pool of `plan.workers`
/// threads named `tally-N`, returning the outputs in chunk order
pub(crate) fn run_chunks<T, R, F>(plan: PoolPlan, items: &[T], f: F) -> Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&[T]) -> R + Sync + Send,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(plan.workers)
        .thread_name(|i| format!("tally-{i}"))
        .build()
        .map_err(|e| SearchError::WorkerPool(e.to_string()))?;

    Ok(pool.install(|| {
        items
            .par_chunks(plan.chunk_size)
            .with_max_len(1)
            .map(|chunk| f(chunk))
            .collect()
    }))
}

/// Discover every file under `root` and tally each one
pub fn count_words_in_files(root: impl AsRef<Path>, options: &SearchOptions) -> Result<Vec<FileResult>> {
    let files = find_files(root)?;
    tally_all(&files, options)
}
