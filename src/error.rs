use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while searching a directory tree
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Unreadable file {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
