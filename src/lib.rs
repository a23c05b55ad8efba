pub mod config;
pub mod discovery;
pub mod error;
pub mod pool;
pub mod rank;
pub mod search;
pub mod tally;
pub mod types;
pub mod cmd;

pub use config::SearchOptions;
pub use discovery::find_files;
pub use error::{Result, SearchError};
pub use pool::{count_words_in_files, tally_all, PoolPlan};
pub use rank::rank;
pub use search::{search, search_directory, search_with};
pub use tally::{tally_file, tally_text};
pub use types::{FileEntry, FileResult, RankedEntry, WordMap, WordTally};
