pub mod cli;
pub mod tui;

pub use cli::CliApp;
pub use tui::TuiApp;

/// Longest directory path accepted from a form
pub const MAX_DIRECTORY_LEN: usize = 500;
/// Longest target word accepted from a form
pub const MAX_WORD_LEN: usize = 50;

/// The two strings a front end collects before starting a search.
///
/// Both fields are stored with surrounding whitespace removed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub directory: String,
    pub word: String,
}

impl SearchForm {
    pub fn new(directory: impl Into<String>, word: impl Into<String>) -> Self {
        Self {
            directory: directory.into().trim().to_string(),
            word: word.into().trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        check_directory(&self.directory)?;
        check_word(&self.word)
    }
}

pub fn check_directory(input: &str) -> Result<(), String> {
    check_field("Directory path", input, MAX_DIRECTORY_LEN)
}

pub fn check_word(input: &str) -> Result<(), String> {
    check_field("Word", input, MAX_WORD_LEN)
}

fn check_field(label: &str, input: &str, max_len: usize) -> Result<(), String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(format!("{} is required", label));
    }
    let len = input.chars().count();
    if len > max_len {
        return Err(format!(
            "{} must be at most {} characters (got {})",
            label, max_len, len
        ));
    }
    Ok(())
}
