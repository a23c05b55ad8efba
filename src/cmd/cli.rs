use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::Level;

use crate::{
    cmd::{check_directory, check_word, tui::TuiApp, SearchForm},
    config::SearchOptions,
    discovery::find_files,
    search::search_directory,
    types::{RankedEntry, WordMap},
};

#[derive(Parser)]
#[command(name = "wordrank")]
#[command(about = "Rank the files under a directory by how often a line occurs in them")]
#[command(version)]
#[command(propagate_version = true)]
pub struct EnhancedCli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log more detail to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank files by occurrences of a word
    Search {
        /// Directory to search
        directory: PathBuf,

        /// Word (a whole line) to count
        word: String,

        /// Output format (text, json, csv)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Lower-case the word before matching
        #[arg(long)]
        fold_case: bool,

        /// Maximum number of worker threads
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// List the files a search would read
    Files {
        /// Directory to scan
        directory: PathBuf,
    },

    /// Interactive search mode
    Interactive,

    /// TUI mode
    Tui,
}

pub struct CliApp {
    cli: EnhancedCli,
}

impl CliApp {
    pub fn new() -> Self {
        Self {
            cli: EnhancedCli::parse(),
        }
    }

    pub fn run() -> Result<()> {
        let app = Self::new();

        // The TUI owns the terminal, so nothing may log over it.
        if !matches!(app.cli.command, Some(Commands::Tui)) {
            init_logging(app.cli.verbose);
        }

        match app.cli.command {
            Some(Commands::Search { directory, word, format, fold_case, workers }) => {
                let mut options = SearchOptions::new().fold_case(fold_case);
                if let Some(workers) = workers {
                    options = options.with_max_workers(workers);
                }
                Self::run_search(&directory, &word, &options, &format)
            }
            Some(Commands::Files { directory }) => Self::run_files(&directory),
            Some(Commands::Interactive) => Self::run_interactive(),
            Some(Commands::Tui) => TuiApp::default().run(),
            None => {
                Self::show_help();
                Ok(())
            }
        }
    }

    fn run_search(directory: &Path, word: &str, options: &SearchOptions, format: &str) -> Result<()> {
        let spinner = show_spinner(&format!("Counting lines under {}", directory.display()))?;
        let start = Instant::now();
        let report = search_directory(directory, word, options);
        spinner.finish_and_clear();

        let report = report.with_context(|| format!("Search failed for {}", directory.display()))?;

        Self::display_results(&report, format, start.elapsed())
    }

    fn run_files(directory: &Path) -> Result<()> {
        let files = find_files(directory)
            .with_context(|| format!("Failed to scan {}", directory.display()))?;

        for file in &files {
            println!("{}", file.display());
        }
        println!("{}", format!("{} files found", files.len()).green());
        Ok(())
    }

    fn run_interactive() -> Result<()> {
        println!("{}", "Interactive Mode".bold().blue());
        println!("{}", "=================".blue());

        let form = Self::get_search_form_interactive()?;
        let fold_case = Confirm::new()
            .with_prompt("Match the word case-insensitively?")
            .default(false)
            .interact()?;

        let options = SearchOptions::new().fold_case(fold_case);
        Self::run_search(Path::new(&form.directory), &form.word, &options, "text")
    }

    fn get_search_form_interactive() -> Result<SearchForm> {
        let directory: String = Input::new()
            .with_prompt("Directory path")
            .validate_with(|input: &String| check_directory(input))
            .interact_text()?;

        let word: String = Input::new()
            .with_prompt("Word")
            .validate_with(|input: &String| check_word(input))
            .interact_text()?;

        Ok(SearchForm::new(directory, word))
    }

    fn display_results(report: &WordMap, format: &str, duration: Duration) -> Result<()> {
        match format.to_lowercase().as_str() {
            "json" => return Self::display_json_results(report),
            "csv" => return Self::display_csv_results(&report.word_map),
            _ => {}
        }

        println!("\n{}", "=".repeat(50).blue());
        println!("{}", format!("RESULTS FOR \"{}\"", report.word).blue().bold());
        println!("{}", "=".repeat(50).blue());

        Self::display_text_results(&report.word_map);

        let unreadable = report.word_map.iter().filter(|e| e.error.is_some()).count();
        println!("{}", "=".repeat(50).blue());
        println!("{}", format!("Search completed in {} ms", duration.as_millis()).italic());
        println!("{}", format!("Ranked {} files", report.word_map.len()).green().bold());
        if unreadable > 0 {
            println!("{}", format!("{} files could not be read", unreadable).yellow());
        }

        Ok(())
    }

    fn display_text_results(entries: &[RankedEntry]) {
        if entries.is_empty() {
            println!("{}", "No files found.".yellow());
            return;
        }

        for (i, entry) in entries.iter().enumerate() {
            let count = if entry.count == 0 {
                entry.count.to_string().dimmed()
            } else {
                entry.count.to_string().green()
            };
            match &entry.error {
                Some(error) => println!("  {}: {} → {} ({})", i + 1, entry.name.blue(), count, error.yellow()),
                None => println!("  {}: {} → {}", i + 1, entry.name.blue(), count),
            }
        }
    }

    fn display_json_results(report: &WordMap) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(report)?);
        Ok(())
    }

    fn display_csv_results(entries: &[RankedEntry]) -> Result<()> {
        println!("file,count,error");
        for entry in entries {
            println!(
                "{},{},{}",
                csv_field(&entry.name),
                entry.count,
                csv_field(entry.error.as_deref().unwrap_or(""))
            );
        }
        Ok(())
    }

    fn show_help() {
        println!("{}", "wordrank - rank files by line occurrences".blue().bold());
        println!();
        println!("Usage:");
        println!("  wordrank search <directory> <word>");
        println!("  wordrank files <directory>");
        println!("  wordrank interactive");
        println!("  wordrank tui");
        println!();
        println!("Examples:");
        println!("  wordrank search ./notes todo");
        println!("  wordrank search ./notes TODO --fold-case --format json");
        println!("  wordrank search ./logs error --workers 2 -v");
        println!();
        println!("For more help, run: wordrank --help");
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn show_spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed}]")?
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
