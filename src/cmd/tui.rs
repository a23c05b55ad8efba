use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::{io::stdout, time::Instant};
use tui_input::{Input, InputRequest};

use crate::{cmd::SearchForm, config::SearchOptions, search::search_with, types::RankedEntry};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Directory,
    Word,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Directory => Field::Word,
            Field::Word => Field::Directory,
        }
    }
}

pub struct TuiApp {
    pub directory: Input,
    pub word: Input,
    pub focus: Field,
    pub fold_case: bool,
    pub results: Vec<RankedEntry>,
    pub status: String,
    pub status_is_error: bool,
    pub should_quit: bool,
}

impl Default for TuiApp {
    fn default() -> Self {
        Self {
            directory: Input::default(),
            word: Input::default(),
            focus: Field::Directory,
            fold_case: false,
            results: Vec::new(),
            status: "Fill in both fields and press Enter".to_string(),
            status_is_error: false,
            should_quit: false,
        }
    }
}

impl TuiApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_app(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    fn run_app(&mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.ui(f))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code, key.modifiers);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let request = match code {
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = self.focus.next();
                return;
            }
            KeyCode::Enter => {
                self.submit();
                return;
            }
            KeyCode::Char('f') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.fold_case = !self.fold_case;
                return;
            }
            KeyCode::Char(c) => InputRequest::InsertChar(c),
            KeyCode::Backspace => InputRequest::DeletePrevChar,
            KeyCode::Delete => InputRequest::DeleteNextChar,
            KeyCode::Left => InputRequest::GoToPrevChar,
            KeyCode::Right => InputRequest::GoToNextChar,
            KeyCode::Home => InputRequest::GoToStart,
            KeyCode::End => InputRequest::GoToEnd,
            _ => return,
        };
        self.focused_input().handle(request);
    }

    fn focused_input(&mut self) -> &mut Input {
        match self.focus {
            Field::Directory => &mut self.directory,
            Field::Word => &mut self.word,
        }
    }

    pub fn form(&self) -> SearchForm {
        SearchForm::new(self.directory.value(), self.word.value())
    }

    /// Validate the form and run the search, replacing any previous results
    pub fn submit(&mut self) {
        let form = self.form();
        if let Err(message) = form.validate() {
            self.set_status(message, true);
            return;
        }

        let options = SearchOptions::new().fold_case(self.fold_case);
        let start = Instant::now();
        match search_with(&form.directory, &form.word, &options) {
            Ok(results) => {
                let unreadable = results.iter().filter(|e| e.error.is_some()).count();
                let mut status = format!(
                    "Ranked {} files in {} ms",
                    results.len(),
                    start.elapsed().as_millis()
                );
                if unreadable > 0 {
                    status.push_str(&format!(", {} unreadable", unreadable));
                }
                self.results = results;
                self.set_status(status, false);
            }
            Err(e) => {
                self.results.clear();
                self.set_status(e.to_string(), true);
            }
        }
    }

    fn set_status(&mut self, message: String, is_error: bool) {
        self.status = message;
        self.status_is_error = is_error;
    }

    fn ui(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(
                [
                    Constraint::Length(1), // Header
                    Constraint::Length(3), // Directory
                    Constraint::Length(3), // Word
                    Constraint::Min(0),    // Results
                    Constraint::Length(3), // Status bar
                ]
                .as_ref(),
            )
            .split(f.size());

        self.draw_header(f, chunks[0]);
        self.draw_input(f, chunks[1], "Directory", &self.directory, Field::Directory);
        self.draw_input(f, chunks[2], "Word", &self.word, Field::Word);
        self.draw_results(f, chunks[3]);
        self.draw_status_bar(f, chunks[4]);
    }

    fn draw_header(&self, f: &mut Frame, area: Rect) {
        let case = if self.fold_case { "ignore case" } else { "exact case" };
        let title = Line::from(vec![
            Span::styled("wordrank", Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(case, Style::default().fg(Color::Yellow)),
        ]);
        f.render_widget(Paragraph::new(title), area);
    }

    fn draw_input(&self, f: &mut Frame, area: Rect, title: &str, input: &Input, field: Field) {
        let focused = self.focus == field;
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let paragraph = Paragraph::new(input.value())
            .style(style)
            .block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(paragraph, area);

        if focused {
            let max_x = area.width.saturating_sub(2);
            let x = (input.cursor() as u16).min(max_x);
            f.set_cursor(area.x + 1 + x, area.y + 1);
        }
    }

    fn draw_results(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().title("Results").borders(Borders::ALL);

        if self.results.is_empty() {
            f.render_widget(Paragraph::new("No results yet.").block(block), area);
            return;
        }

        let rows: Vec<Row> = self
            .results
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let count_style = if entry.count == 0 {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::Green)
                };
                Row::new(vec![
                    Cell::from((i + 1).to_string()),
                    Cell::from(entry.name.clone()),
                    Cell::from(entry.count.to_string()).style(count_style),
                    Cell::from(entry.error.clone().unwrap_or_default())
                        .style(Style::default().fg(Color::Red)),
                ])
            })
            .collect();

        let table = Table::new(rows)
            .header(
                Row::new(vec!["#", "File", "Count", "Note"])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .block(block)
            .widths(&[
                Constraint::Length(5),
                Constraint::Percentage(45),
                Constraint::Length(8),
                Constraint::Percentage(40),
            ]);

        f.render_widget(table, area);
    }

    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let style = if self.status_is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        let text = format!(
            "{}  |  Tab switch field, Enter search, Ctrl+F toggle case, Esc quit",
            self.status
        );

        let status = Paragraph::new(text)
            .style(style)
            .block(Block::default().borders(Borders::TOP));
        f.render_widget(status, area);
    }
}
