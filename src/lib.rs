//! # certcbt
//!
//! A terminal practice tool for certification exam question banks.
//!
//! Parses a flat text dump of exam questions (`QUESTION <n>` blocks
//! terminated by `Correct Answer: <letters>` lines) and drives three
//! modes: a timed 65-question mock exam, a single-question drill, and
//! a grading report.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use certcbt::{Cbt, CbtError};
//!
//! fn main() -> Result<(), CbtError> {
//!     // Load the question bank from a flat text file
//!     let cbt = Cbt::from_bank("questions.txt")?;
//!
//!     // Run the tool in the terminal
//!     cbt.run()?;
//!
//!     Ok(())
//! }
//! ```

mod app;
mod bank;
mod models;
mod report;
mod session;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;

pub use app::App;
pub use bank::{LoadError, load_question_bank, parse};
pub use models::{AppState, Question};
pub use report::{Report, ReportEntry, answers_match};
pub use session::{DrillPhase, DrillState, EXAM_DURATION, ExamSession, MOCK_EXAM_SIZE};

/// How long the event loop waits for input before repainting. Keeps
/// the exam countdown moving while the user is idle.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Error type for CBT operations.
#[derive(Debug, Error)]
pub enum CbtError {
    /// The question bank could not be loaded.
    #[error("failed to load question bank: {0}")]
    Load(#[from] LoadError),
    /// IO error while driving the terminal.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A CBT practice instance that can be run in the terminal.
pub struct Cbt {
    app: App,
}

impl Cbt {
    /// Create an instance over an already-parsed bank.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            app: App::new(questions),
        }
    }

    /// Load the question bank from a flat text file.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use certcbt::Cbt;
    ///
    /// let cbt = Cbt::from_bank("questions.txt").expect("Failed to load bank");
    /// ```
    pub fn from_bank<P: AsRef<Path>>(path: P) -> Result<Self, CbtError> {
        let questions = load_question_bank(path)?;
        Ok(Self::new(questions))
    }

    /// Take over the terminal, run until the user quits.
    pub fn run(mut self) -> Result<(), CbtError> {
        let (_guard, mut term) = terminal::TerminalGuard::acquire()?;
        run_event_loop(&mut term, &mut self.app)
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), CbtError> {
    loop {
        app.tick();
        terminal.draw(|frame| ui::render(frame, app))?;

        if !event::poll(TICK_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.state {
        AppState::Menu => handle_menu_input(app, key),
        AppState::MockExam => handle_exam_input(app, key),
        AppState::Drill => handle_drill_input(app, key),
        AppState::Grading => handle_grading_input(app, key),
    }
}

fn handle_menu_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.menu_up();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.menu_down();
            false
        }
        KeyCode::Enter => match app.menu_cursor() {
            0 => {
                app.start_mock_exam();
                false
            }
            1 => {
                app.start_drill();
                false
            }
            _ => true,
        },
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_exam_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected(),
        KeyCode::Left | KeyCode::Char('h') => app.previous_question(),
        KeyCode::Right | KeyCode::Char('l') => app.next_question(),
        KeyCode::Char('f') | KeyCode::Char('F') => app.finish_exam(),
        KeyCode::Esc => app.back_to_menu(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

fn handle_drill_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected(),
        KeyCode::Char('a') | KeyCode::Char('A') => app.toggle_reveal(),
        KeyCode::Char('n') | KeyCode::Char('N') => app.drill_next_question(),
        KeyCode::Esc => app.back_to_menu(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

fn handle_grading_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_grading_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_grading_up(),
        KeyCode::Enter | KeyCode::Esc => app.back_to_menu(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}
