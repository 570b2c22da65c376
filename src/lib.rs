//! # mcq-quiz
//!
//! Turn a passage of text into a multiple-choice quiz and take it in the
//! terminal.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mcq_quiz::{Quiz, QuizError, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let settings = Settings {
//!         offline: true,
//!         ..Settings::default()
//!     };
//!
//!     Quiz::new(settings)?.run().await
//! }
//! ```

mod app;
mod config;
mod error;
mod event;
mod models;
mod schedule;
mod session;
mod source;
mod summary;
pub mod terminal;
mod ui;

use std::fs;
use std::time::Duration;

use crossterm::event::{self as term_event, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

pub use app::{App, Notice, Screen};
pub use config::Settings;
pub use error::{GenerationError, QuizError};
pub use event::AppEvent;
pub use models::{AnswerOption, Question, ShapeError};
pub use schedule::{AdvanceHandle, AdvanceScheduler, DEFAULT_ADVANCE_DELAY};
pub use session::{AnswerOutcome, Phase, Progress, QuizSession};
pub use source::{
    shuffle_options, Generator, InputPolicy, OpenAiConfig, OpenAiSource, PlaceholderSource,
    QuestionSource, RelaySource, Tier, DEFAULT_BASE_URL, DEFAULT_MODEL, FREE_TIER_MAX_WORDS,
    MAX_QUESTIONS, MIN_INPUT_CHARS, PAID_TIER_MAX_WORDS,
};
pub use summary::{MissedQuestion, ResultsSummary};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A quiz application ready to take over the terminal.
pub struct Quiz {
    app: App,
    events: mpsc::UnboundedReceiver<AppEvent>,
}

impl Quiz {
    /// Build the app from settings. Must be called inside a tokio runtime.
    pub fn new(settings: Settings) -> Result<Self, QuizError> {
        let (tx, events) = mpsc::unbounded_channel();
        let scheduler = AdvanceScheduler::new(settings.advance_delay(), tx.clone());
        let generator = settings.generator();
        tracing::info!(
            source = generator.source_name(),
            tier = %settings.tier,
            "quiz configured"
        );

        let mut app = App::new(generator, scheduler, settings.seed, tx);
        if let Some(path) = &settings.text_file {
            app.set_input(fs::read_to_string(path)?);
        }

        Ok(Self { app, events })
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app, &mut self.events);
        terminal::restore()?;
        result
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(
    terminal: &mut terminal::Tui,
    app: &mut App,
    events: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> Result<(), QuizError> {
    while !app.should_quit {
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if !term_event::poll(INPUT_POLL_INTERVAL)? {
            continue;
        }

        match term_event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_input(app, key),
            Event::Paste(text) if app.screen() == Screen::Entry => app.push_input(&text),
            _ => {}
        }
    }

    Ok(())
}

fn handle_input(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match app.screen() {
        Screen::Entry => handle_entry_input(app, key),
        Screen::Generating => handle_generating_input(app, key.code),
        Screen::Quiz => handle_quiz_input(app, key.code),
        Screen::Results => handle_result_input(app, key.code),
    }
}

fn handle_entry_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => app.push_input("\n"),
        KeyCode::Enter => {
            // Rejections are shown as a notice on this screen.
            let _ = app.request_generation();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => app.clear_input(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.push_input(c.encode_utf8(&mut [0; 4]))
        }
        KeyCode::Backspace => app.pop_input(),
        KeyCode::Esc => app.quit(),
        _ => {}
    }
}

fn handle_generating_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => app.cancel_generation(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.submit_selected(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char(c) if c.is_ascii_alphabetic() => {
            app.answer((c.to_ascii_lowercase() as u8 - b'a') as usize);
        }
        _ => {}
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.retry(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}
