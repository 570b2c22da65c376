use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::QuizError;
use crate::event::AppEvent;
use crate::models::Question;
use crate::schedule::{AdvanceHandle, AdvanceScheduler};
use crate::session::{Phase, Progress, QuizSession};
use crate::source::Generator;
use crate::summary::ResultsSummary;

/// Which screen the UI shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Entry,
    Generating,
    Quiz,
    Results,
}

/// A transient message for the user, shown on the entry screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub detail: String,
}

impl Notice {
    pub fn from_error(err: &QuizError, min_chars: usize) -> Self {
        let (title, detail) = match err {
            QuizError::InputTooShort { .. } => (
                "Text too short",
                format!(
                    "Please enter at least {} characters to generate meaningful questions.",
                    min_chars
                ),
            ),
            QuizError::InputTooLong { max, .. } => (
                "Text too long",
                format!("Your plan allows up to {} words per quiz.", max),
            ),
            QuizError::Generation(e) => ("Could not generate questions", e.to_string()),
            other => ("Something went wrong", other.to_string()),
        };

        Self {
            title: title.to_string(),
            detail,
        }
    }
}

struct PendingGeneration {
    request: u64,
    task: JoinHandle<()>,
}

pub struct App {
    screen: Screen,
    input: String,
    notice: Option<Notice>,
    session: QuizSession,
    cursor: usize,
    results_scroll: usize,
    generator: Generator,
    scheduler: AdvanceScheduler,
    pending_advance: Option<AdvanceHandle>,
    pending_generation: Option<PendingGeneration>,
    next_request: u64,
    rng: StdRng,
    tx: mpsc::UnboundedSender<AppEvent>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        generator: Generator,
        scheduler: AdvanceScheduler,
        seed: Option<u64>,
        tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            screen: Screen::Entry,
            input: String::new(),
            notice: None,
            session: QuizSession::new(),
            cursor: 0,
            results_scroll: 0,
            generator,
            scheduler,
            pending_advance: None,
            pending_generation: None,
            next_request: 0,
            rng,
            tx,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn min_chars(&self) -> usize {
        self.generator.policy().min_chars
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn results_scroll(&self) -> usize {
        self.results_scroll
    }

    pub fn summary(&self) -> Option<ResultsSummary> {
        self.session.summary()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn push_input(&mut self, text: &str) {
        self.notice = None;
        self.input.push_str(text);
    }

    pub fn pop_input(&mut self) {
        self.notice = None;
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.notice = None;
        self.input.clear();
    }

    pub fn is_generating(&self) -> bool {
        self.pending_generation.is_some()
    }

    /// Whether the generate action should be offered.
    pub fn can_generate(&self) -> bool {
        !self.is_generating() && self.generator.policy().accepts(&self.input)
    }

    /// Kick off generation for the current input.
    ///
    /// Input errors are returned immediately and nothing is sent. Only one
    /// request may be outstanding; further calls while one is pending are
    /// ignored.
    pub fn request_generation(&mut self) -> Result<(), QuizError> {
        if self.is_generating() {
            return Ok(());
        }

        if let Err(err) = self.generator.policy().validate(&self.input) {
            self.notice = Some(Notice::from_error(&err, self.min_chars()));
            return Err(err);
        }

        self.next_request += 1;
        let request = self.next_request;
        let generator = self.generator.clone();
        let text = self.input.clone();
        let mut rng = StdRng::seed_from_u64(self.rng.random());
        let tx = self.tx.clone();

        let task = tokio::spawn(async move {
            let result = generator.generate(&text, &mut rng).await;
            let _ = tx.send(AppEvent::Generated { request, result });
        });

        self.pending_generation = Some(PendingGeneration { request, task });
        self.notice = None;
        self.screen = Screen::Generating;
        tracing::debug!(request, "generation requested");
        Ok(())
    }

    /// Abandon an outstanding generation; its result is discarded.
    pub fn cancel_generation(&mut self) {
        if let Some(pending) = self.pending_generation.take() {
            pending.task.abort();
            tracing::info!(request = pending.request, "generation abandoned");
        }
        if self.screen == Screen::Generating {
            self.screen = Screen::Entry;
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Generated { request, result } => self.on_generated(request, result),
            AppEvent::Advance { question_index } => self.on_advance(question_index),
        }
    }

    fn on_generated(
        &mut self,
        request: u64,
        result: Result<Vec<Question>, QuizError>,
    ) {
        let is_current = self
            .pending_generation
            .as_ref()
            .is_some_and(|pending| pending.request == request);
        if !is_current {
            tracing::debug!(request, "dropping stale generation result");
            return;
        }
        self.pending_generation = None;

        match result.and_then(|questions| self.session.start(questions)) {
            Ok(()) => {
                self.cursor = 0;
                self.screen = Screen::Quiz;
            }
            Err(err) => {
                self.notice = Some(Notice::from_error(&err, self.min_chars()));
                self.screen = Screen::Entry;
            }
        }
    }

    fn on_advance(&mut self, question_index: usize) {
        let is_current = self
            .pending_advance
            .as_ref()
            .is_some_and(|handle| handle.question_index() == question_index);
        if !is_current {
            return;
        }
        self.pending_advance = None;

        match self.session.advance() {
            Progress::Next { .. } => self.cursor = 0,
            Progress::Finished => {
                self.results_scroll = 0;
                self.screen = Screen::Results;
            }
            Progress::Ignored => {}
        }
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 && self.session.phase() == Phase::InProgress {
            self.cursor = (self.cursor + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 && self.session.phase() == Phase::InProgress {
            self.cursor = (self.cursor + count - 1) % count;
        }
    }

    pub fn submit_selected(&mut self) {
        self.answer(self.cursor);
    }

    /// Answer the current question and schedule the reveal-then-advance.
    pub fn answer(&mut self, option_index: usize) {
        match self.session.submit_answer(option_index) {
            Ok(outcome) => {
                if let Some(question_index) = outcome.question_index() {
                    self.cursor = option_index;
                    self.pending_advance = Some(self.scheduler.schedule(question_index));
                }
            }
            Err(err) => tracing::debug!(error = %err, "answer rejected"),
        }
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self
            .summary()
            .map_or(0, |summary| summary.missed.len().saturating_sub(1));
        self.results_scroll = (self.results_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.results_scroll = self.results_scroll.saturating_sub(1);
    }

    /// Back to text entry with an empty session. The entered text is kept.
    pub fn retry(&mut self) {
        self.pending_advance = None;
        self.cancel_generation();
        self.session.retry();
        self.cursor = 0;
        self.results_scroll = 0;
        self.screen = Screen::Entry;
    }

    pub fn quit(&mut self) {
        self.pending_advance = None;
        self.cancel_generation();
        self.should_quit = true;
    }

    fn option_count(&self) -> usize {
        self.session
            .current_question()
            .map_or(0, |question| question.options.len())
    }
}
