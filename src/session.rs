//! Quiz session state machine.
//!
//! `Idle -> InProgress -> Answered -> InProgress ... -> Finished -> Idle`

use std::collections::BTreeSet;

use crate::error::QuizError;
use crate::models::Question;
use crate::summary::ResultsSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No questions loaded.
    #[default]
    Idle,
    /// Current question waiting for an answer.
    InProgress,
    /// Current question locked, showing correctness.
    Answered,
    /// All questions exhausted.
    Finished,
}

/// What happened when an answer was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct { question_index: usize },
    Incorrect {
        question_index: usize,
        correct_index: Option<usize>,
    },
    /// Not accepting answers right now, e.g. the question is already answered.
    Ignored,
}

impl AnswerOutcome {
    /// Question index to auto-advance from, if the answer was accepted.
    pub fn question_index(&self) -> Option<usize> {
        match self {
            AnswerOutcome::Correct { question_index }
            | AnswerOutcome::Incorrect { question_index, .. } => Some(*question_index),
            AnswerOutcome::Ignored => None,
        }
    }
}

/// Result of an advance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Next { question_index: usize },
    Finished,
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizSession {
    phase: Phase,
    questions: Vec<Question>,
    current_index: usize,
    score: usize,
    missed_indices: BTreeSet<usize>,
    selected_index: Option<usize>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::InProgress | Phase::Answered => self.questions.get(self.current_index),
            Phase::Idle | Phase::Finished => None,
        }
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn missed_indices(&self) -> &BTreeSet<usize> {
        &self.missed_indices
    }

    /// Whether the current question is locked after a response.
    pub fn answered(&self) -> bool {
        self.phase == Phase::Answered
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// Fraction of questions already behind the user, for a progress bar.
    pub fn progress_ratio(&self) -> f64 {
        match self.phase {
            Phase::Idle => 0.0,
            Phase::Finished => 1.0,
            Phase::InProgress | Phase::Answered => {
                self.current_index as f64 / self.questions.len().max(1) as f64
            }
        }
    }

    /// Load a fresh question set and move to the first question.
    pub fn start(&mut self, questions: Vec<Question>) -> Result<(), QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuestionSet);
        }

        if matches!(self.phase, Phase::InProgress | Phase::Answered) {
            return Err(QuizError::AlreadyInProgress);
        }

        *self = Self {
            phase: Phase::InProgress,
            questions,
            ..Self::default()
        };
        tracing::info!(total = self.total(), "quiz started");
        Ok(())
    }

    /// Lock the current question with `option_index` as the response.
    ///
    /// Only the first submission per question counts; later ones are ignored.
    pub fn submit_answer(&mut self, option_index: usize) -> Result<AnswerOutcome, QuizError> {
        if self.phase != Phase::InProgress {
            return Ok(AnswerOutcome::Ignored);
        }

        let question_index = self.current_index;
        let Some(question) = self.questions.get(question_index) else {
            return Ok(AnswerOutcome::Ignored);
        };

        if option_index >= question.options.len() {
            return Err(QuizError::OptionOutOfRange {
                index: option_index,
                len: question.options.len(),
            });
        }

        let correct = question.is_correct(option_index);
        let correct_index = question.correct_index();

        self.selected_index = Some(option_index);
        self.phase = Phase::Answered;

        if correct {
            self.score += 1;
            tracing::debug!(question_index, "answered correctly");
            Ok(AnswerOutcome::Correct { question_index })
        } else {
            self.missed_indices.insert(question_index);
            tracing::debug!(question_index, option_index, "answered incorrectly");
            Ok(AnswerOutcome::Incorrect {
                question_index,
                correct_index,
            })
        }
    }

    /// Leave an answered question for the next one, or finish.
    pub fn advance(&mut self) -> Progress {
        if self.phase != Phase::Answered {
            return Progress::Ignored;
        }

        let next = self.current_index + 1;
        if next < self.questions.len() {
            self.current_index = next;
            self.selected_index = None;
            self.phase = Phase::InProgress;
            Progress::Next {
                question_index: next,
            }
        } else {
            self.phase = Phase::Finished;
            tracing::info!(score = self.score, total = self.total(), "quiz finished");
            Progress::Finished
        }
    }

    /// Drop everything and return to the idle state.
    pub fn retry(&mut self) {
        *self = Self::default();
    }

    pub fn summary(&self) -> Option<ResultsSummary> {
        (self.phase == Phase::Finished).then(|| ResultsSummary::from_session(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnswerOption;

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| {
                Question::new(
                    format!("Q{}", i + 1),
                    vec![
                        AnswerOption::new("yes", true),
                        AnswerOption::new("no", false),
                        AnswerOption::new("maybe", false),
                    ],
                )
            })
            .collect()
    }

    fn assert_score_bound(session: &QuizSession) {
        let answered = matches!(session.phase(), Phase::Answered | Phase::Finished);
        assert!(session.score() <= session.current_index() + usize::from(answered));
    }

    #[test]
    fn test_start_requires_questions() {
        let mut session = QuizSession::new();
        assert!(matches!(
            session.start(Vec::new()),
            Err(QuizError::EmptyQuestionSet)
        ));
        assert_eq!(session, QuizSession::default());
    }

    #[test]
    fn test_full_pass() {
        let mut session = QuizSession::new();
        session.start(questions(3)).unwrap();
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.current_question().unwrap().prompt, "Q1");

        for (i, choice) in [0, 1, 0].into_iter().enumerate() {
            assert_score_bound(&session);
            session.submit_answer(choice).unwrap();
            assert!(session.answered());
            assert_eq!(session.selected_index(), Some(choice));
            assert_score_bound(&session);

            let progress = session.advance();
            if i < 2 {
                assert_eq!(
                    progress,
                    Progress::Next {
                        question_index: i + 1
                    }
                );
                assert_eq!(session.selected_index(), None);
            } else {
                assert_eq!(progress, Progress::Finished);
            }
        }

        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.score(), 2);
        assert_eq!(session.missed_indices().iter().copied().collect::<Vec<_>>(), vec![1]);
        assert!(session.current_question().is_none());
        assert_score_bound(&session);
    }

    #[test]
    fn test_second_submit_is_noop() {
        let mut session = QuizSession::new();
        session.start(questions(2)).unwrap();

        assert_eq!(
            session.submit_answer(1).unwrap(),
            AnswerOutcome::Incorrect {
                question_index: 0,
                correct_index: Some(0)
            }
        );
        let snapshot = session.clone();

        assert_eq!(session.submit_answer(0).unwrap(), AnswerOutcome::Ignored);
        assert_eq!(session, snapshot);
    }

    #[test]
    fn test_out_of_range_option_leaves_state() {
        let mut session = QuizSession::new();
        session.start(questions(1)).unwrap();
        let snapshot = session.clone();

        assert!(matches!(
            session.submit_answer(3),
            Err(QuizError::OptionOutOfRange { index: 3, len: 3 })
        ));
        assert_eq!(session, snapshot);
    }

    #[test]
    fn test_advance_only_from_answered() {
        let mut session = QuizSession::new();
        assert_eq!(session.advance(), Progress::Ignored);

        session.start(questions(2)).unwrap();
        assert_eq!(session.advance(), Progress::Ignored);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_submit_when_idle_is_ignored() {
        let mut session = QuizSession::new();
        assert_eq!(session.submit_answer(0).unwrap(), AnswerOutcome::Ignored);
        assert_eq!(session, QuizSession::default());
    }

    #[test]
    fn test_retry_resets_everything() {
        let mut session = QuizSession::new();
        session.start(questions(1)).unwrap();
        session.submit_answer(2).unwrap();
        session.advance();
        assert_eq!(session.phase(), Phase::Finished);

        session.retry();
        assert_eq!(session, QuizSession::default());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_restart_from_finished() {
        let mut session = QuizSession::new();
        session.start(questions(1)).unwrap();
        session.submit_answer(1).unwrap();
        session.advance();

        session.start(questions(2)).unwrap();
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.score(), 0);
        assert!(session.missed_indices().is_empty());
        assert_eq!(session.total(), 2);
    }

    #[test]
    fn test_start_rejected_mid_quiz() {
        let mut session = QuizSession::new();
        session.start(questions(2)).unwrap();
        let snapshot = session.clone();

        assert!(matches!(
            session.start(questions(5)),
            Err(QuizError::AlreadyInProgress)
        ));
        assert_eq!(session, snapshot);
    }

    #[test]
    fn test_progress_ratio() {
        let mut session = QuizSession::new();
        assert_eq!(session.progress_ratio(), 0.0);

        session.start(questions(4)).unwrap();
        session.submit_answer(0).unwrap();
        session.advance();
        assert_eq!(session.progress_ratio(), 0.25);
    }
}
