//! Error types for quiz operations.

use std::io;

use thiserror::Error;

use crate::models::ShapeError;

/// Errors surfaced to the caller of a quiz operation.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Input text is under the minimum length.
    #[error("text too short: {actual} characters, at least {min} required")]
    InputTooShort { min: usize, actual: usize },
    /// Input text exceeds the word ceiling of the active tier.
    #[error("text too long: {actual} words, at most {max} allowed")]
    InputTooLong { max: usize, actual: usize },
    /// Questions could not be generated.
    #[error("failed to generate questions: {0}")]
    Generation(#[from] GenerationError),
    /// A quiz cannot start without questions.
    #[error("cannot start a quiz without questions")]
    EmptyQuestionSet,
    /// A quiz is already running; retry or finish it first.
    #[error("a quiz is already in progress")]
    AlreadyInProgress,
    /// The chosen option does not exist on the current question.
    #[error("option {index} is out of range for a question with {len} options")]
    OptionOutOfRange { index: usize, len: usize },
    /// IO error while running the terminal UI.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl QuizError {
    /// Whether this error came from the generation step rather than input validation.
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, QuizError::Generation(_))
    }

    /// Whether the user can fix this by editing the input text.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            QuizError::InputTooShort { .. } | QuizError::InputTooLong { .. }
        )
    }
}

/// Errors emitted by question sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("API key not configured")]
    MissingApiKey,
    #[error("generation service returned {status}: {message}")]
    Service {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("generation service returned an empty response")]
    EmptyResponse,
    #[error("could not parse generated questions: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("generated questions are malformed: {0}")]
    InvalidResponseShape(#[from] ShapeError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl From<ShapeError> for QuizError {
    fn from(err: ShapeError) -> Self {
        QuizError::Generation(GenerationError::InvalidResponseShape(err))
    }
}
