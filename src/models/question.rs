use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single multiple-choice question.
///
/// Serialized as `{"question": "...", "options": [{"text": "...", "isCorrect": true}]}`,
/// the shape the generation service is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<AnswerOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    #[serde(rename = "text")]
    pub label: String,
    #[serde(rename = "isCorrect", default)]
    pub is_correct: bool,
}

/// Reasons a generated question fails the single-correct-answer invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("no questions were generated")]
    Empty,
    #[error("question {index} has an empty prompt")]
    EmptyPrompt { index: usize },
    #[error("question {index} has {count} options, at least 2 are required")]
    TooFewOptions { index: usize, count: usize },
    #[error("question {index} has {count} correct options, exactly 1 is required")]
    CorrectCount { index: usize, count: usize },
}

impl AnswerOption {
    pub fn new(label: impl Into<String>, is_correct: bool) -> Self {
        Self {
            label: label.into(),
            is_correct,
        }
    }
}

impl Question {
    pub fn new(prompt: impl Into<String>, options: Vec<AnswerOption>) -> Self {
        Self {
            prompt: prompt.into(),
            options,
        }
    }

    /// Index of the first option marked correct.
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|option| option.is_correct)
    }

    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.is_correct)
    }

    pub fn is_correct(&self, option_index: usize) -> bool {
        self.options
            .get(option_index)
            .is_some_and(|option| option.is_correct)
    }

    /// Check this question, reporting problems against position `index`.
    pub fn validate(&self, index: usize) -> Result<(), ShapeError> {
        if self.prompt.trim().is_empty() {
            return Err(ShapeError::EmptyPrompt { index });
        }

        if self.options.len() < 2 {
            return Err(ShapeError::TooFewOptions {
                index,
                count: self.options.len(),
            });
        }

        let correct = self.options.iter().filter(|o| o.is_correct).count();
        if correct != 1 {
            return Err(ShapeError::CorrectCount {
                index,
                count: correct,
            });
        }

        Ok(())
    }
}

/// Validate a whole generated set.
pub(crate) fn validate_set(questions: &[Question]) -> Result<(), ShapeError> {
    if questions.is_empty() {
        return Err(ShapeError::Empty);
    }

    questions
        .iter()
        .enumerate()
        .try_for_each(|(index, question)| question.validate(index))
}
