//! Question sources.
//!
//! A source turns free-form text into a question set. Sources do not validate
//! input or shape; [`Generator`] wraps any source with both.

mod generator;
mod input;
mod openai;
mod placeholder;
mod relay;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::GenerationError;
use crate::models::Question;

pub use generator::{shuffle_options, Generator, MAX_QUESTIONS};
pub use input::{InputPolicy, Tier, FREE_TIER_MAX_WORDS, MIN_INPUT_CHARS, PAID_TIER_MAX_WORDS};
pub use openai::{OpenAiConfig, OpenAiSource, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use placeholder::PlaceholderSource;
pub use relay::RelaySource;

#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn generate(&self, text: &str) -> Result<Vec<Question>, GenerationError>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionPayload {
    List(Vec<Question>),
    Wrapped { questions: Vec<Question> },
}

/// Parse a generated question list, tolerating a markdown code fence and a
/// `{"questions": [...]}` wrapper around the array.
pub(crate) fn parse_questions(content: &str) -> Result<Vec<Question>, GenerationError> {
    let body = strip_code_fence(content);
    if body.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    let payload: QuestionPayload = serde_json::from_str(body)?;
    Ok(match payload {
        QuestionPayload::List(questions) => questions,
        QuestionPayload::Wrapped { questions } => questions,
    })
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the language tag, e.g. ```json
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest.strip_prefix("json").unwrap_or(rest),
    };
    rest.trim_end().trim_end_matches("```").trim()
}

/// Pull a human readable message out of an error body.
///
/// Understands both `{"error": "..."}` and `{"error": {"message": "..."}}`.
pub(crate) fn error_message(body: &str, fallback: &str) -> String {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return fallback.to_string(),
    };

    let error = &value["error"];
    error
        .as_str()
        .or_else(|| error["message"].as_str())
        .filter(|message| !message.trim().is_empty())
        .unwrap_or(fallback)
        .to_string()
}
