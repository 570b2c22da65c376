use async_trait::async_trait;

use crate::error::GenerationError;
use crate::models::{AnswerOption, Question};

use super::QuestionSource;

const PLACEHOLDER_COUNT: usize = 20;
const PREVIEW_CHARS: usize = 30;

/// Local stand-in that needs no network or credentials.
///
/// Only used when selected explicitly; a failing remote source is never
/// replaced by this one behind the user's back.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderSource;

#[async_trait]
impl QuestionSource for PlaceholderSource {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    async fn generate(&self, text: &str) -> Result<Vec<Question>, GenerationError> {
        let preview: String = text.chars().take(PREVIEW_CHARS).collect();

        Ok((1..=PLACEHOLDER_COUNT)
            .map(|n| {
                Question::new(
                    format!("Sample Question {} about \"{}...\"", n, preview),
                    vec![
                        AnswerOption::new("Correct Answer", true),
                        AnswerOption::new("Wrong Answer 1", false),
                        AnswerOption::new("Wrong Answer 2", false),
                        AnswerOption::new("Wrong Answer 3", false),
                    ],
                )
            })
            .collect())
    }
}
