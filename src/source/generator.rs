use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::QuizError;
use crate::models::{validate_set, Question};

use super::{InputPolicy, QuestionSource};

/// Upper bound on questions kept from a single generation.
pub const MAX_QUESTIONS: usize = 20;

/// Wraps a [`QuestionSource`] with input gating, shape validation and option
/// shuffling.
#[derive(Clone)]
pub struct Generator {
    source: Arc<dyn QuestionSource>,
    policy: InputPolicy,
}

impl Generator {
    pub fn new(source: Arc<dyn QuestionSource>, policy: InputPolicy) -> Self {
        Self { source, policy }
    }

    pub fn policy(&self) -> InputPolicy {
        self.policy
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Generate a validated question set from `text`.
    ///
    /// Input errors are returned before the source is called. Every failure
    /// past that point is a generation failure; nothing is retried and no
    /// placeholder set is substituted.
    pub async fn generate<R>(&self, text: &str, rng: &mut R) -> Result<Vec<Question>, QuizError>
    where
        R: Rng + Send + ?Sized,
    {
        let text = self.policy.validate(text)?;

        let span = tracing::info_span!(
            "generate",
            request_id = %Uuid::new_v4(),
            source = self.source.name(),
        );

        let mut questions = async {
            tracing::info!(chars = text.chars().count(), "generating questions");
            let result = self.source.generate(text).await;
            if let Err(e) = &result {
                tracing::error!(error = %e, "question generation failed");
            }
            result
        }
        .instrument(span)
        .await?;

        validate_set(&questions).inspect_err(|e| {
            tracing::warn!(error = %e, "rejecting malformed question set");
        })?;

        if questions.len() > MAX_QUESTIONS {
            tracing::warn!(
                count = questions.len(),
                "truncating question set to {}",
                MAX_QUESTIONS
            );
            questions.truncate(MAX_QUESTIONS);
        }

        shuffle_options(&mut questions, rng);
        Ok(questions)
    }
}

/// Randomise option order in place. Which option is correct travels with it.
pub fn shuffle_options<R: Rng + ?Sized>(questions: &mut [Question], rng: &mut R) {
    for question in questions {
        question.options.shuffle(rng);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::error::GenerationError;
    use crate::models::AnswerOption;

    const TEXT: &str = "Rust is a systems programming language focused on safety, speed and concurrency.";

    struct Canned {
        questions: Vec<Question>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl QuestionSource for Canned {
        fn name(&self) -> &'static str {
            "canned"
        }

        async fn generate(&self, _text: &str) -> Result<Vec<Question>, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.questions.clone())
        }
    }

    fn question(n: usize) -> Question {
        Question::new(
            format!("Question {}", n),
            vec![
                AnswerOption::new("right", true),
                AnswerOption::new("wrong 1", false),
                AnswerOption::new("wrong 2", false),
                AnswerOption::new("wrong 3", false),
            ],
        )
    }

    fn generator(questions: Vec<Question>) -> (Generator, Arc<Canned>) {
        let source = Arc::new(Canned {
            questions,
            calls: AtomicUsize::new(0),
        });
        (
            Generator::new(source.clone(), InputPolicy::default()),
            source,
        )
    }

    #[tokio::test]
    async fn test_short_input_skips_source() {
        let (generator, source) = generator(vec![question(1)]);
        let mut rng = StdRng::seed_from_u64(1);

        let err = generator.generate("too short", &mut rng).await.unwrap_err();
        assert!(matches!(err, QuizError::InputTooShort { .. }));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_rejects_two_correct_options() {
        let mut bad = question(2);
        bad.options[3].is_correct = true;
        let (generator, _) = generator(vec![question(1), bad]);
        let mut rng = StdRng::seed_from_u64(1);

        let err = generator.generate(TEXT, &mut rng).await.unwrap_err();
        assert!(err.is_generation_failure());
    }

    #[tokio::test]
    async fn test_rejects_empty_set() {
        let (generator, _) = generator(Vec::new());
        let mut rng = StdRng::seed_from_u64(1);

        let err = generator.generate(TEXT, &mut rng).await.unwrap_err();
        assert!(err.is_generation_failure());
    }

    #[tokio::test]
    async fn test_truncates_to_max() {
        let (generator, _) = generator((0..25).map(question).collect());
        let mut rng = StdRng::seed_from_u64(7);

        let questions = generator.generate(TEXT, &mut rng).await.unwrap();
        assert_eq!(questions.len(), MAX_QUESTIONS);
        assert_eq!(questions[19].prompt, "Question 19");
    }

    #[test]
    fn test_seeded_shuffle_is_deterministic() {
        let mut first: Vec<Question> = (0..10).map(question).collect();
        let mut second = first.clone();

        shuffle_options(&mut first, &mut StdRng::seed_from_u64(42));
        shuffle_options(&mut second, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);

        for q in &first {
            assert!(q.validate(0).is_ok());
            assert_eq!(q.correct_option().map(|o| o.label.as_str()), Some("right"));
        }

        // Ten 4-option shuffles all leaving the correct answer first is
        // vanishingly unlikely for a fixed seed.
        assert!(first.iter().any(|q| q.correct_index() != Some(0)));
    }
}
