//! Results projection for a finished quiz.

use crate::session::QuizSession;

/// Below this percentage the results screen suggests reviewing the material.
pub const REVIEW_THRESHOLD: f64 = 70.0;

/// A question the user got wrong, with what they should have picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissedQuestion {
    pub index: usize,
    pub prompt: String,
    pub correct_answer: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsSummary {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub missed: Vec<MissedQuestion>,
}

impl ResultsSummary {
    pub fn from_session(session: &QuizSession) -> Self {
        let questions = session.questions();
        let missed = session
            .missed_indices()
            .iter()
            .filter_map(|&index| {
                let question = questions.get(index)?;
                Some(MissedQuestion {
                    index,
                    prompt: question.prompt.clone(),
                    correct_answer: question.correct_option().map(|o| o.label.clone()),
                })
            })
            .collect();

        Self {
            score: session.score(),
            total: session.total(),
            percentage: percentage(session.score(), session.total()),
            missed,
        }
    }

    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.missed.is_empty()
    }

    pub fn needs_review(&self) -> bool {
        self.percentage < REVIEW_THRESHOLD
    }
}

pub fn percentage(score: usize, total: usize) -> f64 {
    if total > 0 {
        (score as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}
