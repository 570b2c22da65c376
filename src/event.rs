//! Events delivered to the app from background tasks.

use crate::error::QuizError;
use crate::models::Question;

#[derive(Debug)]
pub enum AppEvent {
    /// A generation request finished.
    Generated {
        request: u64,
        result: Result<Vec<Question>, QuizError>,
    },
    /// The reveal delay for an answered question elapsed.
    Advance { question_index: usize },
}
