mod question;

pub(crate) use question::validate_set;
pub use question::{AnswerOption, Question, ShapeError};
