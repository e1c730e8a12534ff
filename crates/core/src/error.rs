use thiserror::Error;

use crate::model::{ParseIdError, QuestionError, QuizResultError};

/// Umbrella error for domain validation failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    QuizResult(#[from] QuizResultError),
    #[error(transparent)]
    ParseId(#[from] ParseIdError),
}
