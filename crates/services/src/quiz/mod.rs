mod service;
mod session;

// Public API of the quiz engine.
pub use crate::error::QuizError;
pub use service::{QuizService, SubmittedAnswer};
pub use session::{AnswerFeedback, QuizProgress, QuizSession, QuizStep};
