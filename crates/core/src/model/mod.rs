mod badge;
mod course;
mod identity;
mod ids;
mod quiz;

pub use badge::Badge;
pub use course::{Course, Game};
pub use identity::{DEFAULT_AGE_HINT, Identity, Role};
pub use ids::{BadgeId, CourseId, GameId, ParseIdError, UserId};
pub use quiz::{PASS_THRESHOLD, Question, QuestionError, QuizResult, QuizResultError};
