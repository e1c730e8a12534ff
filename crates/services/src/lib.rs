#![forbid(unsafe_code)]

pub mod auth;
pub mod deferred;
pub mod error;
pub mod games;
pub mod gating;
pub mod helper;
pub mod progress;
pub mod quiz;
pub mod session;
pub mod timings;

pub use quest_core::Clock;

pub use auth::{Authenticator, Credentials, IdentityStore, MockAuthenticator};
pub use deferred::{Deferred, GenerationTicket, ViewGeneration};
pub use error::{AuthError, GameError, QuizError, SessionError};
pub use games::{GameService, PairGame, PairMove};
pub use gating::{
    CourseListing, GameListing, course_listing, game_listing, is_course_locked, is_game_locked,
};
pub use helper::{ChatMessage, HelperChat};
pub use progress::{ChartPoint, ProgressOverview, ProgressStore};
pub use quiz::{
    AnswerFeedback, QuizProgress, QuizService, QuizSession, QuizStep, SubmittedAnswer,
};
pub use session::{LearnerSession, SessionManager};
pub use timings::Timings;
