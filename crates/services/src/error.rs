//! Shared error types for the services crate.

use thiserror::Error;

use quest_core::games::{BoardError, PuzzleError};
use quest_core::model::{GameId, QuizResultError};

/// Errors emitted by the quiz engine. A rejected call leaves the session untouched.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question {got} is not the current question ({current})")]
    NotCurrentQuestion { current: usize, got: usize },
    #[error("option {0} does not exist")]
    OptionOutOfRange(usize),
    #[error("question {0} was already answered")]
    AlreadyAnswered(usize),
    #[error("the current question has not been answered")]
    AwaitingAnswer,
    #[error("quiz already completed")]
    Completed,
    #[error("quiz was abandoned")]
    Abandoned,
    #[error(transparent)]
    Result(#[from] QuizResultError),
}

/// Errors emitted by an `Authenticator`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthError {
    #[error("credentials were rejected")]
    Rejected,
}

/// Errors emitted by the session manager.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("nobody is signed in")]
    NotSignedIn,
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Errors emitted by the mini-game services.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("{0} is not a pair-matching game")]
    NotAPairGame(GameId),
    #[error("{0} is locked until its course quiz is passed")]
    Locked(GameId),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}
