use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::ids::CourseId;

/// Minimum percentage that counts as a pass. Inclusive.
pub const PASS_THRESHOLD: f64 = 60.0;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("correct index {0} is outside the four options")]
    CorrectIndexOutOfRange(usize),
}

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum QuizResultError {
    #[error("score {0} is outside 0..=100")]
    ScoreOutOfRange(f64),

    #[error("an attempt needs at least one question")]
    NoQuestions,

    #[error("{correct} correct answers exceed {total} questions")]
    TooManyCorrect { correct: usize, total: usize },
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question with exactly four options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    prompt: String,
    options: [String; 4],
    correct_index: usize,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError::CorrectIndexOutOfRange` if `correct_index > 3`.
    pub fn new(
        prompt: impl Into<String>,
        options: [&str; 4],
        correct_index: usize,
    ) -> Result<Self, QuestionError> {
        if correct_index >= options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange(correct_index));
        }
        Ok(Self {
            prompt: prompt.into(),
            options: options.map(str::to_string),
            correct_index,
        })
    }

    /// Builds a question from a compile-time table row.
    pub(crate) fn from_table(prompt: &str, options: [&str; 4], correct_index: usize) -> Self {
        debug_assert!(correct_index < options.len());
        Self {
            prompt: prompt.to_string(),
            options: options.map(str::to_string),
            correct_index,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String; 4] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn is_correct(&self, chosen: usize) -> bool {
        chosen == self.correct_index
    }
}

//
// ─── QUIZ RESULT ──────────────────────────────────────────────────────────────
//

/// Outcome of one completed attempt.
///
/// `passed` is derived from `score` at construction and cannot drift from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizResult {
    course_id: CourseId,
    score: f64,
    passed: bool,
    timestamp: DateTime<Utc>,
}

impl QuizResult {
    /// Build a result from a percentage score.
    ///
    /// # Errors
    ///
    /// Returns `QuizResultError::ScoreOutOfRange` for non-finite scores or scores outside 0..=100.
    pub fn new(
        course_id: CourseId,
        score: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, QuizResultError> {
        if !score.is_finite() || !(0.0..=100.0).contains(&score) {
            return Err(QuizResultError::ScoreOutOfRange(score));
        }
        Ok(Self {
            course_id,
            score,
            passed: score >= PASS_THRESHOLD,
            timestamp,
        })
    }

    /// Build a result from answer counts: `score = 100 * correct / total`.
    ///
    /// # Errors
    ///
    /// Returns `QuizResultError::NoQuestions` when `total` is zero and
    /// `QuizResultError::TooManyCorrect` when `correct > total`.
    pub fn from_counts(
        course_id: CourseId,
        correct: usize,
        total: usize,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, QuizResultError> {
        if total == 0 {
            return Err(QuizResultError::NoQuestions);
        }
        if correct > total {
            return Err(QuizResultError::TooManyCorrect { correct, total });
        }
        // Question sets are tiny, the casts are exact.
        #[allow(clippy::cast_precision_loss)]
        let score = 100.0 * correct as f64 / total as f64;
        Self::new(course_id, score, timestamp)
    }

    #[must_use]
    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.passed
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Timestamp as epoch milliseconds.
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
