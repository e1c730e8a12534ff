use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

use quest_core::model::{CourseId, Question, QuizResult};
use quest_core::question_bank::QuestionSet;

use crate::deferred::{Deferred, GenerationTicket, ViewGeneration};
use crate::error::QuizError;

//
// ─── READ MODELS ───────────────────────────────────────────────────────────────
//

/// Feedback for an accepted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub question_index: usize,
    pub chosen: usize,
    pub correct: bool,
}

/// What advancing past an answered question did.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizStep {
    /// Moved on to the question at this index.
    Next(usize),
    /// That was the last question; the attempt is final.
    Finished(QuizResult),
}

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// One-based number of the question on screen.
    pub question_number: usize,
    pub total: usize,
    /// Correct answers so far.
    pub score: usize,
    /// The question on screen has an accepted answer.
    pub answered: bool,
    pub is_complete: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One attempt at a course quiz.
///
/// Answering is two-phase: [`QuizSession::select_answer`] locks the current
/// question and reports feedback, then [`QuizSession::advance`] moves on or
/// finalizes. Only a finalized attempt produces a [`QuizResult`].
pub struct QuizSession {
    course_id: CourseId,
    question_set: QuestionSet,
    questions: Vec<Question>,
    current: usize,
    correct: usize,
    answered: Option<AnswerFeedback>,
    started_at: DateTime<Utc>,
    result: Option<QuizResult>,
    view: ViewGeneration,
    ticket: GenerationTicket,
}

impl QuizSession {
    /// Start an attempt with the question set for this course and age.
    ///
    /// `started_at` should come from the services layer clock. `view` is
    /// usually a child of the learner session's generation.
    #[must_use]
    pub fn start(
        course_id: CourseId,
        age_hint: u8,
        started_at: DateTime<Utc>,
        view: ViewGeneration,
    ) -> Self {
        let question_set = QuestionSet::select(&course_id, age_hint);
        let ticket = view.ticket();
        Self {
            course_id,
            question_set,
            questions: question_set.questions(),
            current: 0,
            correct: 0,
            answered: None,
            started_at,
            result: None,
            view,
            ticket,
        }
    }

    #[must_use]
    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    #[must_use]
    pub fn question_set(&self) -> QuestionSet {
        self.question_set
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_complete() {
            return None;
        }
        self.questions.get(self.current)
    }

    /// Feedback for the question on screen, if it has been answered.
    #[must_use]
    pub fn current_feedback(&self) -> Option<AnswerFeedback> {
        self.answered
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        !self.ticket.is_current()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            question_number: (self.current + 1).min(self.questions.len()),
            total: self.questions.len(),
            score: self.correct,
            answered: self.answered.is_some(),
            is_complete: self.is_complete(),
        }
    }

    /// Handle the view uses to dismiss the quiz.
    #[must_use]
    pub fn view(&self) -> ViewGeneration {
        self.view.clone()
    }

    /// Dismiss the quiz. Nothing is recorded and pending advances go stale.
    pub fn abandon(&mut self) {
        self.view.invalidate();
    }

    fn ensure_active(&self) -> Result<(), QuizError> {
        if self.is_abandoned() {
            return Err(QuizError::Abandoned);
        }
        if self.is_complete() {
            return Err(QuizError::Completed);
        }
        Ok(())
    }

    /// Active with the current question answered.
    pub(crate) fn ensure_ready_to_advance(&self) -> Result<(), QuizError> {
        self.ensure_active()?;
        if self.answered.is_none() {
            return Err(QuizError::AwaitingAnswer);
        }
        Ok(())
    }

    /// Accept an answer for the current question.
    ///
    /// # Errors
    ///
    /// Rejects answers for any question other than the current one, option
    /// indexes past the last option, and a second answer to the same
    /// question. Rejections leave the session unchanged.
    pub fn select_answer(
        &mut self,
        question_index: usize,
        chosen: usize,
    ) -> Result<AnswerFeedback, QuizError> {
        self.ensure_active()?;
        if question_index != self.current {
            return Err(QuizError::NotCurrentQuestion {
                current: self.current,
                got: question_index,
            });
        }
        if self.answered.is_some() {
            return Err(QuizError::AlreadyAnswered(question_index));
        }
        let question = &self.questions[self.current];
        if chosen >= question.options().len() {
            return Err(QuizError::OptionOutOfRange(chosen));
        }

        let feedback = AnswerFeedback {
            question_index,
            chosen,
            correct: question.is_correct(chosen),
        };
        if feedback.correct {
            self.correct += 1;
        }
        self.answered = Some(feedback);
        Ok(feedback)
    }

    /// Move past the answered question. On the last question the attempt is
    /// finalized with `completed_at` as its timestamp.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AwaitingAnswer` if the current question has no answer yet.
    pub fn advance(&mut self, completed_at: DateTime<Utc>) -> Result<QuizStep, QuizError> {
        self.ensure_ready_to_advance()?;

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.answered = None;
            return Ok(QuizStep::Next(self.current));
        }

        let result = QuizResult::from_counts(
            self.course_id.clone(),
            self.correct,
            self.questions.len(),
            completed_at,
        )?;
        self.result = Some(result.clone());
        Ok(QuizStep::Finished(result))
    }

    /// A deferred "move on" for the feedback timer. Goes stale on [`QuizSession::abandon`].
    pub fn schedule_advance(&self, delay: Duration) -> Deferred<()> {
        Deferred::new(self.view.ticket(), delay, ())
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("course_id", &self.course_id)
            .field("question_set", &self.question_set)
            .field("current", &self.current)
            .field("correct", &self.correct)
            .field("answered", &self.answered)
            .field("started_at", &self.started_at)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
