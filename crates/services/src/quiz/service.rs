use tracing::{debug, info};

use quest_core::model::{CourseId, DEFAULT_AGE_HINT, Identity};

use super::session::{AnswerFeedback, QuizSession, QuizStep};
use crate::deferred::ViewGeneration;
use crate::error::QuizError;
use crate::progress::ProgressStore;
use crate::{Clock, Timings};

/// Result of answering and advancing in one call.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedAnswer {
    pub feedback: AnswerFeedback,
    pub step: QuizStep,
}

/// Orchestrates quiz attempts and reports finished ones to the progress store.
#[derive(Debug, Clone, Copy)]
pub struct QuizService {
    clock: Clock,
    timings: Timings,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            timings: Timings::default(),
        }
    }

    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Start an attempt. The age comes from the identity, defaulting when
    /// nobody is signed in. Pass [`LearnerSession::child_view`] as `view` so
    /// signing out cancels the attempt.
    ///
    /// [`LearnerSession::child_view`]: crate::session::LearnerSession::child_view
    #[must_use]
    pub fn start_quiz(
        &self,
        course_id: CourseId,
        identity: Option<&Identity>,
        view: ViewGeneration,
    ) -> QuizSession {
        let age_hint = identity.map_or(DEFAULT_AGE_HINT, Identity::age_hint);
        let session = QuizSession::start(course_id, age_hint, self.clock.now(), view);
        info!(
            course = %session.course_id(),
            age_hint,
            set = ?session.question_set(),
            "quiz started"
        );
        session
    }

    /// Answer the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` when the answer is rejected; the session is unchanged.
    pub fn answer(
        &self,
        session: &mut QuizSession,
        question_index: usize,
        chosen: usize,
    ) -> Result<AnswerFeedback, QuizError> {
        session
            .select_answer(question_index, chosen)
            .inspect_err(|err| debug!(%err, question_index, chosen, "answer rejected"))
    }

    /// Move past the answered question, recording the result when the attempt finishes.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the session cannot advance.
    pub fn advance(
        &self,
        session: &mut QuizSession,
        progress: &mut ProgressStore,
    ) -> Result<QuizStep, QuizError> {
        let step = session.advance(self.clock.now())?;
        if let QuizStep::Finished(result) = &step {
            progress.record_result(result.clone());
        }
        Ok(step)
    }

    /// Answer and advance immediately.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if either phase is rejected.
    pub fn submit_answer(
        &self,
        session: &mut QuizSession,
        progress: &mut ProgressStore,
        question_index: usize,
        chosen: usize,
    ) -> Result<SubmittedAnswer, QuizError> {
        let feedback = self.answer(session, question_index, chosen)?;
        let step = self.advance(session, progress)?;
        Ok(SubmittedAnswer { feedback, step })
    }

    /// Let the feedback show for the configured delay, then advance.
    ///
    /// Returns `Ok(None)` when the quiz was dismissed while waiting.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` without waiting if the session cannot advance.
    pub async fn advance_after_feedback(
        &self,
        session: &mut QuizSession,
        progress: &mut ProgressStore,
    ) -> Result<Option<QuizStep>, QuizError> {
        session.ensure_ready_to_advance()?;
        let pending = session.schedule_advance(self.timings.answer_feedback);
        if pending.fire().await.is_none() {
            return Ok(None);
        }
        self.advance(session, progress).map(Some)
    }
}
