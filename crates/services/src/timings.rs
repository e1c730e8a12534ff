use std::time::Duration;

/// Delays for the deferred view updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// How long answer feedback shows before the quiz moves on.
    pub answer_feedback: Duration,
    /// Helper "thinking" time before a canned reply appears.
    pub helper_reply: Duration,
    /// Matching game: mismatched tiles stay up this long.
    pub matching_mismatch: Duration,
    /// Memory game: mismatched cards stay up this long.
    pub memory_mismatch: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            answer_feedback: Duration::from_millis(1500),
            helper_reply: Duration::from_millis(1000),
            matching_mismatch: Duration::from_millis(800),
            memory_mismatch: Duration::from_millis(1000),
        }
    }
}
