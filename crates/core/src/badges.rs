//! Badge award rules.
//!
//! Rules are table rows: a badge id plus a trigger over the newly recorded
//! result. New awards are added as rows; the evaluator itself stays generic.
//! Catalog badges without a row (course mastery, streaks) are never
//! auto-awarded.

use chrono::{DateTime, Utc};

use crate::model::{Badge, BadgeId, QuizResult};

/// Score needed, on a passing attempt, for `quiz-master`.
pub const QUIZ_MASTER_MIN_SCORE: f64 = 90.0;

/// Inputs visible to a trigger.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// The result that was just recorded.
    pub result: &'a QuizResult,
    /// Every recorded attempt, oldest first, including `result`.
    pub history: &'a [QuizResult],
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct BadgeRule {
    pub badge: BadgeId,
    pub triggers: fn(&RuleContext<'_>) -> bool,
}

fn quiz_master(ctx: &RuleContext<'_>) -> bool {
    ctx.result.passed() && ctx.result.score() >= QUIZ_MASTER_MIN_SCORE
}

/// The active rule table.
pub const RULES: &[BadgeRule] = &[BadgeRule {
    badge: BadgeId::QuizMaster,
    triggers: quiz_master,
}];

/// Applies [`RULES`] to `current` and returns the updated badge set.
///
/// Only unearned badges can change; earned ones keep their original
/// `earned_at`.
#[must_use]
pub fn evaluate(
    result: &QuizResult,
    history: &[QuizResult],
    current: &[Badge],
    earned_at: DateTime<Utc>,
) -> Vec<Badge> {
    evaluate_with(RULES, result, history, current, earned_at)
}

/// Same as [`evaluate`] with an explicit rule table.
#[must_use]
pub fn evaluate_with(
    rules: &[BadgeRule],
    result: &QuizResult,
    history: &[QuizResult],
    current: &[Badge],
    earned_at: DateTime<Utc>,
) -> Vec<Badge> {
    let ctx = RuleContext { result, history };
    current
        .iter()
        .map(|badge| {
            if badge.earned() {
                return badge.clone();
            }
            let triggered = rules
                .iter()
                .any(|rule| rule.badge == badge.id() && (rule.triggers)(&ctx));
            if triggered {
                badge.earn(earned_at)
            } else {
                badge.clone()
            }
        })
        .collect()
}

/// Ids earned in `after` but not in `before`, in catalog order.
#[must_use]
pub fn newly_earned(before: &[Badge], after: &[Badge]) -> Vec<BadgeId> {
    after
        .iter()
        .filter(|badge| badge.earned())
        .filter(|badge| {
            !before
                .iter()
                .any(|prev| prev.id() == badge.id() && prev.earned())
        })
        .map(Badge::id)
        .collect()
}
