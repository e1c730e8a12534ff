use serde::Serialize;
use tracing::info;

use quest_core::badges;
use quest_core::model::{Badge, BadgeId, CourseId, QuizResult};

use crate::Clock;

/// Attempts shown on the dashboard chart.
pub const CHART_WINDOW: usize = 5;

/// One bar of the dashboard chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub course_id: CourseId,
    pub score: f64,
}

/// Presentation-agnostic dashboard numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressOverview {
    pub total_attempts: usize,
    pub passed_attempts: usize,
    pub average_score: f64,
    pub earned_badges: usize,
    pub total_badges: usize,
    pub chart: Vec<ChartPoint>,
}

/// Session-scoped quiz history and badge collection.
///
/// Results are append-only. Badges only ever move from unearned to earned.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    clock: Clock,
    results: Vec<QuizResult>,
    badges: Vec<Badge>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            results: Vec::new(),
            badges: Badge::catalog(),
        }
    }

    /// Appends a completed attempt and runs the badge rules over it.
    /// Returns the badges this result newly earned.
    pub fn record_result(&mut self, result: QuizResult) -> Vec<BadgeId> {
        info!(
            course = %result.course_id(),
            score = result.score(),
            passed = result.passed(),
            "quiz result recorded"
        );
        self.results.push(result);
        let latest = &self.results[self.results.len() - 1];

        let updated = badges::evaluate(latest, &self.results, &self.badges, self.clock.now());
        let earned = badges::newly_earned(&self.badges, &updated);
        self.badges = updated;

        for id in &earned {
            info!(badge = %id, "badge earned");
        }
        earned
    }

    /// Marks a badge earned outside the rule table. Returns false if it
    /// already was.
    pub fn earn_badge(&mut self, id: BadgeId) -> bool {
        let now = self.clock.now();
        let Some(badge) = self.badges.iter_mut().find(|b| b.id() == id) else {
            return false;
        };
        if badge.earned() {
            return false;
        }
        *badge = badge.earn(now);
        info!(badge = %id, "badge earned");
        true
    }

    /// True once any attempt on the course has passed, regardless of later failures.
    #[must_use]
    pub fn has_passed(&self, course_id: &CourseId) -> bool {
        self.results
            .iter()
            .any(|r| r.course_id() == course_id && r.passed())
    }

    /// Badges in catalog order.
    #[must_use]
    pub fn list_badges(&self) -> &[Badge] {
        &self.badges
    }

    /// The last `n` attempts, oldest first.
    #[must_use]
    pub fn list_recent_results(&self, n: usize) -> &[QuizResult] {
        let start = self.results.len().saturating_sub(n);
        &self.results[start..]
    }

    /// Every attempt, oldest first.
    #[must_use]
    pub fn results(&self) -> &[QuizResult] {
        &self.results
    }

    #[must_use]
    pub fn overview(&self) -> ProgressOverview {
        let total_attempts = self.results.len();
        let passed_attempts = self.results.iter().filter(|r| r.passed()).count();
        let average_score = if total_attempts == 0 {
            0.0
        } else {
            // Attempt counts stay far below f64's exact integer range.
            #[allow(clippy::cast_precision_loss)]
            let n = total_attempts as f64;
            self.results.iter().map(QuizResult::score).sum::<f64>() / n
        };
        let chart = self
            .list_recent_results(CHART_WINDOW)
            .iter()
            .enumerate()
            .map(|(i, r)| ChartPoint {
                label: format!("Quiz {}", i + 1),
                course_id: r.course_id().clone(),
                score: r.score(),
            })
            .collect();

        ProgressOverview {
            total_attempts,
            passed_attempts,
            average_score,
            earned_badges: self.badges.iter().filter(|b| b.earned()).count(),
            total_badges: self.badges.len(),
            chart,
        }
    }
}
