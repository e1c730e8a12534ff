use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::ids::BadgeId;

/// An achievement in the fixed catalog.
///
/// `earned` is derived from `earned_at`, so a badge can only move from
/// unearned to earned, and the first earn time is never overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    id: BadgeId,
    title: &'static str,
    icon: &'static str,
    earned_at: Option<DateTime<Utc>>,
}

impl Badge {
    #[must_use]
    pub fn unearned(id: BadgeId) -> Self {
        let (title, icon) = match id {
            BadgeId::MathStar => ("Math Star", "⭐"),
            BadgeId::ScienceExplorer => ("Science Explorer", "🔬"),
            BadgeId::EnglishChampion => ("English Champion", "📚"),
            BadgeId::StreakMaster => ("Streak Master", "🔥"),
            BadgeId::QuizMaster => ("Quiz Master", "🏆"),
        };
        Self {
            id,
            title,
            icon,
            earned_at: None,
        }
    }

    /// The full catalog, unearned, in display order.
    #[must_use]
    pub fn catalog() -> Vec<Badge> {
        BadgeId::ALL.into_iter().map(Badge::unearned).collect()
    }

    #[must_use]
    pub fn id(&self) -> BadgeId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        self.title
    }

    #[must_use]
    pub fn icon(&self) -> &'static str {
        self.icon
    }

    #[must_use]
    pub fn earned(&self) -> bool {
        self.earned_at.is_some()
    }

    #[must_use]
    pub fn earned_at(&self) -> Option<DateTime<Utc>> {
        self.earned_at
    }

    /// Returns a copy marked as earned at `at`. Already earned badges come
    /// back unchanged.
    #[must_use]
    pub fn earn(&self, at: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        if next.earned_at.is_none() {
            next.earned_at = Some(at);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn catalog_has_five_unearned_badges_in_order() {
        let catalog = Badge::catalog();
        let ids: Vec<_> = catalog.iter().map(Badge::id).collect();
        assert_eq!(ids, BadgeId::ALL.to_vec());
        assert!(catalog.iter().all(|badge| !badge.earned()));
        assert_eq!(catalog[4].title(), "Quiz Master");
    }

    #[test]
    fn earn_keeps_first_timestamp() {
        let first = fixed_now();
        let later = first + chrono::Duration::minutes(5);
        let badge = Badge::unearned(BadgeId::QuizMaster).earn(first).earn(later);
        assert!(badge.earned());
        assert_eq!(badge.earned_at(), Some(first));
    }
}
