//! Lock rules for the course and game listings.

use serde::Serialize;

use quest_core::catalog;
use quest_core::model::{Course, Game};

use crate::progress::ProgressStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseListing {
    pub course: Course,
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameListing {
    pub game: Game,
    pub locked: bool,
}

/// Courses carry their own lock flag; progress does not affect it.
#[must_use]
pub fn is_course_locked(course: &Course) -> bool {
    course.locked()
}

/// A game stays locked until its required course has a passing attempt.
#[must_use]
pub fn is_game_locked(game: &Game, progress: &ProgressStore) -> bool {
    !progress.has_passed(game.required_course())
}

#[must_use]
pub fn course_listing() -> Vec<CourseListing> {
    catalog::courses()
        .into_iter()
        .map(|course| CourseListing {
            locked: is_course_locked(&course),
            course,
        })
        .collect()
}

#[must_use]
pub fn game_listing(progress: &ProgressStore) -> Vec<GameListing> {
    catalog::games()
        .into_iter()
        .map(|game| GameListing {
            locked: is_game_locked(&game, progress),
            game,
        })
        .collect()
}
