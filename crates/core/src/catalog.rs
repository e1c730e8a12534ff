//! Static course and game catalogs.

use crate::model::{Course, CourseId, Game, GameId};

#[must_use]
pub fn courses() -> Vec<Course> {
    vec![
        Course::new(
            CourseId::new(CourseId::MATH_ADVENTURE),
            "Math Adventure 🔢",
            "Explore numbers and solve fun problems!",
        ),
        Course::new(
            CourseId::new(CourseId::SCIENCE_QUEST),
            "Science Quest 🔬",
            "Discover amazing scientific wonders!",
        ),
        Course::new(
            CourseId::new(CourseId::ENGLISH_FUN),
            "English Fun 📚",
            "Learn words and stories together!",
        ),
    ]
}

#[must_use]
pub fn games() -> Vec<Game> {
    GameId::ALL.into_iter().map(game).collect()
}

#[must_use]
pub fn game(id: GameId) -> Game {
    match id {
        GameId::Matching => Game::new(
            id,
            "Matching Game 🎴",
            "Match pairs and test your memory!",
            CourseId::new(CourseId::MATH_ADVENTURE),
        ),
        GameId::Memory => Game::new(
            id,
            "Memory Cards 🃏",
            "Flip cards and find matches!",
            CourseId::new(CourseId::SCIENCE_QUEST),
        ),
        GameId::WordPuzzle => Game::new(
            id,
            "Word Puzzle 🧩",
            "Complete the word puzzles!",
            CourseId::new(CourseId::ENGLISH_FUN),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_game_requires_a_catalog_course() {
        let course_ids: Vec<_> = courses().iter().map(|c| c.id().clone()).collect();
        for g in games() {
            assert!(course_ids.contains(g.required_course()));
        }
    }

    #[test]
    fn courses_start_unlocked() {
        assert!(courses().iter().all(|c| !c.locked()));
    }
}
