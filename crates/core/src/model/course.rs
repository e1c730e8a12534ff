use serde::Serialize;

use crate::model::ids::{CourseId, GameId};

/// A course the learner can take a quiz in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    id: CourseId,
    title: String,
    description: String,
    locked: bool,
}

impl Course {
    #[must_use]
    pub fn new(id: CourseId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            locked: false,
        }
    }

    /// Marks the course as locked by a product rule.
    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn locked(&self) -> bool {
        self.locked
    }
}

/// A mini-game unlocked by passing its required course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Game {
    id: GameId,
    title: String,
    description: String,
    required_course: CourseId,
}

impl Game {
    #[must_use]
    pub fn new(
        id: GameId,
        title: impl Into<String>,
        description: impl Into<String>,
        required_course: CourseId,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            required_course,
        }
    }

    #[must_use]
    pub fn id(&self) -> GameId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn required_course(&self) -> &CourseId {
        &self.required_course
    }
}
