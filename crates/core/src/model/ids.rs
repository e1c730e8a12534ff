use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for a signed-in user.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(u64);

impl UserId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Course slug such as `math-adventure`.
///
/// Any string is accepted: unknown courses still get a question set.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(String);

impl CourseId {
    pub const MATH_ADVENTURE: &'static str = "math-adventure";
    pub const SCIENCE_QUEST: &'static str = "science-quest";
    pub const ENGLISH_FUN: &'static str = "english-fun";

    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Title-cased name built from the slug: `math-adventure` -> `Math Adventure`.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.0
            .split('-')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<&str> for CourseId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identifier of an entry in the fixed badge catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeId {
    MathStar,
    ScienceExplorer,
    EnglishChampion,
    StreakMaster,
    QuizMaster,
}

impl BadgeId {
    /// Catalog order.
    pub const ALL: [BadgeId; 5] = [
        BadgeId::MathStar,
        BadgeId::ScienceExplorer,
        BadgeId::EnglishChampion,
        BadgeId::StreakMaster,
        BadgeId::QuizMaster,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeId::MathStar => "math-star",
            BadgeId::ScienceExplorer => "science-explorer",
            BadgeId::EnglishChampion => "english-champion",
            BadgeId::StreakMaster => "streak-master",
            BadgeId::QuizMaster => "quiz-master",
        }
    }
}

/// Identifier of a mini-game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameId {
    Matching,
    Memory,
    WordPuzzle,
}

impl GameId {
    pub const ALL: [GameId; 3] = [GameId::Matching, GameId::Memory, GameId::WordPuzzle];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GameId::Matching => "matching",
            GameId::Memory => "memory",
            GameId::WordPuzzle => "word-puzzle",
        }
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Debug for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CourseId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing an id from a string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to parse {kind} from {raw:?}")]
pub struct ParseIdError {
    kind: &'static str,
    raw: String,
}

impl FromStr for UserId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(UserId::new).map_err(|_| ParseIdError {
            kind: "UserId",
            raw: s.to_string(),
        })
    }
}

/// Any non-blank slug. Unknown courses are valid ids; they fall through to
/// the language-arts question set.
impl FromStr for CourseId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slug = s.trim();
        if slug.is_empty() || slug.contains(char::is_whitespace) {
            return Err(ParseIdError {
                kind: "CourseId",
                raw: s.to_string(),
            });
        }
        Ok(CourseId::new(slug))
    }
}

impl FromStr for BadgeId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BadgeId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ParseIdError {
                kind: "BadgeId",
                raw: s.to_string(),
            })
    }
}

impl FromStr for GameId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ParseIdError {
                kind: "GameId",
                raw: s.to_string(),
            })
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_display_name_title_cases_slug() {
        assert_eq!(CourseId::new("math-adventure").display_name(), "Math Adventure");
        assert_eq!(CourseId::new("english-fun").display_name(), "English Fun");
        assert_eq!(CourseId::new("").display_name(), "");
    }

    #[test]
    fn badge_id_round_trips_through_str() {
        for id in BadgeId::ALL {
            assert_eq!(id.as_str().parse::<BadgeId>().unwrap(), id);
        }
        assert!("gold-star".parse::<BadgeId>().is_err());
    }

    #[test]
    fn course_id_from_str_rejects_blank_slugs() {
        assert_eq!(
            " science-quest ".parse::<CourseId>().unwrap(),
            CourseId::new(CourseId::SCIENCE_QUEST)
        );
        assert_eq!("art-lab".parse::<CourseId>().unwrap().as_str(), "art-lab");
        assert!("".parse::<CourseId>().is_err());
        assert!("math adventure".parse::<CourseId>().is_err());
    }

    #[test]
    fn game_id_from_str() {
        assert_eq!("word-puzzle".parse::<GameId>().unwrap(), GameId::WordPuzzle);
        assert!("chess".parse::<GameId>().is_err());
    }

    #[test]
    fn user_id_from_str_invalid() {
        let err = "abc".parse::<UserId>().unwrap_err();
        assert_eq!(err.to_string(), "failed to parse UserId from \"abc\"");
    }

    #[test]
    fn badge_id_serializes_kebab_case() {
        let json = serde_json::to_string(&BadgeId::QuizMaster).unwrap();
        assert_eq!(json, "\"quiz-master\"");
    }
}
