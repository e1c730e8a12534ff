//! Fixed question tables, selected per course and age bracket.

use serde::Serialize;

use crate::model::{CourseId, Question};

/// Number of questions in every set.
pub const QUESTIONS_PER_SET: usize = 5;

/// Coarse age split used for math difficulty only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgeBracket {
    /// Eight and under.
    Beginner,
    /// Over eight.
    Intermediate,
}

impl AgeBracket {
    #[must_use]
    pub fn from_age(age: u8) -> Self {
        if age <= 8 {
            AgeBracket::Beginner
        } else {
            AgeBracket::Intermediate
        }
    }
}

/// The four literal question tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuestionSet {
    BeginnerMath,
    IntermediateMath,
    Science,
    LanguageArts,
}

type Row = (&'static str, [&'static str; 4], usize);

const BEGINNER_MATH: [Row; QUESTIONS_PER_SET] = [
    ("🍎 2 + 3 = ?", ["3", "4", "5", "6"], 2),
    ("🌟 5 - 2 = ?", ["2", "3", "4", "5"], 1),
    ("🎈 4 + 4 = ?", ["6", "7", "8", "9"], 2),
    ("🐶 10 - 5 = ?", ["3", "4", "5", "6"], 2),
    ("🍕 3 + 6 = ?", ["7", "8", "9", "10"], 2),
];

const INTERMEDIATE_MATH: [Row; QUESTIONS_PER_SET] = [
    ("🎯 12 × 5 = ?", ["50", "55", "60", "65"], 2),
    ("📐 What is 25% of 80?", ["15", "20", "25", "30"], 1),
    ("🔢 15 + 27 = ?", ["40", "41", "42", "43"], 2),
    ("➗ 144 ÷ 12 = ?", ["10", "11", "12", "13"], 2),
    ("🧮 3² + 4² = ?", ["20", "23", "25", "27"], 2),
];

const SCIENCE: [Row; QUESTIONS_PER_SET] = [
    (
        "🌍 What do plants need to grow?",
        ["Water", "Sunlight", "Soil", "All of these"],
        3,
    ),
    ("🔬 What is H2O?", ["Oxygen", "Water", "Hydrogen", "Carbon"], 1),
    (
        "🌙 Which planet is closest to the Sun?",
        ["Venus", "Earth", "Mercury", "Mars"],
        2,
    ),
    (
        "⚡ What makes lightning?",
        ["Rain", "Wind", "Electricity", "Clouds"],
        2,
    ),
    (
        "🦴 How many bones are in the human body?",
        ["106", "206", "306", "406"],
        1,
    ),
];

const LANGUAGE_ARTS: [Row; QUESTIONS_PER_SET] = [
    (
        "📖 What is a noun?",
        [
            "Action word",
            "Person/place/thing",
            "Describing word",
            "Connecting word",
        ],
        1,
    ),
    (
        "✍️ Which is correct?",
        ["I are happy", "I am happy", "I is happy", "I be happy"],
        1,
    ),
    (
        "🔤 What is a verb?",
        ["Action word", "Naming word", "Describing word", "Joining word"],
        0,
    ),
    (
        "📝 What is an adjective?",
        ["Action word", "Naming word", "Describing word", "Joining word"],
        2,
    ),
    (
        "📚 Which word is a synonym of \"happy\"?",
        ["Sad", "Joyful", "Angry", "Tired"],
        1,
    ),
];

impl QuestionSet {
    /// Picks the set for a course. Math splits on age; science is fixed;
    /// every other course id gets language arts.
    #[must_use]
    pub fn select(course_id: &CourseId, age_hint: u8) -> Self {
        match course_id.as_str() {
            CourseId::MATH_ADVENTURE => match AgeBracket::from_age(age_hint) {
                AgeBracket::Beginner => QuestionSet::BeginnerMath,
                AgeBracket::Intermediate => QuestionSet::IntermediateMath,
            },
            CourseId::SCIENCE_QUEST => QuestionSet::Science,
            _ => QuestionSet::LanguageArts,
        }
    }

    fn rows(self) -> &'static [Row; QUESTIONS_PER_SET] {
        match self {
            QuestionSet::BeginnerMath => &BEGINNER_MATH,
            QuestionSet::IntermediateMath => &INTERMEDIATE_MATH,
            QuestionSet::Science => &SCIENCE,
            QuestionSet::LanguageArts => &LANGUAGE_ARTS,
        }
    }

    /// Questions in their fixed order.
    #[must_use]
    pub fn questions(self) -> Vec<Question> {
        self.rows()
            .iter()
            .map(|(prompt, options, correct)| Question::from_table(prompt, *options, *correct))
            .collect()
    }
}

/// Shorthand for `QuestionSet::select(..).questions()`.
#[must_use]
pub fn questions_for(course_id: &CourseId, age_hint: u8) -> Vec<Question> {
    QuestionSet::select(course_id, age_hint).questions()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SETS: [QuestionSet; 4] = [
        QuestionSet::BeginnerMath,
        QuestionSet::IntermediateMath,
        QuestionSet::Science,
        QuestionSet::LanguageArts,
    ];

    #[test]
    fn math_splits_on_age_eight() {
        let math = CourseId::new("math-adventure");
        assert_eq!(QuestionSet::select(&math, 5), QuestionSet::BeginnerMath);
        assert_eq!(QuestionSet::select(&math, 8), QuestionSet::BeginnerMath);
        assert_eq!(QuestionSet::select(&math, 9), QuestionSet::IntermediateMath);
    }

    #[test]
    fn science_ignores_age() {
        let science = CourseId::new("science-quest");
        assert_eq!(QuestionSet::select(&science, 4), QuestionSet::Science);
        assert_eq!(QuestionSet::select(&science, 12), QuestionSet::Science);
    }

    #[test]
    fn unknown_courses_fall_back_to_language_arts() {
        assert_eq!(
            QuestionSet::select(&CourseId::new("english-fun"), 8),
            QuestionSet::LanguageArts
        );
        assert_eq!(
            QuestionSet::select(&CourseId::new("no-such-course"), 11),
            QuestionSet::LanguageArts
        );
    }

    #[test]
    fn every_set_has_five_valid_questions() {
        for set in ALL_SETS {
            let questions = set.questions();
            assert_eq!(questions.len(), QUESTIONS_PER_SET);
            for q in &questions {
                assert!(q.correct_index() < 4);
                assert!(!q.prompt().is_empty());
            }
        }
    }

    #[test]
    fn beginner_answer_key_is_fixed() {
        let keys: Vec<_> = QuestionSet::BeginnerMath
            .questions()
            .iter()
            .map(Question::correct_index)
            .collect();
        assert_eq!(keys, vec![2, 1, 2, 2, 2]);
    }
}
