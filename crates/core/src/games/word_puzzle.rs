use serde::Serialize;
use thiserror::Error;

/// Rounds in one game.
pub const TOTAL_ROUNDS: u32 = 5;
/// Points for a solved word.
pub const POINTS: u32 = 100;
/// Points for a solved word after the hint was shown.
pub const HINT_POINTS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Puzzle {
    pub word: &'static str,
    pub hint: &'static str,
    pub category: &'static str,
}

pub const PUZZLES: [Puzzle; 8] = [
    Puzzle { word: "APPLE", hint: "A red or green fruit", category: "🍎 Fruits" },
    Puzzle { word: "TIGER", hint: "A big striped cat", category: "🐯 Animals" },
    Puzzle { word: "OCEAN", hint: "A large body of water", category: "🌊 Nature" },
    Puzzle { word: "PIANO", hint: "A musical instrument with keys", category: "🎹 Music" },
    Puzzle { word: "ROBOT", hint: "A machine that can do tasks", category: "🤖 Technology" },
    Puzzle { word: "BEACH", hint: "Sandy place by the sea", category: "🏖️ Places" },
    Puzzle { word: "CLOUD", hint: "White fluffy thing in the sky", category: "☁️ Nature" },
    Puzzle { word: "MAGIC", hint: "Something mysterious and wonderful", category: "✨ Fantasy" },
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PuzzleError {
    #[error("scrambled letters do not spell a permutation of the word")]
    NotAPermutation,
    #[error("letter tile {0} does not exist")]
    TileOutOfRange(usize),
    #[error("letter tile {0} is already used")]
    TileUsed(usize),
    #[error("answer slot {0} is empty")]
    SlotEmpty(usize),
    #[error("this word has already been checked")]
    RoundResolved,
    #[error("this word has not been checked yet")]
    RoundUnresolved,
    #[error("the game is over")]
    GameComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LetterTile {
    pub letter: char,
    pub used: bool,
}

/// One word to unscramble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleRound {
    puzzle: Puzzle,
    tiles: Vec<LetterTile>,
    // Tile index behind each answer slot.
    answer: Vec<usize>,
    hint_shown: bool,
    verdict: Option<bool>,
}

impl PuzzleRound {
    /// # Errors
    ///
    /// Returns `PuzzleError::NotAPermutation` if `scrambled` does not use
    /// exactly the letters of the word.
    pub fn new(puzzle: Puzzle, scrambled: Vec<char>) -> Result<Self, PuzzleError> {
        let mut expected: Vec<char> = puzzle.word.chars().collect();
        let mut given = scrambled.clone();
        expected.sort_unstable();
        given.sort_unstable();
        if expected != given {
            return Err(PuzzleError::NotAPermutation);
        }

        Ok(Self {
            puzzle,
            tiles: scrambled
                .into_iter()
                .map(|letter| LetterTile { letter, used: false })
                .collect(),
            answer: Vec::new(),
            hint_shown: false,
            verdict: None,
        })
    }

    #[must_use]
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    #[must_use]
    pub fn tiles(&self) -> &[LetterTile] {
        &self.tiles
    }

    #[must_use]
    pub fn answer(&self) -> String {
        self.answer.iter().map(|i| self.tiles[*i].letter).collect()
    }

    #[must_use]
    pub fn hint_shown(&self) -> bool {
        self.hint_shown
    }

    /// `Some(true)` once solved, `Some(false)` once a full wrong answer was checked.
    #[must_use]
    pub fn verdict(&self) -> Option<bool> {
        self.verdict
    }

    /// Reveals the hint and returns it. Halves the reward for this word.
    pub fn show_hint(&mut self) -> &'static str {
        self.hint_shown = true;
        self.puzzle.hint
    }

    /// Moves a tile into the next answer slot. When the answer is full it is
    /// checked and the verdict returned.
    ///
    /// # Errors
    ///
    /// Rejected picks leave the round unchanged.
    pub fn pick_letter(&mut self, tile: usize) -> Result<Option<bool>, PuzzleError> {
        if self.verdict.is_some() {
            return Err(PuzzleError::RoundResolved);
        }
        let slot = self
            .tiles
            .get_mut(tile)
            .ok_or(PuzzleError::TileOutOfRange(tile))?;
        if slot.used {
            return Err(PuzzleError::TileUsed(tile));
        }
        slot.used = true;
        self.answer.push(tile);

        if self.answer.len() == self.tiles.len() {
            let correct = self.answer() == self.puzzle.word;
            self.verdict = Some(correct);
        }
        Ok(self.verdict)
    }

    /// Takes the letter in answer slot `position` back to its tile.
    ///
    /// # Errors
    ///
    /// Returns `PuzzleError::SlotEmpty` for an unfilled slot and
    /// `PuzzleError::RoundResolved` after the word was checked.
    pub fn remove_answer_letter(&mut self, position: usize) -> Result<(), PuzzleError> {
        if self.verdict.is_some() {
            return Err(PuzzleError::RoundResolved);
        }
        if position >= self.answer.len() {
            return Err(PuzzleError::SlotEmpty(position));
        }
        let tile = self.answer.remove(position);
        self.tiles[tile].used = false;
        Ok(())
    }

    fn points(&self) -> u32 {
        match self.verdict {
            Some(true) if self.hint_shown => HINT_POINTS,
            Some(true) => POINTS,
            _ => 0,
        }
    }
}

/// What [`WordPuzzle::next_round`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundAdvance {
    Next(u32),
    Complete { score: u32 },
}

/// Five rounds of word unscrambling with a running score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPuzzle {
    round: u32,
    score: u32,
    current: PuzzleRound,
    complete: bool,
}

impl WordPuzzle {
    #[must_use]
    pub fn new(first: PuzzleRound) -> Self {
        Self {
            round: 1,
            score: 0,
            current: first,
            complete: false,
        }
    }

    /// One-based round number.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn current(&self) -> &PuzzleRound {
        &self.current
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Stars for the final score: 400+ earns three, 250+ two, otherwise one.
    #[must_use]
    pub fn stars(&self) -> u8 {
        match self.score {
            s if s >= 400 => 3,
            s if s >= 250 => 2,
            _ => 1,
        }
    }

    pub fn show_hint(&mut self) -> &'static str {
        self.current.show_hint()
    }

    /// # Errors
    ///
    /// See [`PuzzleRound::pick_letter`]; also `PuzzleError::GameComplete`.
    pub fn pick_letter(&mut self, tile: usize) -> Result<Option<bool>, PuzzleError> {
        if self.complete {
            return Err(PuzzleError::GameComplete);
        }
        let verdict = self.current.pick_letter(tile)?;
        if verdict.is_some() {
            self.score += self.current.points();
        }
        Ok(verdict)
    }

    /// # Errors
    ///
    /// See [`PuzzleRound::remove_answer_letter`]; also `PuzzleError::GameComplete`.
    pub fn remove_answer_letter(&mut self, position: usize) -> Result<(), PuzzleError> {
        if self.complete {
            return Err(PuzzleError::GameComplete);
        }
        self.current.remove_answer_letter(position)
    }

    /// Moves past a checked word. `next` is only called when another round follows.
    ///
    /// # Errors
    ///
    /// Returns `PuzzleError::RoundUnresolved` before the current word is checked.
    pub fn next_round(
        &mut self,
        next: impl FnOnce() -> PuzzleRound,
    ) -> Result<RoundAdvance, PuzzleError> {
        if self.complete {
            return Err(PuzzleError::GameComplete);
        }
        if self.current.verdict().is_none() {
            return Err(PuzzleError::RoundUnresolved);
        }
        if self.round >= TOTAL_ROUNDS {
            self.complete = true;
            return Ok(RoundAdvance::Complete { score: self.score });
        }
        self.round += 1;
        self.current = next();
        Ok(RoundAdvance::Next(self.round))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(word_index: usize) -> PuzzleRound {
        let puzzle = PUZZLES[word_index];
        let mut letters: Vec<char> = puzzle.word.chars().collect();
        letters.reverse();
        PuzzleRound::new(puzzle, letters).unwrap()
    }

    fn solve(game: &mut WordPuzzle) -> Option<bool> {
        let word: Vec<char> = game.current().puzzle().word.chars().collect();
        let mut verdict = None;
        for letter in word {
            let tile = game
                .current()
                .tiles()
                .iter()
                .position(|t| t.letter == letter && !t.used)
                .unwrap();
            verdict = game.pick_letter(tile).unwrap();
        }
        verdict
    }

    #[test]
    fn scramble_must_use_the_word_letters() {
        let err = PuzzleRound::new(PUZZLES[0], vec!['A', 'P', 'P', 'L', 'X']).unwrap_err();
        assert_eq!(err, PuzzleError::NotAPermutation);
    }

    #[test]
    fn correct_answer_scores_full_points() {
        let mut game = WordPuzzle::new(round(1));
        assert_eq!(solve(&mut game), Some(true));
        assert_eq!(game.score(), POINTS);
        assert_eq!(game.pick_letter(0).unwrap_err(), PuzzleError::RoundResolved);
    }

    #[test]
    fn hint_halves_points() {
        let mut game = WordPuzzle::new(round(2));
        assert_eq!(game.show_hint(), "A large body of water");
        solve(&mut game);
        assert_eq!(game.score(), HINT_POINTS);
    }

    #[test]
    fn wrong_answer_is_checked_when_full() {
        // TIGER reversed is REGIT; picking tiles in order spells REGIT.
        let mut game = WordPuzzle::new(round(1));
        let mut verdict = None;
        for tile in 0..5 {
            verdict = game.pick_letter(tile).unwrap();
        }
        assert_eq!(verdict, Some(false));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn removing_a_letter_frees_its_tile() {
        let mut r = round(0);
        r.pick_letter(4).unwrap();
        r.pick_letter(0).unwrap();
        assert_eq!(r.answer(), "AE");
        r.remove_answer_letter(0).unwrap();
        assert_eq!(r.answer(), "E");
        assert!(!r.tiles()[4].used);
        assert_eq!(r.remove_answer_letter(3).unwrap_err(), PuzzleError::SlotEmpty(3));
    }

    #[test]
    fn five_rounds_then_complete_with_stars() {
        let mut game = WordPuzzle::new(round(0));
        assert_eq!(
            game.next_round(|| round(1)).unwrap_err(),
            PuzzleError::RoundUnresolved
        );
        for n in 1..TOTAL_ROUNDS {
            solve(&mut game);
            assert_eq!(game.next_round(|| round(n as usize)).unwrap(), RoundAdvance::Next(n + 1));
        }
        solve(&mut game);
        assert_eq!(
            game.next_round(|| unreachable!()).unwrap(),
            RoundAdvance::Complete { score: 500 }
        );
        assert!(game.is_complete());
        assert_eq!(game.stars(), 3);
        assert_eq!(game.pick_letter(0).unwrap_err(), PuzzleError::GameComplete);
    }

    #[test]
    fn star_thresholds() {
        let mut game = WordPuzzle::new(round(0));
        game.score = 250;
        assert_eq!(game.stars(), 2);
        game.score = 249;
        assert_eq!(game.stars(), 1);
        game.score = 400;
        assert_eq!(game.stars(), 3);
    }
}
