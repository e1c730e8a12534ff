//! Mini-game orchestration: shuffling, gating and deferred mismatch hiding.

use std::fmt;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::info;

use quest_core::catalog;
use quest_core::games::{
    MATCHING_SYMBOLS, MEMORY_SYMBOLS, PUZZLES, PairBoard, PuzzleRound, RoundAdvance, Selection,
    WordPuzzle, doubled,
};
use quest_core::model::GameId;
use quest_core::time::format_elapsed;

use crate::deferred::{Deferred, ViewGeneration};
use crate::error::GameError;
use crate::gating::is_game_locked;
use crate::progress::ProgressStore;
use crate::{Clock, Timings};

/// Outcome of a tile selection, plus the deferred hide for a mismatch.
#[derive(Debug)]
pub struct PairMove {
    pub selection: Selection,
    pub hide: Option<Deferred<()>>,
}

/// A running matching or memory game.
#[derive(Debug)]
pub struct PairGame {
    id: GameId,
    board: PairBoard,
    view: ViewGeneration,
    mismatch_delay: Duration,
}

impl PairGame {
    #[must_use]
    pub fn id(&self) -> GameId {
        self.id
    }

    #[must_use]
    pub fn board(&self) -> &PairBoard {
        &self.board
    }

    /// Elapsed play time as `m:ss`, frozen once the board is solved.
    #[must_use]
    pub fn elapsed_label(&self, clock: &Clock) -> String {
        format_elapsed(self.board.elapsed_secs(clock.now()))
    }

    /// Turns a mismatched pair back down once its deferred hide comes due.
    /// Stale hides from a dismissed or restarted board are ignored.
    pub fn apply_hide(&mut self, hide: Deferred<()>) -> bool {
        hide.take_if_current().is_some() && self.board.hide_mismatch()
    }

    /// Leaves the game; pending hides go stale.
    pub fn close(&self) {
        self.view.invalidate();
    }
}

/// Builds and drives mini-games. Owns the shuffle source.
pub struct GameService {
    clock: Clock,
    timings: Timings,
    rng: StdRng,
}

impl GameService {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            timings: Timings::default(),
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Deterministic shuffles for tests and replays.
    #[must_use]
    pub fn with_seed(clock: Clock, seed: u64) -> Self {
        Self {
            clock,
            timings: Timings::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Fails with `GameError::Locked` while the game's course is unpassed.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Locked` for a locked game.
    pub fn ensure_unlocked(&self, id: GameId, progress: &ProgressStore) -> Result<(), GameError> {
        if is_game_locked(&catalog::game(id), progress) {
            return Err(GameError::Locked(id));
        }
        Ok(())
    }

    /// Deal a fresh shuffled board. Also used for "play again". Mismatch
    /// hides are scheduled on `view`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NotAPairGame` for the word puzzle.
    pub fn new_pair_game(
        &mut self,
        id: GameId,
        view: ViewGeneration,
    ) -> Result<PairGame, GameError> {
        let (symbols, mismatch_delay) = match id {
            GameId::Matching => (&MATCHING_SYMBOLS, self.timings.matching_mismatch),
            GameId::Memory => (&MEMORY_SYMBOLS, self.timings.memory_mismatch),
            GameId::WordPuzzle => return Err(GameError::NotAPairGame(id)),
        };
        let mut layout = doubled(symbols);
        layout.shuffle(&mut self.rng);
        let board = PairBoard::new(layout, self.clock.now())?;
        info!(game = %id, pairs = board.pair_count(), "pair game dealt");

        Ok(PairGame {
            id,
            board,
            view,
            mismatch_delay,
        })
    }

    /// Select a tile. A mismatch comes back with the hide to schedule.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Board` for rejected selections.
    pub fn select_tile(&self, game: &mut PairGame, index: usize) -> Result<PairMove, GameError> {
        let selection = game.board.select(index, self.clock.now())?;
        let hide = match selection {
            Selection::Mismatched(..) => Some(Deferred::new(
                game.view.ticket(),
                game.mismatch_delay,
                (),
            )),
            Selection::Revealed(_) | Selection::Matched(..) => None,
        };
        if game.board.is_won() {
            info!(game = %game.id, moves = game.board.moves(), "pair game won");
        }
        Ok(PairMove { selection, hide })
    }

    fn random_round(&mut self) -> Result<PuzzleRound, GameError> {
        let puzzle = PUZZLES[self.rng.random_range(0..PUZZLES.len())];
        let mut letters: Vec<char> = puzzle.word.chars().collect();
        letters.shuffle(&mut self.rng);
        Ok(PuzzleRound::new(puzzle, letters)?)
    }

    /// Start a word puzzle game on a random word.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Puzzle` if a round cannot be built.
    pub fn new_word_puzzle(&mut self) -> Result<WordPuzzle, GameError> {
        Ok(WordPuzzle::new(self.random_round()?))
    }

    /// Move past a checked word, drawing another random word if rounds remain.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Puzzle` when the word is unchecked or the game is over.
    pub fn next_word_round(&mut self, game: &mut WordPuzzle) -> Result<RoundAdvance, GameError> {
        let next = self.random_round()?;
        let advance = game.next_round(|| next)?;
        if let RoundAdvance::Complete { score } = advance {
            info!(score, stars = game.stars(), "word puzzle complete");
        }
        Ok(advance)
    }
}

impl fmt::Debug for GameService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameService")
            .field("clock", &self.clock)
            .field("timings", &self.timings)
            .finish_non_exhaustive()
    }
}
