//! Mini-game boards. Pure state: callers supply shuffled layouts and drive
//! the deferred steps (mismatch hiding, next round).

mod pairs;
mod word_puzzle;

pub use pairs::{BoardError, MATCHING_SYMBOLS, MEMORY_SYMBOLS, PairBoard, Selection, Tile, doubled};
pub use word_puzzle::{
    HINT_POINTS, LetterTile, POINTS, PUZZLES, Puzzle, PuzzleError, PuzzleRound, RoundAdvance,
    TOTAL_ROUNDS, WordPuzzle,
};
