use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Symbols used by the matching game.
pub const MATCHING_SYMBOLS: [&str; 8] = ["🍎", "🍌", "🍇", "🍊", "🍓", "🍉", "🥕", "🌽"];
/// Symbols used by the memory game.
pub const MEMORY_SYMBOLS: [&str; 8] = ["🐶", "🐱", "🐰", "🦊", "🐻", "🐼", "🐨", "🦁"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BoardError {
    #[error("layout must contain every symbol exactly twice")]
    InvalidLayout,
    #[error("tile {0} does not exist")]
    OutOfRange(usize),
    #[error("tile {0} is already matched")]
    AlreadyMatched(usize),
    #[error("tile {0} is already face up")]
    AlreadyRevealed(usize),
    #[error("two tiles are already face up")]
    Busy,
    #[error("the board is already solved")]
    Solved,
}

/// Each symbol twice, in order. Shuffle before building a board.
#[must_use]
pub fn doubled(symbols: &[&str]) -> Vec<String> {
    symbols
        .iter()
        .chain(symbols.iter())
        .map(|s| (*s).to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    symbol: String,
    revealed: bool,
    matched: bool,
}

impl Tile {
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn matched(&self) -> bool {
        self.matched
    }

    /// Face up either because it is selected or already matched.
    #[must_use]
    pub fn face_up(&self) -> bool {
        self.revealed || self.matched
    }
}

/// What a selection did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// First tile of a pair turned face up.
    Revealed(usize),
    /// Second tile matched the first.
    Matched(usize, usize),
    /// Second tile differs. Both stay up until [`PairBoard::hide_mismatch`].
    Mismatched(usize, usize),
}

/// Board shared by the matching and memory games.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairBoard {
    tiles: Vec<Tile>,
    pending: Vec<usize>,
    moves: u32,
    matches: usize,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl PairBoard {
    /// # Errors
    ///
    /// Returns `BoardError::InvalidLayout` if the layout is empty or some
    /// symbol does not appear exactly twice.
    pub fn new(layout: Vec<String>, started_at: DateTime<Utc>) -> Result<Self, BoardError> {
        if layout.is_empty() {
            return Err(BoardError::InvalidLayout);
        }
        for symbol in &layout {
            if layout.iter().filter(|s| *s == symbol).count() != 2 {
                return Err(BoardError::InvalidLayout);
            }
        }

        Ok(Self {
            tiles: layout
                .into_iter()
                .map(|symbol| Tile {
                    symbol,
                    revealed: false,
                    matched: false,
                })
                .collect(),
            pending: Vec::with_capacity(2),
            moves: 0,
            matches: 0,
            started_at,
            finished_at: None,
        })
    }

    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Pair comparisons made so far.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn matches(&self) -> usize {
        self.matches
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.tiles.len() / 2
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.matches == self.pair_count()
    }

    /// True while a mismatched pair waits to be turned back down.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.pending.len() >= 2
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Whole seconds from start until the win, or until `now` while playing.
    #[must_use]
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u64 {
        let end = self.finished_at.unwrap_or(now);
        u64::try_from(end.signed_duration_since(self.started_at).num_seconds()).unwrap_or(0)
    }

    /// Turn a tile face up. `at` stamps the win when this completes the board.
    ///
    /// # Errors
    ///
    /// Rejected selections leave the board unchanged.
    pub fn select(&mut self, index: usize, at: DateTime<Utc>) -> Result<Selection, BoardError> {
        if self.is_won() {
            return Err(BoardError::Solved);
        }
        if self.is_busy() {
            return Err(BoardError::Busy);
        }
        let tile = self.tiles.get(index).ok_or(BoardError::OutOfRange(index))?;
        if tile.matched {
            return Err(BoardError::AlreadyMatched(index));
        }
        if tile.revealed {
            return Err(BoardError::AlreadyRevealed(index));
        }

        self.tiles[index].revealed = true;
        self.pending.push(index);

        let &[first, second] = self.pending.as_slice() else {
            return Ok(Selection::Revealed(index));
        };

        self.moves += 1;
        if self.tiles[first].symbol != self.tiles[second].symbol {
            return Ok(Selection::Mismatched(first, second));
        }

        for i in [first, second] {
            self.tiles[i].matched = true;
            self.tiles[i].revealed = false;
        }
        self.pending.clear();
        self.matches += 1;
        if self.is_won() {
            self.finished_at = Some(at);
        }
        Ok(Selection::Matched(first, second))
    }

    /// Turns a pending mismatched pair face down. Returns false when nothing
    /// was pending.
    pub fn hide_mismatch(&mut self) -> bool {
        if !self.is_busy() {
            return false;
        }
        for i in self.pending.drain(..) {
            self.tiles[i].revealed = false;
        }
        true
    }
}
