//! Game logic: letter supply, board, swap paths, word detection, scoring

pub mod bag;
pub mod dictionary;
pub mod error;
pub mod grid;
pub mod path;
pub mod scanner;
pub mod score;

pub use bag::LetterBag;
pub use dictionary::Dictionary;
pub use error::GameError;
pub use grid::{Grid, Position, SIZE};
pub use path::PathFinder;
pub use scanner::WordScanner;
pub use score::{FoundWord, ScoreKeeper};

/// Letter supply for one round: (letter, copies in the bag, point value).
/// Frequent letters are cheap, rare letters are worth up to 9 points.
pub const LETTER_TABLE: [(char, u32, u32); 26] = [
    ('A', 23, 1),
    ('B', 4, 7),
    ('C', 7, 5),
    ('D', 5, 6),
    ('E', 30, 1),
    ('F', 3, 8),
    ('G', 4, 7),
    ('H', 3, 8),
    ('I', 16, 2),
    ('J', 1, 9),
    ('K', 1, 9),
    ('L', 9, 4),
    ('M', 5, 6),
    ('N', 10, 3),
    ('O', 11, 3),
    ('P', 5, 6),
    ('Q', 1, 9),
    ('R', 15, 2),
    ('S', 17, 2),
    ('T', 13, 3),
    ('U', 9, 4),
    ('V', 3, 8),
    ('W', 1, 9),
    ('X', 1, 9),
    ('Y', 1, 9),
    ('Z', 2, 9),
];

/// Shortest word that counts as a match
pub const MIN_WORD_LENGTH: usize = 5;

/// Longest word that counts as a match (a full row or column)
pub const MAX_WORD_LENGTH: usize = SIZE;

/// Point value of a letter. Symbols outside the table are worth nothing.
pub fn letter_value(letter: char) -> u32 {
    let upper = letter.to_ascii_uppercase();
    LETTER_TABLE
        .iter()
        .find(|(c, _, _)| *c == upper)
        .map(|(_, _, value)| *value)
        .unwrap_or(0)
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The bag ran dry
    Won,
    /// The board had no room left for a refill
    Lost,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Won => "won",
            Outcome::Lost => "lost",
        }
    }
}
