#![allow(dead_code)]
//! The 8x8 letter board
//!
//! Cells are stored flat and addressed by `index = row * 8 + col`.

use super::error::GameError;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::BTreeSet;
use std::fmt;

/// Rows (and columns) on the board
pub const SIZE: usize = 8;

/// Total cells on the board
pub const CELL_COUNT: usize = SIZE * SIZE;

/// A board coordinate. Always inside the board once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Result<Self, GameError> {
        if row >= SIZE || col >= SIZE {
            return Err(GameError::InvalidPosition { row, col });
        }
        Ok(Self { row, col })
    }

    pub fn from_index(index: usize) -> Result<Self, GameError> {
        if index >= CELL_COUNT {
            return Err(GameError::InvalidIndex(index));
        }
        Ok(Self {
            row: index / SIZE,
            col: index % SIZE,
        })
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn index(&self) -> usize {
        self.row * SIZE + self.col
    }

    /// Orthogonal neighbors in fixed order: up, down, left, right.
    /// Cells past the board edge are skipped.
    pub fn neighbors(&self) -> impl Iterator<Item = Position> {
        let (row, col) = (self.row, self.col);
        [
            row.checked_sub(1).map(|r| (r, col)),
            (row + 1 < SIZE).then_some((row + 1, col)),
            col.checked_sub(1).map(|c| (row, c)),
            (col + 1 < SIZE).then_some((row, col + 1)),
        ]
        .into_iter()
        .flatten()
        .map(|(row, col)| Position { row, col })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Board occupancy: each cell is empty or holds one letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [Option<char>; CELL_COUNT],
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }
}

impl Grid {
    /// An empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from row strings, `_` or `.` marking empty cells.
    /// Missing rows and columns stay empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut grid = Self::new();
        for (row, line) in rows.iter().take(SIZE).enumerate() {
            for (col, c) in line.chars().take(SIZE).enumerate() {
                if c.is_ascii_alphabetic() {
                    grid.cells[row * SIZE + col] = Some(c.to_ascii_uppercase());
                }
            }
        }
        grid
    }

    /// Panics if `index` is off the board.
    pub fn get(&self, index: usize) -> Option<char> {
        self.cells[index]
    }

    /// Panics if `index` is off the board.
    pub fn set(&mut self, index: usize, value: Option<char>) {
        self.cells[index] = value;
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        self.cells[index].is_none()
    }

    pub fn occupied_indices(&self) -> BTreeSet<usize> {
        (0..CELL_COUNT).filter(|i| self.cells[*i].is_some()).collect()
    }

    pub fn empty_indices(&self) -> Vec<usize> {
        (0..CELL_COUNT).filter(|i| self.cells[*i].is_none()).collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn letter_count(&self) -> usize {
        CELL_COUNT - self.empty_count()
    }

    pub fn row(&self, row: usize) -> [Option<char>; SIZE] {
        let mut line = [None; SIZE];
        line.copy_from_slice(&self.cells[row * SIZE..(row + 1) * SIZE]);
        line
    }

    pub fn column(&self, col: usize) -> [Option<char>; SIZE] {
        let mut line = [None; SIZE];
        for (row, cell) in line.iter_mut().enumerate() {
            *cell = self.cells[row * SIZE + col];
        }
        line
    }

    /// Exchange the contents of two cells.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.cells.swap(a, b);
    }

    /// Empty every listed cell. Returns how many letters were removed.
    pub fn clear_indices(&mut self, indices: &BTreeSet<usize>) -> usize {
        indices
            .iter()
            .filter_map(|i| self.cells[*i].take())
            .count()
    }

    /// Put each letter on a distinct, uniformly chosen empty cell.
    /// Returns the filled indices in the order of `letters`.
    ///
    /// Panics if there are fewer empty cells than letters.
    pub fn place_random<R: Rng + ?Sized>(&mut self, letters: &[char], rng: &mut R) -> Vec<usize> {
        let empty = self.empty_indices();
        assert!(
            letters.len() <= empty.len(),
            "{} letters do not fit in {} empty cells",
            letters.len(),
            empty.len()
        );

        let targets: Vec<usize> = empty.choose_multiple(rng, letters.len()).copied().collect();
        for (index, letter) in targets.iter().zip(letters) {
            self.cells[*index] = Some(*letter);
        }
        targets
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            let line: String = self.row(row).iter().map(|c| c.unwrap_or('.')).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
