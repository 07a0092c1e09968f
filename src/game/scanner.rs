//! Word detection on the board
//!
//! Every row and column is read as an 8-symbol line, forwards and backwards.
//! Each line contributes at most one word: the longest dictionary hit, ties
//! going to the first one found. Empty cells break words.

use super::dictionary::Dictionary;
use super::grid::{Grid, SIZE};
use super::{MAX_WORD_LENGTH, MIN_WORD_LENGTH};
use std::collections::BTreeSet;

/// Stands in for an empty cell when a line is read as text
const GAP: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Row,
    Column,
}

/// A word found on one row or column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordMatch {
    /// The dictionary word, as spelled in reading direction
    pub word: String,
    /// Row or column number
    pub line: usize,
    /// First cell of the match along the line (left-most or top-most)
    pub start: usize,
    pub length: usize,
    pub orientation: Orientation,
}

impl WordMatch {
    /// Grid indices covered by the match, in line order.
    pub fn indices(&self) -> Vec<usize> {
        (0..self.length).map(|offset| self.cell_index(offset)).collect()
    }

    fn cell_index(&self, offset: usize) -> usize {
        match self.orientation {
            Orientation::Row => self.line * SIZE + self.start + offset,
            Orientation::Column => (self.start + offset) * SIZE + self.line,
        }
    }
}

/// Result of scanning the whole board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Every cell covered by a match, counted once
    pub removal: BTreeSet<usize>,
    /// Match per row, `None` where the row holds no word
    pub rows: [Option<WordMatch>; SIZE],
    /// Match per column, `None` where the column holds no word
    pub cols: [Option<WordMatch>; SIZE],
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.removal.is_empty()
    }

    /// Row matches first, then column matches, gaps skipped.
    pub fn words(&self) -> impl Iterator<Item = &WordMatch> {
        self.rows.iter().chain(self.cols.iter()).flatten()
    }
}

pub struct WordScanner<'a> {
    dictionary: &'a Dictionary,
}

impl<'a> WordScanner<'a> {
    pub fn new(dictionary: &'a Dictionary) -> Self {
        Self { dictionary }
    }

    /// Find the retained word on every row and column.
    pub fn scan(&self, grid: &Grid) -> ScanReport {
        let mut report = ScanReport::default();

        for line in 0..SIZE {
            report.rows[line] = self.scan_line(&grid.row(line)).map(|(word, start)| WordMatch {
                length: word.len(),
                word,
                line,
                start,
                orientation: Orientation::Row,
            });
            report.cols[line] = self.scan_line(&grid.column(line)).map(|(word, start)| WordMatch {
                length: word.len(),
                word,
                line,
                start,
                orientation: Orientation::Column,
            });
        }

        let covered: Vec<usize> = report.words().flat_map(WordMatch::indices).collect();
        report.removal.extend(covered);
        report
    }

    /// Longest word on one line and its start position along the line.
    fn scan_line(&self, cells: &[Option<char>; SIZE]) -> Option<(String, usize)> {
        let forward: String = cells
            .iter()
            .map(|c| c.filter(char::is_ascii_alphabetic).unwrap_or(GAP))
            .collect();
        let reversed: String = forward.chars().rev().collect();

        let mut best: Option<(String, usize)> = None;
        let mut keep = |word: &str, start: usize| {
            let longer = best
                .as_ref()
                .is_none_or(|(kept, _)| word.len() > kept.len());
            if longer {
                best = Some((word.to_string(), start));
            }
        };

        for (word, start) in self.hits(&forward) {
            keep(word, start);
        }

        for (word, _) in self.hits(&reversed) {
            // Locate the letters as they actually sit on the line
            let on_line: String = word.chars().rev().collect();
            if let Some(start) = forward.find(&on_line) {
                keep(word, start);
            }
        }

        best
    }

    /// Dictionary hits in `line`, starts ascending, longest first per start.
    /// Only the longest hit at each start is reported.
    fn hits<'l>(&self, line: &'l str) -> Vec<(&'l str, usize)> {
        let mut hits = Vec::new();
        for start in 0..=line.len().saturating_sub(MIN_WORD_LENGTH) {
            let longest_end = (start + MAX_WORD_LENGTH).min(line.len());
            for end in (start + MIN_WORD_LENGTH..=longest_end).rev() {
                let candidate = &line[start..end];
                if candidate.contains(GAP) {
                    continue;
                }
                if self.dictionary.contains(candidate) {
                    hits.push((candidate, start));
                    break;
                }
            }
        }
        hits
    }
}
