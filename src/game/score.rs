//! Scoring: word values, round total and the running session total
//!
//! A word is worth the sum of its letter values. Winning a round banks the
//! round total into the session; losing a round wipes the session.

use super::scanner::ScanReport;
use super::{letter_value, Outcome};

/// Points for a word.
pub fn score_of(word: &str) -> u32 {
    word.chars().map(letter_value).sum()
}

/// A word removed from the board with its point value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundWord {
    pub word: String,
    pub points: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ScoreKeeper {
    round_total: u32,
    session_total: u32,
    /// Points from the most recent scan that found anything
    last_batch: u32,
    /// Words found this round, newest first
    found: Vec<FoundWord>,
    /// Whether this round's outcome was already applied to the session
    settled: bool,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset everything round-scoped. The session total is kept.
    pub fn start_round(&mut self) {
        self.round_total = 0;
        self.last_batch = 0;
        self.found.clear();
        self.settled = false;
    }

    /// Add every word in a scan to the round total. Returns the points added.
    pub fn record(&mut self, report: &ScanReport) -> u32 {
        let batch: Vec<FoundWord> = report
            .words()
            .map(|m| FoundWord {
                points: score_of(&m.word),
                word: m.word.clone(),
            })
            .collect();
        if batch.is_empty() {
            return 0;
        }

        let points: u32 = batch.iter().map(|w| w.points).sum();
        self.round_total += points;
        self.last_batch = points;
        // Newest first, keeping row-then-column order within the batch
        self.found.splice(0..0, batch);
        points
    }

    /// Apply the round outcome to the session total, once per round.
    pub fn settle(&mut self, outcome: Outcome) -> u32 {
        if !self.settled {
            self.settled = true;
            match outcome {
                Outcome::Won => self.session_total += self.round_total,
                Outcome::Lost => self.session_total = 0,
            }
        }
        self.session_total
    }

    pub fn round_total(&self) -> u32 {
        self.round_total
    }

    pub fn session_total(&self) -> u32 {
        self.session_total
    }

    pub fn last_batch(&self) -> u32 {
        self.last_batch
    }

    pub fn found_words(&self) -> &[FoundWord] {
        &self.found
    }
}
