#![allow(dead_code)]
//! Dictionary of playable words
//!
//! Embeds a French wordlist (accents stripped) at build time.
//! Only words of 5 to 8 letters are kept, stored uppercase for O(1) lookup.

use super::{MAX_WORD_LENGTH, MIN_WORD_LENGTH};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Embedded wordlist, one word per line
static WORDS_DATA: &str = include_str!("../../data/words.txt");

/// Pre-built dictionary shared by every round
static EMBEDDED: Lazy<Dictionary> = Lazy::new(|| Dictionary::from_words(WORDS_DATA.lines()));

#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Build from any word source. Entries are trimmed and uppercased;
    /// anything that is not purely alphabetic or falls outside 5..=8 letters is dropped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .filter_map(|w| normalize(w.as_ref()))
            .collect();
        Self { words }
    }

    /// The wordlist compiled into the binary.
    pub fn embedded() -> &'static Dictionary {
        &EMBEDDED
    }

    /// Exact lookup of an uppercase word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn normalize(raw: &str) -> Option<String> {
    let word = raw.trim();
    let len = word.chars().count();
    if !(MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&len) {
        return None;
    }
    if !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(word.to_ascii_uppercase())
}
