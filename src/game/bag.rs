#![allow(dead_code)]
//! Letter bag: draw-without-replacement supply for one round
//!
//! Every copy of a letter is one slot in the bag, so a letter with more
//! copies left is proportionally more likely to come out.

use super::error::GameError;
use super::LETTER_TABLE;
use rand::distr::weighted::WeightedIndex;
use rand::prelude::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterBag {
    counts: BTreeMap<char, u32>,
}

impl LetterBag {
    /// A full bag built from the static letter table.
    pub fn standard() -> Self {
        Self::from_counts(
            &LETTER_TABLE
                .iter()
                .map(|(letter, count, _)| (*letter, *count))
                .collect::<Vec<_>>(),
        )
    }

    /// A bag holding exactly the given letter counts.
    pub fn from_counts(counts: &[(char, u32)]) -> Self {
        let mut map = BTreeMap::new();
        for (letter, count) in counts {
            *map.entry(letter.to_ascii_uppercase()).or_insert(0) += count;
        }
        Self { counts: map }
    }

    /// Total letters left.
    pub fn remaining(&self) -> usize {
        self.counts.values().map(|c| *c as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Copies of one letter left.
    pub fn count(&self, letter: char) -> u32 {
        self.counts
            .get(&letter.to_ascii_uppercase())
            .copied()
            .unwrap_or(0)
    }

    /// Remove `n` letters, each picked uniformly over the remaining slots.
    ///
    /// Fails without touching the bag when fewer than `n` letters are left.
    pub fn draw<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> Result<Vec<char>, GameError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(GameError::EmptyBag {
                requested: n,
                remaining,
            });
        }

        let mut drawn = Vec::with_capacity(n);
        for _ in 0..n {
            let letters: Vec<char> = self.counts.keys().copied().collect();
            let weights: Vec<u32> = self.counts.values().copied().collect();
            let dist = WeightedIndex::new(&weights).expect("bag has letters left");
            let letter = letters[dist.sample(rng)];
            if let Some(count) = self.counts.get_mut(&letter) {
                *count -= 1;
            }
            drawn.push(letter);
        }
        Ok(drawn)
    }

    /// Draw `min(n, remaining)` letters. Never fails; an empty bag yields nothing.
    pub fn draw_up_to<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> Vec<char> {
        let n = n.min(self.remaining());
        self.draw(n, rng).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_standard_bag_population() {
        let bag = LetterBag::standard();
        assert_eq!(bag.remaining(), 200);
        assert_eq!(bag.count('E'), 30);
        assert_eq!(bag.count('w'), 1);
    }

    #[test]
    fn test_draw_reduces_remaining() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut bag = LetterBag::standard();

        let letters = bag.draw(8, &mut rng).unwrap();
        assert_eq!(letters.len(), 8);
        assert_eq!(bag.remaining(), 192);

        let letters = bag.draw(3, &mut rng).unwrap();
        assert_eq!(letters.len(), 3);
        assert_eq!(bag.remaining(), 189);
    }

    #[test]
    fn test_draw_only_yields_letters_in_stock() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut bag = LetterBag::from_counts(&[('Q', 1), ('Z', 2)]);

        let mut letters = bag.draw(3, &mut rng).unwrap();
        letters.sort();
        assert_eq!(letters, vec!['Q', 'Z', 'Z']);
        assert!(bag.is_empty());
    }

    #[test]
    fn test_single_letter_bag_exhausts() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut bag = LetterBag::from_counts(&[('A', 2)]);

        assert_eq!(bag.draw(2, &mut rng).unwrap(), vec!['A', 'A']);
        assert_eq!(bag.remaining(), 0);
        assert_eq!(
            bag.draw(1, &mut rng),
            Err(GameError::EmptyBag {
                requested: 1,
                remaining: 0
            })
        );
        assert!(bag.draw_up_to(1, &mut rng).is_empty());
    }

    #[test]
    fn test_overdraw_leaves_bag_untouched() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut bag = LetterBag::from_counts(&[('A', 1), ('B', 1)]);

        assert!(bag.draw(3, &mut rng).is_err());
        assert_eq!(bag.remaining(), 2);

        let drawn = bag.draw_up_to(3, &mut rng);
        assert_eq!(drawn.len(), 2);
        assert!(bag.is_empty());
    }

    #[test]
    fn test_draw_favors_common_letters() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut common = 0;
        for _ in 0..200 {
            let mut bag = LetterBag::from_counts(&[('E', 90), ('X', 10)]);
            if bag.draw(1, &mut rng).unwrap() == vec!['E'] {
                common += 1;
            }
        }
        assert!(common > 140, "E drawn only {} times out of 200", common);
    }

    #[test]
    fn test_seeded_draws_are_deterministic() {
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);

        let mut bag1 = LetterBag::standard();
        let mut bag2 = LetterBag::standard();

        assert_eq!(
            bag1.draw(20, &mut rng1).unwrap(),
            bag2.draw(20, &mut rng2).unwrap()
        );
    }
}
