//! RNG module - bag randomizer
//!
//! The bag holds the seven piece kinds. Drawing at cursor 0 reshuffles the bag in
//! place, so every window of seven draws that starts at a bag boundary contains each
//! kind exactly once.
//!
//! The shuffle walks indices `[1, 7)` only: slot 0 is never relocated by the shuffle
//! itself.
//!
//! Also provides a simple LCG so identical seeds yield identical games.

use crate::types::{PieceKind, TM_NUM};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Bag randomizer over the seven piece kinds
#[derive(Debug, Clone)]
pub struct Bag {
    /// Current permutation
    bag: [PieceKind; TM_NUM],
    /// Index of the next draw, always in `[0, 7)`
    cursor: usize,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl Bag {
    /// Create a new bag with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            bag: PieceKind::ALL,
            cursor: 0,
            rng: SimpleRng::new(seed),
        }
    }

    /// Shuffle slots `[1, 7)` in place (Fisher-Yates, high to low).
    fn shuffle(&mut self) {
        for i in (2..TM_NUM).rev() {
            let j = 1 + self.rng.next_range(i as u32) as usize;
            self.bag.swap(i, j);
        }
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        if self.cursor == 0 {
            self.shuffle();
        }

        let kind = self.bag[self.cursor];
        self.cursor = (self.cursor + 1) % TM_NUM;
        kind
    }

    /// Index of the next draw
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current permutation
    pub fn contents(&self) -> &[PieceKind; TM_NUM] {
        &self.bag
    }

    /// Get the current RNG state
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for Bag {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_bag_window_contains_every_kind_once() {
        let mut bag = Bag::new(987);

        for _ in 0..20 {
            assert_eq!(bag.cursor(), 0);
            let mut seen = [0u8; TM_NUM];
            for _ in 0..TM_NUM {
                seen[bag.draw().index()] += 1;
            }
            assert_eq!(seen, [1; TM_NUM]);
        }
    }

    #[test]
    fn test_bag_cursor_wraps() {
        let mut bag = Bag::new(3);
        for expected in 1..TM_NUM {
            bag.draw();
            assert_eq!(bag.cursor(), expected);
        }
        bag.draw();
        assert_eq!(bag.cursor(), 0);
    }

    #[test]
    fn test_bag_no_reshuffle_mid_sequence() {
        let mut bag = Bag::new(42);
        let first = bag.draw();
        let snapshot = *bag.contents();
        assert_eq!(snapshot[0], first);

        for i in 1..TM_NUM {
            assert_eq!(bag.draw(), snapshot[i]);
            assert_eq!(bag.contents(), &snapshot);
        }
    }

    #[test]
    fn test_bag_slot_zero_is_not_shuffled() {
        let mut bag = Bag::new(77);
        for _ in 0..10 {
            assert_eq!(bag.draw(), PieceKind::O);
            for _ in 1..TM_NUM {
                bag.draw();
            }
        }
    }

    #[test]
    fn test_bag_deterministic() {
        let mut a = Bag::new(555);
        let mut b = Bag::new(555);
        for _ in 0..50 {
            assert_eq!(a.draw(), b.draw());
        }
    }
}
