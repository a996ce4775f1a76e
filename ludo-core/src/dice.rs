//! Dice sources
//!
//! The session draws every roll through [`Dice`], so games can be replayed
//! from a seed or driven by a fixed script.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Lowest face
pub const MIN_FACE: u8 = 1;

/// Highest face
pub const MAX_FACE: u8 = 6;

/// A six-sided die
pub trait Dice {
    /// Next face, expected in `[1, 6]`
    fn roll(&mut self) -> u8;
}

/// Fair die backed by a ChaCha8 stream
#[derive(Clone, Debug)]
pub struct RandomDice {
    rng: ChaCha8Rng,
}

impl RandomDice {
    pub fn from_entropy() -> Self {
        Self { rng: ChaCha8Rng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Seeded when a seed is given, entropy otherwise
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }
}

impl Default for RandomDice {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Dice for RandomDice {
    fn roll(&mut self) -> u8 {
        self.rng.gen_range(MIN_FACE..=MAX_FACE)
    }
}

/// Replays a scripted sequence of faces.
///
/// Once the script runs out it cycles 1..=6 so a session never stalls.
#[derive(Clone, Debug, Default)]
pub struct LoadedDice {
    script: VecDeque<u8>,
    fallback: u8,
}

impl LoadedDice {
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        Self {
            script: faces.into_iter().collect(),
            fallback: 0,
        }
    }

    /// Append more faces to the script
    #[cfg(test)]
    pub(crate) fn push(&mut self, face: u8) {
        self.script.push_back(face);
    }

    #[cfg(test)]
    pub(crate) fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Dice for LoadedDice {
    fn roll(&mut self) -> u8 {
        if let Some(face) = self.script.pop_front() {
            return face;
        }
        self.fallback = self.fallback % MAX_FACE + 1;
        self.fallback
    }
}

impl<D: Dice + ?Sized> Dice for Box<D> {
    fn roll(&mut self) -> u8 {
        (**self).roll()
    }
}
