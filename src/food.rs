use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::snake::Position;

/// Chooses where the next food item goes.
///
/// This is the only source of randomness in the simulation. The engine hands
/// over every currently empty cell in row-major order (never an empty slice)
/// and places food at the returned index. Returning `None` or an out-of-range
/// index leaves the board without food.
pub trait FoodPlacer {
    fn choose(&mut self, empty: &[Position]) -> Option<usize>;
}

/// Uniform random placement backed by any [`Rng`].
#[derive(Debug, Clone)]
pub struct RandomPlacer<R = StdRng> {
    rng: R,
}

impl RandomPlacer<StdRng> {
    /// Creates a reproducible placer for tests and seeded sessions.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Creates a placer seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomPlacer<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> FoodPlacer for RandomPlacer<R> {
    fn choose(&mut self, empty: &[Position]) -> Option<usize> {
        if empty.is_empty() {
            return None;
        }

        Some(self.rng.gen_range(0..empty.len()))
    }
}

/// Deterministic placer that follows a script of preferred positions.
///
/// Each placement consumes one scripted position and uses it when that cell is
/// empty. Otherwise, and once the script runs out, the first empty cell is
/// chosen.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPlacer {
    script: VecDeque<Position>,
}

impl ScriptedPlacer {
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = Position>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Appends a preferred position to the end of the script.
    pub fn push(&mut self, position: Position) {
        self.script.push_back(position);
    }

    /// Scripted positions not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl FoodPlacer for ScriptedPlacer {
    fn choose(&mut self, empty: &[Position]) -> Option<usize> {
        if empty.is_empty() {
            return None;
        }

        let preferred = self
            .script
            .pop_front()
            .and_then(|wanted| empty.iter().position(|candidate| *candidate == wanted));

        Some(preferred.unwrap_or(0))
    }
}

impl<P: FoodPlacer + ?Sized> FoodPlacer for Box<P> {
    fn choose(&mut self, empty: &[Position]) -> Option<usize> {
        (**self).choose(empty)
    }
}
