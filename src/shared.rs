use std::sync::{Arc, Mutex, MutexGuard};

use crate::engine::{SimulationEngine, StepOutcome};
use crate::food::{FoodPlacer, RandomPlacer};
use crate::input::Direction;
use crate::snapshot::Snapshot;

/// Cloneable handle to one engine shared between threads.
///
/// Every call takes the same lock for its whole duration, so an input thread
/// steering the snake and a timer thread stepping it never interleave.
#[derive(Debug)]
pub struct SharedEngine<P = RandomPlacer> {
    inner: Arc<Mutex<SimulationEngine<P>>>,
}

impl<P> Clone for SharedEngine<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: FoodPlacer> SharedEngine<P> {
    #[must_use]
    pub fn new(engine: SimulationEngine<P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn change_direction(&self, direction: Direction) {
        self.lock().change_direction(direction);
    }

    pub fn step(&self) -> StepOutcome {
        self.lock().step()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.lock().is_game_over()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.lock().score()
    }

    /// Runs `f` with exclusive access to the engine.
    pub fn with<T>(&self, f: impl FnOnce(&mut SimulationEngine<P>) -> T) -> T {
        f(&mut self.lock())
    }

    // Engine methods never panic halfway through a mutation, so a poisoned
    // lock still guards a consistent engine.
    fn lock(&self) -> MutexGuard<'_, SimulationEngine<P>> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
