//! Deterministic turn-based snake simulation.
//!
//! [`SimulationEngine`] owns the grid, the ordered snake body, heading, score
//! and game-over state. Callers steer with
//! [`change_direction`](SimulationEngine::change_direction), advance one tick
//! with [`step`](SimulationEngine::step), and read state back through
//! accessors or a [`Snapshot`]. The terminal frontend modules (`app`,
//! `renderer`, `ui`, `terminal_runtime`) are one such caller.

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod shared;
pub mod snake;
pub mod snapshot;
pub mod terminal_runtime;
pub mod ui;

pub use engine::{DeathReason, SimulationEngine, StepOutcome};
pub use error::EngineError;
pub use food::{FoodPlacer, RandomPlacer, ScriptedPlacer};
pub use grid::{Cell, Grid, GridSize};
pub use input::Direction;
pub use shared::SharedEngine;
pub use snake::Position;
pub use snapshot::Snapshot;
