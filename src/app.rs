use std::time::{Duration, Instant};

use log::info;

use crate::config::{COUNTDOWN_SECONDS, DEATH_REVEAL_STEP_MS};
use crate::engine::{SimulationEngine, StepOutcome};
use crate::error::EngineError;
use crate::input::GameInput;

/// Frontend phase wrapped around one engine instance.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Seconds left before the first step.
    Countdown { remaining: u8 },
    Playing,
    /// Number of body segments already drawn as dead, counted from the head.
    DeathReveal { revealed: usize },
    GameOver,
}

/// Settings fixed for every round of a session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct AppSettings {
    pub rows: u16,
    pub cols: u16,
    pub tick_interval: Duration,
    /// Seed for the first round; later rounds offset it by the round number.
    pub seed: Option<u64>,
}

/// Drives the engine on a wall-clock cadence and handles restarts.
#[derive(Debug)]
pub struct App {
    settings: AppSettings,
    engine: SimulationEngine,
    phase: Phase,
    phase_clock: Instant,
    round: u64,
    best_score: u32,
    should_quit: bool,
}

impl App {
    /// Creates the first round, starting its countdown at `now`.
    pub fn new(settings: AppSettings, now: Instant) -> Result<Self, EngineError> {
        let engine = build_engine(settings, 0)?;

        Ok(Self {
            settings,
            engine,
            phase: Phase::Countdown {
                remaining: COUNTDOWN_SECONDS,
            },
            phase_clock: now,
            round: 0,
            best_score: 0,
            should_quit: false,
        })
    }

    #[must_use]
    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Best score seen during this session. Not persisted.
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    #[must_use]
    pub fn round(&self) -> u64 {
        self.round
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Applies one input event.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) -> Result<(), EngineError> {
        match input {
            GameInput::Quit => self.should_quit = true,
            GameInput::Direction(direction) => {
                if matches!(self.phase, Phase::Countdown { .. } | Phase::Playing) {
                    self.engine.change_direction(direction);
                }
            }
            GameInput::Confirm => {
                if self.phase == Phase::GameOver {
                    self.restart(now)?;
                }
            }
        }

        Ok(())
    }

    /// Advances timers; steps the engine at most once per call.
    pub fn update(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.phase_clock);

        match self.phase {
            Phase::Countdown { remaining } => {
                if elapsed < Duration::from_secs(1) {
                    return;
                }
                self.phase_clock = now;
                self.phase = match remaining {
                    0 | 1 => Phase::Playing,
                    n => Phase::Countdown { remaining: n - 1 },
                };
            }
            Phase::Playing => {
                if elapsed < self.settings.tick_interval {
                    return;
                }
                self.phase_clock = now;
                if let StepOutcome::Died(_) = self.engine.step() {
                    self.best_score = self.best_score.max(self.engine.score());
                    self.phase = Phase::DeathReveal { revealed: 0 };
                }
            }
            Phase::DeathReveal { revealed } => {
                if elapsed < Duration::from_millis(DEATH_REVEAL_STEP_MS) {
                    return;
                }
                self.phase_clock = now;
                let revealed = revealed + 1;
                self.phase = if revealed >= self.engine.len() {
                    Phase::GameOver
                } else {
                    Phase::DeathReveal { revealed }
                };
            }
            Phase::GameOver => {}
        }
    }

    fn restart(&mut self, now: Instant) -> Result<(), EngineError> {
        let round = self.round + 1;
        self.engine = build_engine(self.settings, round)?;
        self.round = round;
        self.phase = Phase::Countdown {
            remaining: COUNTDOWN_SECONDS,
        };
        self.phase_clock = now;
        info!("starting round {round}");
        Ok(())
    }
}

fn build_engine(settings: AppSettings, round: u64) -> Result<SimulationEngine, EngineError> {
    match settings.seed {
        Some(seed) => {
            SimulationEngine::new_with_seed(settings.rows, settings.cols, seed.wrapping_add(round))
        }
        None => SimulationEngine::new(settings.rows, settings.cols),
    }
}
