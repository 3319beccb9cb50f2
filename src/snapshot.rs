use crate::engine::DeathReason;
use crate::grid::{Cell, GridSize};
use crate::input::Direction;
use crate::snake::Position;

/// Owned copy of engine state handed to presentation code.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    pub size: GridSize,
    /// Row-major cell contents.
    pub cells: Vec<Cell>,
    /// Body segments from head to tail.
    pub body: Vec<Position>,
    pub heading: Direction,
    pub score: u32,
    pub game_over: bool,
    pub death_reason: Option<DeathReason>,
}

impl Snapshot {
    /// Returns the cell at `position`, or `None` when it lies off the grid.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<Cell> {
        if !position.is_within_bounds(self.size) {
            return None;
        }

        let row = usize::try_from(position.row).ok()?;
        let col = usize::try_from(position.col).ok()?;
        self.cells
            .get(row * usize::from(self.size.cols) + col)
            .copied()
    }

    #[must_use]
    pub fn head(&self) -> Option<Position> {
        self.body.first().copied()
    }

    #[must_use]
    pub fn tail(&self) -> Option<Position> {
        self.body.last().copied()
    }
}
