use crate::snake::Position;

/// Logical grid dimensions, fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub rows: u16,
    pub cols: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.rows) * usize::from(self.cols)
    }

    /// Iterates over every position in row-major order.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        let cols = i32::from(self.cols);
        (0..i32::from(self.rows)).flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }

    fn index_of(self, position: Position) -> Option<usize> {
        if !position.is_within_bounds(self) {
            return None;
        }

        let row = usize::try_from(position.row).ok()?;
        let col = usize::try_from(position.col).ok()?;
        Some(row * usize::from(self.cols) + col)
    }
}

/// Contents of one grid cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    SnakeBody,
    Food,
}

/// Row-major cell index over the board.
///
/// Snake cells here mirror the engine's body sequence; only the engine writes
/// to a grid, and it does so in lockstep with every body mutation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    size: GridSize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-empty grid.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size.total_cells()],
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Returns the cell at `position`, or `None` when it lies off the grid.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<Cell> {
        self.size.index_of(position).map(|index| self.cells[index])
    }

    /// Overwrites one cell. Off-grid writes are ignored.
    pub(crate) fn set(&mut self, position: Position, cell: Cell) {
        if let Some(index) = self.size.index_of(position) {
            self.cells[index] = cell;
        }
    }

    /// Row-major slice of all cells.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.size.cols))
    }

    /// Counts cells holding `kind`.
    #[must_use]
    pub fn count(&self, kind: Cell) -> usize {
        self.cells.iter().filter(|cell| **cell == kind).count()
    }

    /// Collects every empty position in row-major order.
    #[must_use]
    pub fn empty_positions(&self) -> Vec<Position> {
        self.size
            .positions()
            .zip(self.cells.iter())
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(position, _)| position)
            .collect()
    }

    /// Returns the first position holding food, if any.
    #[must_use]
    pub fn food_position(&self) -> Option<Position> {
        self.size
            .positions()
            .zip(self.cells.iter())
            .find(|(_, cell)| **cell == Cell::Food)
            .map(|(position, _)| position)
    }
}
