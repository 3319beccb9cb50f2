use std::collections::VecDeque;

use crate::grid::GridSize;
use crate::input::Direction;

/// Grid position in `(row, col)` cell coordinates.
///
/// Coordinates are signed so that the neighbour of an edge cell can be
/// represented and then rejected by [`Position::is_within_bounds`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns the adjacent position one cell away in `direction`.
    #[must_use]
    pub fn translate(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, size: GridSize) -> bool {
        self.row >= 0
            && self.col >= 0
            && self.row < i32::from(size.rows)
            && self.col < i32::from(size.cols)
    }

    /// Returns true when `other` shares an edge with this position.
    #[must_use]
    pub fn is_adjacent(self, other: Self) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

/// Ordered snake body, head at the front and tail at the back.
///
/// The body only changes through [`Snake::push_head`] and [`Snake::pop_tail`];
/// the engine mirrors both calls into its grid index.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a horizontal snake on `row` spanning `len` columns starting at
    /// `tail_col`, with the head at the rightmost column.
    #[must_use]
    pub fn horizontal(row: i32, tail_col: i32, len: usize) -> Self {
        let mut body = VecDeque::with_capacity(len);
        for offset in 0..len {
            // Column offsets are bounded by the grid width, which fits in u16.
            let col = tail_col + offset as i32;
            body.push_front(Position::new(row, col));
        }

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Self {
        Self {
            body: VecDeque::from(segments),
        }
    }

    pub(crate) fn push_head(&mut self, position: Position) {
        self.body.push_front(position);
    }

    pub(crate) fn pop_tail(&mut self) -> Option<Position> {
        self.body.pop_back()
    }

    /// Returns the head position, or `None` for an empty body.
    #[must_use]
    pub fn head(&self) -> Option<Position> {
        self.body.front().copied()
    }

    /// Returns the tail position, or `None` for an empty body.
    #[must_use]
    pub fn tail(&self) -> Option<Position> {
        self.body.back().copied()
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.body.iter().copied()
    }
}
