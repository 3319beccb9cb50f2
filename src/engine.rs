use std::collections::HashSet;

use log::{debug, info, trace, warn};

use crate::config::{INITIAL_SNAKE_LEN, INITIAL_TAIL_COL, MIN_COLS, MIN_ROWS};
use crate::error::EngineError;
use crate::food::{FoodPlacer, RandomPlacer};
use crate::grid::{Cell, Grid, GridSize};
use crate::input::Direction;
use crate::snake::{Position, Snake};
use crate::snapshot::Snapshot;

/// Why a game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Result of one call to [`SimulationEngine::step`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// The snake slid one cell forward.
    Moved,
    /// The snake ate food and grew by one segment.
    Ate,
    /// The move was fatal; the engine is now in its terminal state.
    Died(DeathReason),
    /// The game was already over and nothing changed.
    Halted,
}

/// What the head would run into on the next move.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Hit {
    Outside,
    Empty,
    Food,
    Snake,
}

/// Turn-based snake simulation over a fixed grid.
///
/// The ordered body is the source of truth for where the snake is; the grid is
/// a lookup index updated in the same call as every body change, so callers
/// never observe the two out of sync.
#[derive(Debug, Clone)]
pub struct SimulationEngine<P = RandomPlacer> {
    size: GridSize,
    grid: Grid,
    snake: Snake,
    heading: Direction,
    food: Option<Position>,
    score: u32,
    game_over: bool,
    death_reason: Option<DeathReason>,
    tick_count: u64,
    placer: P,
}

impl SimulationEngine<RandomPlacer> {
    /// Creates an engine whose food placement draws from OS entropy.
    pub fn new(rows: u16, cols: u16) -> Result<Self, EngineError> {
        Self::with_placer(rows, cols, RandomPlacer::from_entropy())
    }

    /// Creates a deterministic engine for tests and reproducible sessions.
    pub fn new_with_seed(rows: u16, cols: u16, seed: u64) -> Result<Self, EngineError> {
        Self::with_placer(rows, cols, RandomPlacer::from_seed(seed))
    }
}

impl<P: FoodPlacer> SimulationEngine<P> {
    /// Creates an engine with the standard opening: a three-cell snake on the
    /// middle row in columns 1..=3, heading right, plus one food item.
    pub fn with_placer(rows: u16, cols: u16, placer: P) -> Result<Self, EngineError> {
        let size = validate_size(rows, cols)?;
        let middle_row = i32::from(rows / 2);
        let snake = Snake::horizontal(middle_row, INITIAL_TAIL_COL, INITIAL_SNAKE_LEN);

        debug!("new engine {rows}x{cols}, snake on row {middle_row}");
        Ok(Self::assemble(size, snake, Direction::Right, placer))
    }

    /// Creates an engine from explicit body segments, head first.
    ///
    /// The body must be non-empty, lie inside the grid, contain no repeated
    /// cells, and be contiguous. One food item is placed afterwards.
    pub fn from_body(
        size: GridSize,
        body: Vec<Position>,
        heading: Direction,
        placer: P,
    ) -> Result<Self, EngineError> {
        if size.rows == 0 || size.cols == 0 {
            return Err(EngineError::invalid(format!(
                "grid dimensions must be positive, got {}x{}",
                size.rows, size.cols
            )));
        }
        validate_body(size, &body)?;

        debug!(
            "engine from {}-segment body on {}x{}",
            body.len(),
            size.rows,
            size.cols
        );
        Ok(Self::assemble(
            size,
            Snake::from_segments(body),
            heading,
            placer,
        ))
    }

    fn assemble(size: GridSize, snake: Snake, heading: Direction, placer: P) -> Self {
        let mut grid = Grid::new(size);
        for segment in snake.segments() {
            grid.set(segment, Cell::SnakeBody);
        }

        let mut engine = Self {
            size,
            grid,
            snake,
            heading,
            food: None,
            score: 0,
            game_over: false,
            death_reason: None,
            tick_count: 0,
            placer,
        };
        engine.place_food();
        engine
    }

    /// Sets the heading used by the next [`step`](Self::step).
    ///
    /// Any direction is accepted, including a reversal; steering back into the
    /// body is caught as a collision when the step runs.
    pub fn change_direction(&mut self, direction: Direction) {
        self.heading = direction;
    }

    /// Advances the simulation by one tick.
    pub fn step(&mut self) -> StepOutcome {
        if self.game_over {
            return StepOutcome::Halted;
        }

        self.tick_count += 1;
        let candidate = self.head().translate(self.heading);
        let hit = self.classify(candidate);
        trace!("tick {}: {:?} -> {candidate:?} ({hit:?})", self.tick_count, self.heading);

        match hit {
            Hit::Outside => self.finish(DeathReason::WallCollision),
            Hit::Snake => self.finish(DeathReason::SelfCollision),
            Hit::Empty => {
                // Tail goes first so a head moving into the vacated tail cell
                // ends up marked as body.
                self.remove_tail();
                self.add_head(candidate);
                StepOutcome::Moved
            }
            Hit::Food => {
                self.add_head(candidate);
                self.food = None;
                self.score = self.score.saturating_add(1);
                self.place_food();
                StepOutcome::Ate
            }
        }
    }

    fn classify(&self, candidate: Position) -> Hit {
        if !candidate.is_within_bounds(self.size) {
            return Hit::Outside;
        }

        // A one-cell snake's tail is its head, so the exception only applies
        // to longer bodies.
        if self.snake.len() > 1 && Some(candidate) == self.snake.tail() {
            return Hit::Empty;
        }

        match self.grid.get(candidate) {
            Some(Cell::Empty) => Hit::Empty,
            Some(Cell::Food) => Hit::Food,
            Some(Cell::SnakeBody) => Hit::Snake,
            None => Hit::Outside,
        }
    }

    fn add_head(&mut self, position: Position) {
        self.snake.push_head(position);
        self.grid.set(position, Cell::SnakeBody);
    }

    fn remove_tail(&mut self) {
        if let Some(tail) = self.snake.pop_tail() {
            self.grid.set(tail, Cell::Empty);
        }
    }

    fn finish(&mut self, reason: DeathReason) -> StepOutcome {
        self.game_over = true;
        self.death_reason = Some(reason);
        info!(
            "game over after {} ticks: {reason:?}, score {}, length {}",
            self.tick_count,
            self.score,
            self.snake.len()
        );
        StepOutcome::Died(reason)
    }

    fn place_food(&mut self) {
        let empty = self.grid.empty_positions();
        if empty.is_empty() {
            debug!("grid full, no food placed");
            return;
        }

        let Some(index) = self.placer.choose(&empty) else {
            warn!("food placer declined {} empty cells", empty.len());
            return;
        };
        let Some(position) = empty.get(index).copied() else {
            warn!(
                "food placer chose index {index} out of {} empty cells",
                empty.len()
            );
            return;
        };

        self.grid.set(position, Cell::Food);
        self.food = Some(position);
        debug!("food placed at {position:?}");
    }
}

impl<P> SimulationEngine<P> {
    /// Returns the head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.snake
            .head()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.snake
            .tail()
            .expect("snake body must always contain at least one segment")
    }

    /// Iterates over body segments from head to tail.
    pub fn body(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.snake.segments()
    }

    /// Current body length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snake.len()
    }

    /// Always false; a live or dead engine keeps at least one segment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    /// Returns the cell at `position`, or `None` when it lies off the grid.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<Cell> {
        self.grid.get(position)
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Position of the food item, if one is on the board.
    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Number of steps that advanced the simulation, including the fatal one.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Copies the observable state for presentation.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            size: self.size,
            cells: self.grid.cells().to_vec(),
            body: self.snake.segments().collect(),
            heading: self.heading,
            score: self.score,
            game_over: self.game_over,
            death_reason: self.death_reason,
        }
    }
}

fn validate_size(rows: u16, cols: u16) -> Result<GridSize, EngineError> {
    if rows < MIN_ROWS || cols < MIN_COLS {
        return Err(EngineError::invalid(format!(
            "grid must be at least {MIN_ROWS}x{MIN_COLS} to hold the starting snake, got {rows}x{cols}"
        )));
    }

    Ok(GridSize { rows, cols })
}

fn validate_body(size: GridSize, body: &[Position]) -> Result<(), EngineError> {
    if body.is_empty() {
        return Err(EngineError::invalid("snake body must have at least one segment"));
    }

    let mut seen = HashSet::with_capacity(body.len());
    for segment in body {
        if !segment.is_within_bounds(size) {
            return Err(EngineError::invalid(format!(
                "segment {segment:?} lies outside the {}x{} grid",
                size.rows, size.cols
            )));
        }
        if !seen.insert(*segment) {
            return Err(EngineError::invalid(format!(
                "segment {segment:?} appears more than once"
            )));
        }
    }

    if let Some(pair) = body.windows(2).find(|pair| !pair[0].is_adjacent(pair[1])) {
        return Err(EngineError::invalid(format!(
            "segments {:?} and {:?} are not adjacent",
            pair[0], pair[1]
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::food::ScriptedPlacer;
    use crate::grid::{Cell, GridSize};
    use crate::input::Direction;
    use crate::snake::Position;

    use super::{DeathReason, SimulationEngine, StepOutcome};

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    fn five_by_five(food: Position) -> SimulationEngine<ScriptedPlacer> {
        SimulationEngine::with_placer(5, 5, ScriptedPlacer::new([food]))
            .expect("5x5 grid is valid")
    }

    fn assert_grid_mirrors_body<P>(engine: &SimulationEngine<P>) {
        let body: Vec<_> = engine.body().collect();
        assert_eq!(engine.grid().count(Cell::SnakeBody), body.len());
        for segment in body {
            assert_eq!(engine.cell(segment), Some(Cell::SnakeBody));
        }
    }

    #[test]
    fn new_engine_has_standard_opening() {
        let engine = SimulationEngine::new_with_seed(7, 9, 1).expect("valid grid");

        assert_eq!(
            engine.body().collect::<Vec<_>>(),
            vec![p(3, 3), p(3, 2), p(3, 1)]
        );
        assert_eq!(engine.head(), p(3, 3));
        assert_eq!(engine.tail(), p(3, 1));
        assert_eq!(engine.heading(), Direction::Right);
        assert_eq!(engine.score(), 0);
        assert!(!engine.is_game_over());
        assert_eq!(engine.grid().count(Cell::SnakeBody), 3);
        assert_eq!(engine.grid().count(Cell::Food), 1);
        assert_eq!(engine.grid().food_position(), engine.food());
    }

    #[test]
    fn undersized_grids_are_rejected() {
        assert!(SimulationEngine::new_with_seed(0, 10, 1).is_err());
        assert!(SimulationEngine::new_with_seed(10, 0, 1).is_err());
        assert!(SimulationEngine::new_with_seed(10, 3, 1).is_err());
        assert!(SimulationEngine::new_with_seed(1, 4, 1).is_ok());
    }

    #[test]
    fn minimum_grid_places_food_in_column_zero() {
        let engine = SimulationEngine::new_with_seed(1, 4, 5).expect("minimum grid is valid");

        assert_eq!(engine.food(), Some(p(0, 0)));
    }

    #[test]
    fn moving_into_empty_cell_keeps_length() {
        let mut engine = five_by_five(p(0, 0));
        engine.change_direction(Direction::Up);

        assert_eq!(engine.step(), StepOutcome::Moved);
        assert_eq!(engine.head(), p(1, 3));
        assert_eq!(engine.tail(), p(2, 2));
        assert_eq!(engine.len(), 3);
        assert_eq!(engine.cell(p(2, 1)), Some(Cell::Empty));
        assert_grid_mirrors_body(&engine);
    }

    #[test]
    fn eating_food_grows_and_scores() {
        let mut engine =
            SimulationEngine::with_placer(5, 5, ScriptedPlacer::new([p(2, 4), p(0, 0)]))
                .expect("valid grid");

        assert_eq!(engine.step(), StepOutcome::Ate);
        assert_eq!(
            engine.body().collect::<Vec<_>>(),
            vec![p(2, 4), p(2, 3), p(2, 2), p(2, 1)]
        );
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.food(), Some(p(0, 0)));
        assert_eq!(engine.grid().count(Cell::Food), 1);
        assert_grid_mirrors_body(&engine);
    }

    #[test]
    fn leaving_the_grid_ends_the_game_without_mutation() {
        let mut engine = five_by_five(p(0, 0));
        engine.change_direction(Direction::Down);
        engine.step();
        engine.step();
        let before = engine.snapshot();

        assert_eq!(
            engine.step(),
            StepOutcome::Died(DeathReason::WallCollision)
        );
        let after = engine.snapshot();

        assert!(after.game_over);
        assert_eq!(after.cells, before.cells);
        assert_eq!(after.body, before.body);
        assert_eq!(after.score, before.score);
        assert_eq!(engine.death_reason(), Some(DeathReason::WallCollision));
    }

    #[test]
    fn reversing_into_the_neck_is_fatal() {
        let mut engine = five_by_five(p(0, 0));
        engine.change_direction(Direction::Left);

        assert_eq!(
            engine.step(),
            StepOutcome::Died(DeathReason::SelfCollision)
        );
        assert_eq!(engine.head(), p(2, 3));
    }

    #[test]
    fn moving_into_the_vacating_tail_is_legal() {
        // Head at (1,1) facing down onto the tail at (2,1) of a 2x2 loop.
        let body = vec![p(1, 1), p(1, 2), p(2, 2), p(2, 1)];
        let mut engine = SimulationEngine::from_body(
            GridSize { rows: 4, cols: 4 },
            body,
            Direction::Down,
            ScriptedPlacer::new([p(0, 0)]),
        )
        .expect("valid body");

        assert_eq!(engine.step(), StepOutcome::Moved);
        assert_eq!(
            engine.body().collect::<Vec<_>>(),
            vec![p(2, 1), p(1, 1), p(1, 2), p(2, 2)]
        );
        assert_eq!(engine.cell(p(2, 1)), Some(Cell::SnakeBody));
        assert_grid_mirrors_body(&engine);
    }

    #[test]
    fn single_segment_snake_moves_normally() {
        let mut engine = SimulationEngine::from_body(
            GridSize { rows: 3, cols: 4 },
            vec![p(1, 1)],
            Direction::Left,
            ScriptedPlacer::new([p(2, 3)]),
        )
        .expect("valid body");

        assert_eq!(engine.step(), StepOutcome::Moved);
        assert_eq!(engine.head(), p(1, 0));
        assert_eq!(engine.tail(), p(1, 0));
        assert_eq!(engine.cell(p(1, 1)), Some(Cell::Empty));
        assert_grid_mirrors_body(&engine);
    }

    #[test]
    fn steps_after_game_over_are_no_ops() {
        let mut engine = five_by_five(p(0, 0));
        engine.change_direction(Direction::Left);
        engine.step();
        let frozen = engine.snapshot();
        let ticks = engine.tick_count();

        engine.change_direction(Direction::Up);
        for _ in 0..5 {
            assert_eq!(engine.step(), StepOutcome::Halted);
        }

        let after = engine.snapshot();
        assert_eq!(after.cells, frozen.cells);
        assert_eq!(after.body, frozen.body);
        assert_eq!(after.score, frozen.score);
        assert!(after.game_over);
        assert_eq!(engine.tick_count(), ticks);
    }

    #[test]
    fn filling_the_grid_leaves_no_food() {
        // 1x4 strip: snake at cols 1..=3 facing left toward food at col 0.
        let mut engine = SimulationEngine::from_body(
            GridSize { rows: 1, cols: 4 },
            vec![p(0, 1), p(0, 2), p(0, 3)],
            Direction::Left,
            ScriptedPlacer::default(),
        )
        .expect("valid body");
        assert_eq!(engine.food(), Some(p(0, 0)));

        assert_eq!(engine.step(), StepOutcome::Ate);
        assert_eq!(engine.len(), 4);
        assert_eq!(engine.food(), None);
        assert_eq!(engine.grid().count(Cell::Food), 0);
        assert_eq!(engine.grid().count(Cell::Empty), 0);

        assert_eq!(
            engine.step(),
            StepOutcome::Died(DeathReason::WallCollision)
        );
    }

    #[test]
    fn from_body_rejects_malformed_bodies() {
        let size = GridSize { rows: 4, cols: 4 };
        let build = |body: Vec<Position>| {
            SimulationEngine::from_body(size, body, Direction::Up, ScriptedPlacer::default())
        };

        assert!(build(vec![]).is_err());
        assert!(build(vec![p(0, 0), p(0, -1)]).is_err());
        assert!(build(vec![p(0, 0), p(0, 1), p(0, 0)]).is_err());
        assert!(build(vec![p(0, 0), p(1, 1)]).is_err());
        assert!(build(vec![p(0, 0), p(0, 1), p(1, 1)]).is_ok());
    }

    #[test]
    fn declined_placement_leaves_board_without_food() {
        struct Decline;
        impl crate::food::FoodPlacer for Decline {
            fn choose(&mut self, _empty: &[Position]) -> Option<usize> {
                Some(usize::MAX)
            }
        }

        let engine = SimulationEngine::with_placer(5, 5, Decline).expect("valid grid");

        assert_eq!(engine.food(), None);
        assert_eq!(engine.grid().count(Cell::Food), 0);
    }
}
