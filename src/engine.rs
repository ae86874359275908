use log::{debug, info, warn};
use rand::rngs::StdRng;

use crate::config::{GridSize, START_CELL};
use crate::food::place_food;
use crate::snake::{direction_change_is_valid, Direction, Position, Snake};

/// Why a round stopped.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    /// The head left the grid.
    Wall,
    /// The head ran into the body.
    SelfBite,
    /// The snake covers every cell; nothing is left to eat.
    GridFilled,
}

/// Result of one simulation tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    Moved,
    Grew,
    Ended(EndReason),
}

/// Mutable simulation state for one round.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    grid: GridSize,
    snake: Snake,
    food: Option<Position>,
    score: u32,
    pending: Option<Direction>,
    ticks: u64,
    rng: StdRng,
}

impl SimulationEngine {
    /// Builds a fresh round: one-cell snake at the start cell heading right,
    /// score zero and the first food placed.
    ///
    /// On a grid with no cell left beside the snake the engine starts already
    /// filled: `food()` is `None` and [`Self::is_filled`] is true.
    #[must_use]
    pub fn new(grid: GridSize, mut rng: StdRng) -> Self {
        let snake = Snake::new(start_cell(grid), Direction::Right);
        let food = match place_food(&mut rng, grid, &snake.occupied_cells()) {
            Ok(food) => {
                debug!("placed first food at {food:?} on a {}x{} grid", grid.width, grid.height);
                Some(food)
            }
            Err(error) => {
                warn!("{error}; round starts filled");
                None
            }
        };

        Self::assemble(grid, snake, food, rng)
    }

    /// Assembles an engine from explicit parts, for scripted scenarios.
    #[must_use]
    pub fn from_parts(grid: GridSize, snake: Snake, food: Position, rng: StdRng) -> Self {
        Self::assemble(grid, snake, Some(food), rng)
    }

    fn assemble(grid: GridSize, snake: Snake, food: Option<Position>, rng: StdRng) -> Self {
        Self {
            grid,
            snake,
            food,
            score: 0,
            pending: None,
            ticks: 0,
            rng,
        }
    }

    /// Buffers a direction for the next tick; a later call replaces it.
    pub fn submit_direction(&mut self, direction: Direction) {
        self.pending = Some(direction);
    }

    /// Advances the simulation by one cell.
    ///
    /// Wall and self collisions leave snake, food and score untouched. Once
    /// the grid is filled every further tick reports `GridFilled` and changes
    /// nothing.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_filled() {
            return TickOutcome::Ended(EndReason::GridFilled);
        }

        self.ticks += 1;
        self.apply_pending_direction();

        let candidate = self.snake.next_head(self.snake.direction());
        if !self.grid.contains(candidate) {
            info!("snake left the grid at {candidate:?} after {} ticks", self.ticks);
            return TickOutcome::Ended(EndReason::Wall);
        }

        let grew = self.food == Some(candidate);
        if self.snake.would_collide(candidate, grew) {
            info!("snake bit itself at {candidate:?} after {} ticks", self.ticks);
            return TickOutcome::Ended(EndReason::SelfBite);
        }

        if !grew {
            self.snake.advance(candidate, false);
            return TickOutcome::Moved;
        }

        self.score += 1;
        let mut occupied = self.snake.occupied_cells();
        occupied.insert(candidate);
        let placement = place_food(&mut self.rng, self.grid, &occupied);
        self.snake.advance(candidate, true);

        match placement {
            Ok(food) => {
                debug!("score {}, next food at {food:?}", self.score);
                self.food = Some(food);
                TickOutcome::Grew
            }
            Err(error) => {
                warn!("{error}; round won with score {}", self.score);
                self.food = None;
                TickOutcome::Ended(EndReason::GridFilled)
            }
        }
    }

    fn apply_pending_direction(&mut self) {
        let Some(next) = self.pending.take() else {
            return;
        };

        let current = self.snake.direction();
        if direction_change_is_valid(current, next) {
            self.snake.set_direction(next);
        } else {
            debug!("ignored reversal from {current:?} to {next:?}");
        }
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Current food cell; `None` only once the snake has filled the grid.
    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    /// True once no food can be placed because the snake covers the grid.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.food.is_none()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Direction waiting for the next tick, if any.
    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Fixed start cell, pulled inside grids too small to contain it.
fn start_cell(grid: GridSize) -> Position {
    Position {
        x: START_CELL.x.min(i32::from(grid.width) - 1).max(0),
        y: START_CELL.y.min(i32::from(grid.height) - 1).max(0),
    }
}
