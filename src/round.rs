use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GridSize;
use crate::engine::{EndReason, SimulationEngine, TickOutcome};
use crate::error::SimError;
use crate::snake::{Direction, Position, Snake};

/// Lifecycle phase of the current round.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RoundState {
    Idle,
    Running,
    Ended,
}

/// Owns one game session: the grid, the round phase and the engine of the
/// current (or last) round.
#[derive(Debug)]
pub struct RoundLifecycle {
    grid: GridSize,
    state: RoundState,
    engine: Option<SimulationEngine>,
    end_reason: Option<EndReason>,
    rng: StdRng,
}

impl RoundLifecycle {
    /// Creates an idle session. A seed makes every round reproducible.
    #[must_use]
    pub fn new(grid: GridSize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            grid,
            state: RoundState::Idle,
            engine: None,
            end_reason: None,
            rng,
        }
    }

    /// Wraps an already assembled engine in a running session.
    #[must_use]
    pub fn from_engine(engine: SimulationEngine, seed: u64) -> Self {
        Self {
            grid: engine.grid(),
            state: RoundState::Running,
            engine: Some(engine),
            end_reason: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Begins a round from `Idle` or `Ended`.
    pub fn start(&mut self) -> Result<(), SimError> {
        if self.state == RoundState::Running {
            return Err(SimError::InvalidTransition {
                from: self.state,
                action: "start",
            });
        }

        self.begin_round(self.grid);
        Ok(())
    }

    /// Discards any round in progress and begins a fresh one.
    pub fn restart(&mut self) {
        self.begin_round(self.grid);
    }

    /// Replaces the grid. A running round cannot survive the change and is
    /// restarted on the new grid.
    pub fn resize(&mut self, grid: GridSize) {
        if grid == self.grid {
            return;
        }

        info!(
            "grid resized from {}x{} to {}x{}",
            self.grid.width, self.grid.height, grid.width, grid.height
        );
        if self.state == RoundState::Running {
            self.begin_round(grid);
        } else {
            self.grid = grid;
        }
    }

    /// Runs one tick of the current round.
    pub fn tick(&mut self) -> Result<TickOutcome, SimError> {
        let engine = self.running_engine()?;
        let outcome = engine.tick();
        let score = engine.score();

        if let TickOutcome::Ended(reason) = outcome {
            info!("round ended ({reason:?}) with score {score}");
            self.state = RoundState::Ended;
            self.end_reason = Some(reason);
        }

        Ok(outcome)
    }

    /// Buffers a heading change for the next tick.
    pub fn submit_direction(&mut self, direction: Direction) -> Result<(), SimError> {
        self.running_engine()?.submit_direction(direction);
        Ok(())
    }

    fn running_engine(&mut self) -> Result<&mut SimulationEngine, SimError> {
        match (self.state, self.engine.as_mut()) {
            (RoundState::Running, Some(engine)) => Ok(engine),
            (state, _) => Err(SimError::NotRunning { state }),
        }
    }

    /// Builds the next engine, then commits it together with `grid`.
    ///
    /// A grid with no room for food ends the round at once as a win.
    fn begin_round(&mut self, grid: GridSize) {
        let rng = StdRng::seed_from_u64(self.rng.r#gen());
        let engine = SimulationEngine::new(grid, rng);
        let filled = engine.is_filled();

        self.grid = grid;
        self.engine = Some(engine);
        if filled {
            info!("round on a {}x{} grid has no room for food", grid.width, grid.height);
            self.state = RoundState::Ended;
            self.end_reason = Some(EndReason::GridFilled);
        } else {
            info!("round started on a {}x{} grid", grid.width, grid.height);
            self.state = RoundState::Running;
            self.end_reason = None;
        }
    }

    #[must_use]
    pub fn state(&self) -> RoundState {
        self.state
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Engine of the current round, or of the last one once it ended.
    #[must_use]
    pub fn engine(&self) -> Option<&SimulationEngine> {
        self.engine.as_ref()
    }

    #[must_use]
    pub fn snake(&self) -> Option<&Snake> {
        self.engine.as_ref().map(SimulationEngine::snake)
    }

    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.engine.as_ref().and_then(SimulationEngine::food)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.engine.as_ref().map_or(0, SimulationEngine::score)
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }
}
