use std::collections::HashSet;

use rand::Rng;

use crate::config::GridSize;
use crate::error::SimError;
use crate::snake::Position;

/// Picks a food cell uniformly among the grid cells not in `occupied`.
///
/// Samples from the explicit list of free cells, so it terminates no matter
/// how full the grid is. Fails with [`SimError::GridSaturated`] when no cell is
/// free.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    grid: GridSize,
    occupied: &HashSet<Position>,
) -> Result<Position, SimError> {
    let candidates: Vec<Position> = grid
        .cells()
        .filter(|cell| !occupied.contains(cell))
        .collect();

    if candidates.is_empty() {
        return Err(SimError::GridSaturated {
            width: grid.width,
            height: grid.height,
        });
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}
