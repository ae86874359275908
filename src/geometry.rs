use crate::config::GridSize;
use crate::error::SimError;

/// Derives square grid dimensions from a square play surface.
///
/// Both edges are `surface_size / cell_size` cells, rounded down.
pub fn compute_grid(surface_size: u16, cell_size: u16) -> Result<GridSize, SimError> {
    if surface_size == 0 || cell_size == 0 || cell_size > surface_size {
        return Err(SimError::InvalidGeometry {
            surface_size,
            cell_size,
        });
    }

    let cells = surface_size / cell_size;
    Ok(GridSize {
        width: cells,
        height: cells,
    })
}

/// Clamps the space available for the play surface into `[min, max]`.
#[must_use]
pub fn fit_surface(available: u16, min: u16, max: u16) -> u16 {
    available.min(max).max(min)
}
