use std::io;

use thiserror::Error;

use crate::round::RoundState;

/// Failures reported by the simulation core.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum SimError {
    #[error("invalid geometry: surface size {surface_size} with cell size {cell_size}")]
    InvalidGeometry { surface_size: u16, cell_size: u16 },

    #[error("no free cell left for food on a {width}x{height} grid")]
    GridSaturated { width: u16, height: u16 },

    #[error("cannot {action} while the round is {from:?}")]
    InvalidTransition {
        from: RoundState,
        action: &'static str,
    },

    #[error("round is not running (state: {state:?})")]
    NotRunning { state: RoundState },
}

impl From<SimError> for io::Error {
    fn from(error: SimError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, error)
    }
}
