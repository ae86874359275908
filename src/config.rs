use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::snake::Position;

const APP_DIR_NAME: &str = "gridsnake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Logical grid dimensions in cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true when `position` lies inside `[0, width) x [0, height)`.
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < i32::from(self.width)
            && position.y < i32::from(self.height)
    }

    /// Iterates over every cell, row by row.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        (0..i32::from(self.height))
            .flat_map(move |y| (0..i32::from(self.width)).map(move |x| Position { x, y }))
    }
}

/// Time between two simulation ticks when nothing else is configured.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Edge length of one grid cell in surface units.
pub const DEFAULT_CELL_SIZE: u16 = 1;

/// Smallest play surface edge, in surface units.
pub const MIN_SURFACE_SIZE: u16 = 10;

/// Largest play surface edge, in surface units.
pub const MAX_SURFACE_SIZE: u16 = 20;

/// Cell the snake starts from on every new round.
pub const START_CELL: Position = Position { x: 9, y: 9 };

/// Terminal columns used to draw one surface unit, keeping cells square.
pub const TERMINAL_COLUMNS_PER_UNIT: u16 = 2;

/// User-tunable settings, read from `settings.json` and overridden by CLI flags.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tick_interval_ms: u64,
    pub cell_size: u16,
    pub min_surface: u16,
    pub max_surface: u16,
    /// Fixed RNG seed for reproducible food placement.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            cell_size: DEFAULT_CELL_SIZE,
            min_surface: MIN_SURFACE_SIZE,
            max_surface: MAX_SURFACE_SIZE,
            seed: None,
        }
    }
}

impl Settings {
    /// Returns the tick cadence as a duration.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> io::Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(invalid_data("tick_interval_ms must be positive"));
        }
        if self.cell_size == 0 {
            return Err(invalid_data("cell_size must be positive"));
        }
        if self.min_surface == 0 || self.min_surface > self.max_surface {
            return Err(invalid_data("min_surface must be positive and not exceed max_surface"));
        }
        if self.cell_size > self.min_surface / 2 {
            return Err(invalid_data("cell_size must fit at least twice into min_surface"));
        }
        Ok(())
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Loads settings from `path`.
///
/// A missing file yields the defaults. A file that exists but cannot be read,
/// parsed or validated is an error so the caller can report it before the
/// terminal switches to raw mode.
pub fn load_settings(path: &Path) -> io::Result<Settings> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => return Err(e),
    };

    let settings = serde_json::from_str::<Settings>(&raw)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    settings.validate()?;
    Ok(settings)
}

fn invalid_data(message: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message.to_owned())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{load_settings, GridSize, Settings, DEFAULT_TICK_INTERVAL_MS};
    use crate::snake::Position;

    #[test]
    fn grid_contains_checks_both_axes() {
        let grid = GridSize {
            width: 4,
            height: 3,
        };

        assert!(grid.contains(Position { x: 0, y: 0 }));
        assert!(grid.contains(Position { x: 3, y: 2 }));
        assert!(!grid.contains(Position { x: 4, y: 0 }));
        assert!(!grid.contains(Position { x: 0, y: 3 }));
        assert!(!grid.contains(Position { x: -1, y: 1 }));
        assert_eq!(grid.cells().count(), grid.total_cells());
    }

    #[test]
    fn missing_settings_file_returns_defaults() {
        let path = unique_test_path("missing");

        let loaded = load_settings(&path).expect("missing file should return defaults");

        assert_eq!(loaded, Settings::default());
        assert_eq!(loaded.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
    }

    #[test]
    fn partial_settings_file_keeps_other_defaults() {
        let path = unique_test_path("partial");
        write_test_file(&path, r#"{ "tick_interval_ms": 150, "seed": 7 }"#);

        let loaded = load_settings(&path).expect("partial file should load");

        assert_eq!(loaded.tick_interval_ms, 150);
        assert_eq!(loaded.seed, Some(7));
        assert_eq!(loaded.cell_size, Settings::default().cell_size);
        cleanup_test_path(&path);
    }

    #[test]
    fn malformed_settings_file_returns_error() {
        let path = unique_test_path("malformed");
        write_test_file(&path, "not-json");

        let error = load_settings(&path).expect_err("malformed file should return Err");

        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
        cleanup_test_path(&path);
    }

    #[test]
    fn zero_cell_size_is_rejected() {
        let path = unique_test_path("zero-cell");
        write_test_file(&path, r#"{ "cell_size": 0 }"#);

        assert!(load_settings(&path).is_err());
        cleanup_test_path(&path);
    }

    #[test]
    fn cell_size_must_leave_at_least_a_two_by_two_grid() {
        let fits = Settings {
            cell_size: 5,
            ..Settings::default()
        };
        assert!(fits.validate().is_ok());

        for cell_size in [6, 11, 20] {
            let settings = Settings {
                cell_size,
                ..Settings::default()
            };
            let error = settings.validate().expect_err("oversized cell should be rejected");
            assert_eq!(error.kind(), io::ErrorKind::InvalidData);
        }
    }

    #[test]
    fn oversized_cell_in_settings_file_is_rejected() {
        let path = unique_test_path("oversized-cell");
        write_test_file(&path, r#"{ "cell_size": 11 }"#);

        assert!(load_settings(&path).is_err());
        cleanup_test_path(&path);
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("gridsnake-settings-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
