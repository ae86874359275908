//! Tick-driven grid snake: the simulation core plus a terminal front end.
//!
//! The core (`geometry`, `food`, `snake`, `engine`, `round`) has no I/O. The
//! remaining modules adapt it to a crossterm/ratatui terminal.

pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod round;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
