use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::{GridSize, Settings, TERMINAL_COLUMNS_PER_UNIT};
use crate::error::SimError;
use crate::geometry::{compute_grid, fit_surface};
use crate::round::{RoundLifecycle, RoundState};
use crate::snake::Position;
use crate::ui::hud::{render_hud, split_area, HudInfo};
use crate::ui::menu::{render_game_over_menu, render_start_menu};

const HEAD_COLOR: Color = Color::Green;
const BODY_COLOR: Color = Color::White;
const FOOD_COLOR: Color = Color::Red;
const FIELD_COLOR: Color = Color::Black;
const BORDER_COLOR: Color = Color::DarkGray;

/// Placement of the square play surface inside the terminal.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SurfaceLayout {
    /// Surface edge in units; one unit is one row by two columns.
    pub surface_size: u16,
    pub cell_size: u16,
    pub grid: GridSize,
    /// Bordered frame around the cells.
    pub outer: Rect,
    /// Area painted with cells, clipped to the terminal.
    pub inner: Rect,
}

impl SurfaceLayout {
    /// Sizes the surface for a terminal area and derives the grid from it.
    pub fn fit(terminal_area: Rect, settings: &Settings) -> Result<Self, SimError> {
        let (play_area, _) = split_area(terminal_area);
        let available = (play_area.width.saturating_sub(2) / TERMINAL_COLUMNS_PER_UNIT)
            .min(play_area.height.saturating_sub(2));
        let surface_size = fit_surface(available, settings.min_surface, settings.max_surface);
        let grid = compute_grid(surface_size, settings.cell_size)?;

        let rows = grid.height.saturating_mul(settings.cell_size);
        let columns = grid
            .width
            .saturating_mul(settings.cell_size)
            .saturating_mul(TERMINAL_COLUMNS_PER_UNIT);
        let outer = centered(play_area, columns.saturating_add(2), rows.saturating_add(2));
        let inner = Rect {
            x: outer.x.saturating_add(1),
            y: outer.y.saturating_add(1),
            width: columns,
            height: rows,
        }
        .intersection(play_area);

        Ok(Self {
            surface_size,
            cell_size: settings.cell_size,
            grid,
            outer,
            inner,
        })
    }

    /// Terminal rectangle covered by one grid cell, if it is visible.
    #[must_use]
    pub fn cell_rect(&self, position: Position) -> Option<Rect> {
        if !self.grid.contains(position) {
            return None;
        }

        let height = self.cell_size;
        let width = self.cell_size.saturating_mul(TERMINAL_COLUMNS_PER_UNIT);
        let x_offset = u16::try_from(position.x).ok()?.saturating_mul(width);
        let y_offset = u16::try_from(position.y).ok()?.saturating_mul(height);

        let rect = Rect {
            x: self.inner.x.saturating_add(x_offset),
            y: self.inner.y.saturating_add(y_offset),
            width,
            height,
        }
        .intersection(self.inner);

        (!rect.is_empty()).then_some(rect)
    }
}

/// Renders the full frame from the round snapshot.
pub fn render(
    frame: &mut Frame<'_>,
    round: &RoundLifecycle,
    layout: &SurfaceLayout,
    hud: HudInfo,
) {
    let (play_area, hud_area) = split_area(frame.area());
    render_hud(frame, hud_area, round, hud);

    let block = Block::bordered().border_style(Style::new().fg(BORDER_COLOR));
    frame.render_widget(block, layout.outer.intersection(play_area));

    let buffer = frame.buffer_mut();
    buffer.set_style(layout.inner, Style::new().bg(FIELD_COLOR));

    if let Some(rect) = round.food().and_then(|food| layout.cell_rect(food)) {
        buffer.set_style(rect, Style::new().bg(FOOD_COLOR));
    }

    if let Some(snake) = round.snake() {
        let head = snake.head();
        for segment in snake.segments() {
            let Some(rect) = layout.cell_rect(*segment) else {
                continue;
            };
            let color = if *segment == head {
                HEAD_COLOR
            } else {
                BODY_COLOR
            };
            buffer.set_style(rect, Style::new().bg(color));
        }
    }

    match round.state() {
        RoundState::Idle => render_start_menu(frame, layout.outer.intersection(play_area)),
        RoundState::Ended => render_game_over_menu(
            frame,
            layout.outer.intersection(play_area),
            round.score(),
            round.end_reason(),
        ),
        RoundState::Running => {}
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::SurfaceLayout;
    use crate::config::{GridSize, Settings};
    use crate::snake::Position;

    #[test]
    fn large_terminal_is_capped_at_max_surface() {
        let layout = SurfaceLayout::fit(Rect::new(0, 0, 120, 40), &Settings::default())
            .expect("layout");

        assert_eq!(layout.surface_size, 20);
        assert_eq!(
            layout.grid,
            GridSize {
                width: 20,
                height: 20
            }
        );
        assert_eq!(layout.inner.width, 40);
        assert_eq!(layout.inner.height, 20);
    }

    #[test]
    fn small_terminal_uses_available_rows() {
        let layout =
            SurfaceLayout::fit(Rect::new(0, 0, 80, 17), &Settings::default()).expect("layout");

        // 17 rows, minus the HUD row and two border rows.
        assert_eq!(layout.surface_size, 14);
        assert_eq!(layout.grid.width, 14);
    }

    #[test]
    fn cell_size_divides_the_surface() {
        let settings = Settings {
            cell_size: 3,
            ..Settings::default()
        };
        let layout = SurfaceLayout::fit(Rect::new(0, 0, 120, 40), &settings).expect("layout");

        assert_eq!(layout.grid.width, 6);
        assert_eq!(
            layout.cell_rect(Position { x: 1, y: 2 }),
            Some(Rect::new(layout.inner.x + 6, layout.inner.y + 6, 6, 3))
        );
    }

    #[test]
    fn largest_valid_cell_on_tiny_terminal_still_gives_two_by_two() {
        let settings = Settings {
            cell_size: 5,
            ..Settings::default()
        };
        settings.validate().expect("cell size within bounds");

        let layout = SurfaceLayout::fit(Rect::new(0, 0, 8, 4), &settings).expect("layout");

        assert_eq!(layout.surface_size, 10);
        assert_eq!(
            layout.grid,
            GridSize {
                width: 2,
                height: 2
            }
        );
    }

    #[test]
    fn cells_outside_the_grid_have_no_rect() {
        let layout = SurfaceLayout::fit(Rect::new(0, 0, 120, 40), &Settings::default())
            .expect("layout");

        assert_eq!(layout.cell_rect(Position { x: -1, y: 0 }), None);
        assert_eq!(layout.cell_rect(Position { x: 0, y: 20 }), None);
    }
}
