use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Rect;

use crate::snake::Direction;

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    /// Primary button pressed at a terminal cell.
    PointerAt { column: u16, row: u16 },
    /// Terminal size changed; the play surface must be recomputed.
    Resize,
    Confirm,
    Quit,
}

/// Maps a key to a movement direction (arrows, WASD and vi keys).
#[must_use]
pub fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => Some(Direction::Right),
        _ => None,
    }
}

/// Picks a direction from where the pointer landed relative to the centre of
/// `surface`: top-left is up, top-right is right, bottom-left is left and
/// bottom-right is down.
#[must_use]
pub fn quadrant_direction(surface: Rect, column: u16, row: u16) -> Direction {
    let center_x = surface.x.saturating_add(surface.width / 2);
    let center_y = surface.y.saturating_add(surface.height / 2);
    let left = column < center_x;
    let top = row < center_y;

    match (left, top) {
        (true, true) => Direction::Up,
        (false, true) => Direction::Right,
        (true, false) => Direction::Left,
        (false, false) => Direction::Down,
    }
}

/// Reads terminal events and translates them into [`GameInput`].
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `timeout` for one event.
    ///
    /// Returns `Ok(None)` when the timeout elapses or the event has no meaning
    /// for the game.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        Ok(translate_event(event::read()?))
    }
}

fn translate_event(event: Event) -> Option<GameInput> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Some(GameInput::PointerAt { column, row }),
        Event::Resize(_, _) => Some(GameInput::Resize),
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(GameInput::Quit)
        }
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(GameInput::Quit),
        KeyCode::Enter | KeyCode::Char(' ' | 'r' | 'R') => Some(GameInput::Confirm),
        code => direction_for_key(code).map(GameInput::Direction),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{
        Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use ratatui::layout::Rect;

    use super::{direction_for_key, quadrant_direction, translate_event, GameInput};
    use crate::snake::Direction;

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        assert_eq!(direction_for_key(KeyCode::Up), Some(Direction::Up));
        assert_eq!(direction_for_key(KeyCode::Char('a')), Some(Direction::Left));
        assert_eq!(direction_for_key(KeyCode::Char('S')), Some(Direction::Down));
        assert_eq!(direction_for_key(KeyCode::Right), Some(Direction::Right));
        assert_eq!(direction_for_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn quadrants_follow_the_surface_centre() {
        let surface = Rect::new(10, 4, 40, 20);

        assert_eq!(quadrant_direction(surface, 12, 5), Direction::Up);
        assert_eq!(quadrant_direction(surface, 30, 5), Direction::Right);
        assert_eq!(quadrant_direction(surface, 12, 20), Direction::Left);
        assert_eq!(quadrant_direction(surface, 30, 14), Direction::Down);
    }

    #[test]
    fn events_translate_to_game_inputs() {
        let quit = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate_event(quit), Some(GameInput::Quit));

        let confirm = Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(translate_event(confirm), Some(GameInput::Confirm));

        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(translate_event(click), Some(GameInput::PointerAt { column: 3, row: 7 }));

        assert_eq!(translate_event(Event::Resize(80, 24)), Some(GameInput::Resize));
        assert_eq!(translate_event(Event::FocusLost), None);
    }
}
