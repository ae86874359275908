use std::time::Duration;

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::round::{RoundLifecycle, RoundState};

const HUD_HEIGHT: u16 = 1;
const HUD_MARGIN_X: u16 = 1;

/// Values shown in the HUD that do not live in the round itself.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    pub tick_interval: Duration,
    pub mouse_enabled: bool,
}

/// Splits the frame into the play area and the HUD row below it.
#[must_use]
pub fn split_area(area: Rect) -> (Rect, Rect) {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(HUD_HEIGHT)]).areas(area);
    (play_area, hud_area)
}

/// Draws the status line: round state on the left, counters on the right.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, round: &RoundLifecycle, info: HudInfo) {
    let area = inset_horizontal(area, HUD_MARGIN_X);
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(30), Constraint::Percentage(70)]).areas(area);

    let (label, color) = match round.state() {
        RoundState::Idle => ("READY", Color::Yellow),
        RoundState::Running => ("RUNNING", Color::Green),
        RoundState::Ended => ("GAME OVER", Color::Red),
    };
    frame.render_widget(
        Paragraph::new(Line::from(label))
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
        left,
    );

    frame.render_widget(
        Paragraph::new(counters_line(round, info, usize::from(right.width)))
            .alignment(Alignment::Right),
        right,
    );
}

/// Builds the counters, dropping trailing fields that do not fit `available`.
fn counters_line(round: &RoundLifecycle, info: HudInfo, available: usize) -> Line<'static> {
    let grid = round.grid();
    let length = round.snake().map_or(0, |snake| snake.len());
    let mut fields = vec![
        ("Score", round.score().to_string()),
        ("Length", length.to_string()),
        ("Grid", format!("{}x{}", grid.width, grid.height)),
        ("Tick", format!("{}ms", info.tick_interval.as_millis())),
    ];
    if info.mouse_enabled {
        fields.push(("Mouse", "on".to_owned()));
    }

    let mut spans = Vec::new();
    let mut used = 0;
    for (label, value) in fields {
        let separator = if spans.is_empty() { "" } else { "  " };
        let text = format!("{separator}{label} ");
        let width = text.width() + value.width();
        if used + width > available {
            break;
        }
        used += width;

        spans.push(Span::styled(text, Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            value,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    }

    Line::from(spans)
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::layout::Rect;

    use super::{counters_line, split_area, HudInfo};
    use crate::config::GridSize;
    use crate::round::RoundLifecycle;

    const INFO: HudInfo = HudInfo {
        tick_interval: Duration::from_millis(100),
        mouse_enabled: false,
    };

    fn line_text(round: &RoundLifecycle, available: usize) -> String {
        counters_line(round, INFO, available)
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    #[test]
    fn hud_row_sits_below_play_area() {
        let (play, hud) = split_area(Rect::new(0, 0, 80, 24));

        assert_eq!(play, Rect::new(0, 0, 80, 23));
        assert_eq!(hud, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn counters_show_every_field_when_wide() {
        let round = RoundLifecycle::new(
            GridSize {
                width: 20,
                height: 20,
            },
            Some(1),
        );

        assert_eq!(
            line_text(&round, 80),
            "Score 0  Length 0  Grid 20x20  Tick 100ms"
        );
    }

    #[test]
    fn counters_drop_fields_that_do_not_fit() {
        let round = RoundLifecycle::new(
            GridSize {
                width: 20,
                height: 20,
            },
            Some(1),
        );

        assert_eq!(line_text(&round, 18), "Score 0  Length 0");
    }
}
