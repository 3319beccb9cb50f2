use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::app::{App, Phase};
use crate::config::{
    Theme, BORDER_PLAIN, CELL_WIDTH, GLYPH_EMPTY, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_DEAD,
    GLYPH_SNAKE_HEAD_DOWN, GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP,
    GLYPH_SNAKE_TAIL, THEME_CLASSIC,
};
use crate::grid::{Cell, GridSize};
use crate::input::Direction;
use crate::snake::Position;
use crate::snapshot::Snapshot;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_countdown, render_game_over_menu};

/// Renders the full frame from the app's current state.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let theme = &THEME_CLASSIC;
    let snapshot = app.engine().snapshot();
    let area = frame.area();

    let [board_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
    render_hud(frame, hud_area, &snapshot, app.best_score(), theme);

    let play_area = centered_board(board_area, snapshot.size);
    let block = Block::bordered()
        .border_set(BORDER_PLAIN)
        .border_style(Style::new().fg(theme.border_fg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_cells(frame, inner, &snapshot, theme);
    render_snake(frame, inner, &snapshot, app.phase(), theme);

    match app.phase() {
        Phase::Countdown { remaining } => render_countdown(frame, play_area, remaining, theme),
        Phase::GameOver => render_game_over_menu(
            frame,
            play_area,
            snapshot.score,
            app.best_score(),
            snapshot.death_reason,
            theme,
        ),
        Phase::Playing | Phase::DeathReveal { .. } => {}
    }
}

fn centered_board(area: Rect, size: GridSize) -> Rect {
    let width = size
        .cols
        .saturating_mul(CELL_WIDTH)
        .saturating_add(2)
        .min(area.width);
    let height = size.rows.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_cells(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let buffer = frame.buffer_mut();
    for position in snapshot.size.positions() {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.size, position) else {
            continue;
        };

        match snapshot.cell(position) {
            Some(Cell::Food) => {
                buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food).bg(theme.play_bg));
            }
            Some(Cell::Empty) => {
                buffer.set_string(x, y, GLYPH_EMPTY, Style::new().bg(theme.play_bg));
            }
            Some(Cell::SnakeBody) | None => {}
        }
    }
}

fn render_snake(
    frame: &mut Frame<'_>,
    inner: Rect,
    snapshot: &Snapshot,
    phase: Phase,
    theme: &Theme,
) {
    let dead_count = match phase {
        Phase::DeathReveal { revealed } => revealed,
        Phase::GameOver => snapshot.body.len(),
        Phase::Countdown { .. } | Phase::Playing => 0,
    };
    let last = snapshot.body.len().saturating_sub(1);

    let buffer = frame.buffer_mut();
    for (index, segment) in snapshot.body.iter().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.size, *segment) else {
            continue;
        };

        let (glyph, style) = if index < dead_count {
            (GLYPH_SNAKE_DEAD, Style::new().fg(theme.snake_dead))
        } else if index == 0 {
            (
                head_glyph(snapshot.heading),
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            )
        } else if index == last {
            (GLYPH_SNAKE_TAIL, Style::new().fg(theme.snake_tail))
        } else {
            (GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body))
        };

        buffer.set_string(x, y, glyph, style.bg(theme.play_bg));
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, size: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(size) {
        return None;
    }

    let x_offset = u16::try_from(position.col).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.row).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::Terminal;

    use crate::app::{App, AppSettings};
    use crate::config::{GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP};
    use crate::grid::GridSize;
    use crate::input::Direction;
    use crate::snake::Position;

    use super::{head_glyph, logical_to_terminal, render};

    #[test]
    fn head_glyph_follows_heading() {
        assert_eq!(head_glyph(Direction::Up), GLYPH_SNAKE_HEAD_UP);
        assert_eq!(head_glyph(Direction::Right), GLYPH_SNAKE_HEAD_RIGHT);
    }

    #[test]
    fn logical_positions_map_to_double_width_cells() {
        let inner = Rect::new(1, 1, 10, 5);
        let size = GridSize { rows: 5, cols: 5 };

        assert_eq!(logical_to_terminal(inner, size, Position::new(0, 0)), Some((1, 1)));
        assert_eq!(logical_to_terminal(inner, size, Position::new(2, 3)), Some((7, 3)));
        assert_eq!(logical_to_terminal(inner, size, Position::new(5, 0)), None);
    }

    #[test]
    fn clipped_cells_are_skipped() {
        let inner = Rect::new(0, 0, 4, 2);
        let size = GridSize { rows: 5, cols: 5 };

        assert_eq!(logical_to_terminal(inner, size, Position::new(0, 2)), None);
        assert_eq!(logical_to_terminal(inner, size, Position::new(2, 0)), None);
    }

    #[test]
    fn full_frame_renders_without_panicking() {
        let app = App::new(
            AppSettings {
                rows: 15,
                cols: 15,
                tick_interval: std::time::Duration::from_millis(100),
                seed: Some(1),
            },
            Instant::now(),
        )
        .expect("valid settings");
        let mut terminal =
            Terminal::new(TestBackend::new(40, 20)).expect("test backend never fails");

        terminal
            .draw(|frame| render(frame, &app))
            .expect("draw into test backend");
    }

    #[test]
    fn tiny_terminal_renders_without_panicking() {
        let app = App::new(
            AppSettings {
                rows: 30,
                cols: 30,
                tick_interval: std::time::Duration::from_millis(100),
                seed: Some(2),
            },
            Instant::now(),
        )
        .expect("valid settings");
        let mut terminal = Terminal::new(TestBackend::new(8, 4)).expect("test backend never fails");

        terminal
            .draw(|frame| render(frame, &app))
            .expect("draw into test backend");
    }
}
