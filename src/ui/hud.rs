use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::config::Theme;
use crate::snapshot::Snapshot;

/// Renders the one-line status bar under the board.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot, best: u32, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(info_line(snapshot, best, theme)).alignment(Alignment::Center),
        area,
    );
}

fn info_line(snapshot: &Snapshot, best: u32, theme: &Theme) -> Line<'static> {
    let label = Style::new().fg(theme.hud_muted);
    let value = Style::new()
        .fg(theme.hud_score)
        .add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled("Score ", label),
        Span::styled(snapshot.score.to_string(), value),
        Span::styled("  Length ", label),
        Span::styled(snapshot.body.len().to_string(), value),
        Span::styled("  Best ", label),
        Span::styled(best.max(snapshot.score).to_string(), value),
        Span::styled(
            format!("  {}x{}", snapshot.size.rows, snapshot.size.cols),
            label,
        ),
    ])
}
