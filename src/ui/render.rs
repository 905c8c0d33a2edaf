use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::ui::Snapshot;

/// Key help shown under the messages.
pub const KEY_HELP: &str = "q quit | space pause | n step";

fn grid_panel<'a>(title: &'a str, rows: &'a [String]) -> Paragraph<'a> {
    let text: Vec<Line> = rows
        .iter()
        .map(|s| Line::from(Span::raw(s.as_str())))
        .collect();
    Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(Color::White).bg(Color::Black))
}

/// Height a grid panel needs, borders included.
#[must_use]
pub fn panel_height(rows: &[String]) -> u16 {
    u16::try_from(rows.len()).unwrap_or(u16::MAX).saturating_add(2)
}

pub fn draw_ui(f: &mut Frame, snapshot: &Snapshot) {
    let grid_height = panel_height(&snapshot.beliefs).max(panel_height(&snapshot.cave));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // HUD
            Constraint::Length(grid_height), // Grids
            Constraint::Min(0),              // Messages
        ])
        .split(f.area());

    let hud = Paragraph::new(Span::styled(
        snapshot.hud.as_str(),
        Style::default().add_modifier(Modifier::REVERSED),
    ));
    f.render_widget(hud, chunks[0]);

    let grids = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    f.render_widget(grid_panel("Beliefs", &snapshot.beliefs), grids[0]);
    f.render_widget(grid_panel("Cave", &snapshot.cave), grids[1]);

    draw_messages(f, snapshot, chunks[2]);
}

fn draw_messages(f: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let mut lines: Vec<Line> = snapshot
        .messages
        .iter()
        .map(|m| Line::from(Span::raw(m.as_str())))
        .collect();
    lines.push(Line::from(Span::styled(
        KEY_HELP,
        Style::default().fg(Color::DarkGray),
    )));
    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::TOP).title("Log"));
    f.render_widget(panel, area);
}
