use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

const KEYS: [(&str, &str); 12] = [
    ("1 / 2 / 3", "switch to Home / Catalog / Contact"),
    ("j / k", "move down / up"),
    ("g / G", "jump to top / bottom"),
    ("/", "search the catalog"),
    ("a or Enter", "add the highlighted product"),
    ("+ / -", "adjust quantity (0 removes)"),
    ("x", "remove the highlighted item"),
    ("C", "clear the whole selection"),
    ("e", "email the selection"),
    ("r or click", "reshuffle the home animation"),
    ("Tab", "cycle enquiry form fields"),
    ("q", "quit"),
];

pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let width = 56.min(area.width.saturating_sub(2));
    let height = (KEYS.len() as u16 + 4).min(area.height.saturating_sub(2));
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    let mut lines = vec![Line::from("")];
    for (key, action) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<12}", key),
                Style::default()
                    .fg(app.theme.text_bright)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(action, Style::default().fg(app.theme.text)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  any key to close",
        Style::default().fg(app.theme.dim),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" keys ")
        .border_style(Style::default().fg(app.theme.highlight))
        .style(Style::default().bg(app.theme.background));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
