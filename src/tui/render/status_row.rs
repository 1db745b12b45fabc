use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, ContactField, Mode, View};

/// Bottom row: key hints on the left, the latest status message on the
/// right.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;
    let hints = if app.config.ui.show_key_hints {
        hint_text(app)
    } else {
        ""
    };

    let mut spans = vec![Span::styled(
        format!(" {}", hints),
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    )];

    if let Some(status) = &app.status {
        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let status_width = status.chars().count() + 1;
        if used + status_width < width {
            spans.push(Span::styled(
                " ".repeat(width - used - status_width),
                Style::default().bg(app.theme.background),
            ));
        }
        spans.push(Span::styled(
            format!("{} ", status),
            Style::default().fg(app.theme.yellow).bg(app.theme.background),
        ));
    }

    let row = Paragraph::new(Line::from(spans)).style(Style::default().bg(app.theme.background));
    frame.render_widget(row, area);
}

fn hint_text(app: &App) -> &'static str {
    match (app.view, app.mode) {
        (_, Mode::Search) => "Enter apply \u{00B7} Esc cancel",
        (View::Home, _) => "1/2/3 views \u{00B7} r reshuffle \u{00B7} ? help \u{00B7} q quit",
        (View::Catalog, _) => {
            "j/k move \u{00B7} / search \u{00B7} a add \u{00B7} 1/2/3 views \u{00B7} ? help \u{00B7} q quit"
        }
        (View::Contact, Mode::Form) => "Tab next field \u{00B7} ctrl-s send \u{00B7} Esc back",
        (View::Contact, _) => {
            if app.contact_state.focus == ContactField::Items {
                "j/k move \u{00B7} +/- qty \u{00B7} x remove \u{00B7} C clear \u{00B7} e email selection \u{00B7} Tab form"
            } else {
                "Tab next field \u{00B7} ctrl-s send \u{00B7} Esc back"
            }
        }
    }
}
