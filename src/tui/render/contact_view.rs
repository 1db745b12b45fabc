use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, ContactField};
use crate::util::unicode::truncate_to_width;

/// Contact: the selected-items panel, the free-form enquiry form, and
/// the shop's contact details side by side.
pub fn render_contact_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(11)])
        .split(area);

    render_items_panel(frame, app, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(chunks[1]);
    render_form(frame, app, columns[0]);
    render_shop_info(frame, app, columns[1]);
}

fn render_items_panel(frame: &mut Frame, app: &mut App, area: Rect) {
    let width = area.width as usize;
    let items_focused = app.contact_state.focus == ContactField::Items;

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        " Your selected items",
        Style::default()
            .fg(app.theme.text_bright)
            .add_modifier(Modifier::BOLD),
    )));

    if app.selection.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Nothing here yet — browse the catalog (2) and press a to add.",
            Style::default().fg(app.theme.dim),
        )));
        frame.render_widget(Paragraph::new(lines), area);
        return;
    }

    let list_height = (area.height as usize).saturating_sub(1);
    let total = app.selection.len();
    let cursor = app.contact_state.cursor.min(total - 1);
    let mut scroll = app.contact_state.scroll.min(cursor);
    if list_height > 0 && cursor >= scroll + list_height {
        scroll = cursor + 1 - list_height;
    }

    for (idx, item) in app.selection.iter().enumerate().skip(scroll).take(list_height) {
        let is_cursor = items_focused && idx == cursor;
        let row_bg = if is_cursor { app.theme.selection_bg } else { app.theme.background };
        let base = Style::default().bg(row_bg);

        let mut spans = vec![
            Span::styled(
                format!(" {} ", if is_cursor { "\u{25B8}" } else { " " }),
                base.fg(app.theme.highlight),
            ),
            Span::styled(
                truncate_to_width(&item.title, 36),
                base.fg(if is_cursor { app.theme.text_bright } else { app.theme.text }),
            ),
            Span::styled(format!("  {}", item.partnumber), base.fg(app.theme.badge)),
            Span::styled("  qty ", base.fg(app.theme.dim)),
            Span::styled(
                item.qty.to_string(),
                base.fg(app.theme.green).add_modifier(Modifier::BOLD),
            ),
        ];
        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        if used < width {
            spans.push(Span::styled(" ".repeat(width - used), base));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
    app.contact_state.cursor = cursor;
    app.contact_state.scroll = scroll;
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let state = &app.contact_state;
    let label = |field: ContactField, text: &str| -> Span<'static> {
        if state.focus == field {
            Span::styled(
                format!(" {} ", text),
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(app.theme.selection_bg)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {} ", text), Style::default().fg(app.theme.dim))
        }
    };
    let value = |field: ContactField, text: &str| -> Span<'static> {
        // the message may hold newlines; keep the field on one row
        let mut shown = text.replace('\n', " \u{23CE} ");
        if state.focus == field {
            shown.push('\u{258F}');
        }
        Span::styled(shown, Style::default().fg(app.theme.text))
    };

    let mut lines = vec![
        Line::from(Span::styled(
            " Something else?",
            Style::default()
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            " Repairs, quotes, R&D ideas — Tab moves between fields.",
            Style::default().fg(app.theme.dim),
        )),
        Line::from(""),
        Line::from(vec![label(ContactField::Name, "Name    "), value(ContactField::Name, &state.name)]),
        Line::from(vec![label(ContactField::Email, "Email   "), value(ContactField::Email, &state.email)]),
        Line::from(vec![
            label(ContactField::Message, "Message "),
            value(ContactField::Message, &state.message),
        ]),
        Line::from(""),
    ];

    if state.can_send() {
        lines.push(Line::from(Span::styled(
            " ctrl-s to email us",
            Style::default().fg(app.theme.green),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            " name, email, and message are all needed before sending",
            Style::default().fg(app.theme.dim),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_shop_info(frame: &mut Frame, app: &App, area: Rect) {
    let shop = &app.config.shop;
    let title = Style::default()
        .fg(app.theme.text_bright)
        .add_modifier(Modifier::BOLD);
    let body = Style::default().fg(app.theme.text);
    let dim = Style::default().fg(app.theme.dim);

    let mut lines = vec![
        Line::from(Span::styled(" Contact information", title)),
        Line::from(""),
        Line::from(Span::styled(format!(" {}", shop.name), body)),
    ];
    for addr_line in shop.address.lines() {
        lines.push(Line::from(Span::styled(format!(" {}", addr_line), dim)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(format!(" {}", shop.phone), body)));
    lines.push(Line::from(Span::styled(format!(" {}", shop.email), body)));

    frame.render_widget(Paragraph::new(lines), area);
}
