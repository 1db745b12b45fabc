use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::truncate_to_width;

/// Catalog browser: filter row, product rows, and a detail footer for
/// the highlighted item.
pub fn render_catalog_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // filter row
            Constraint::Min(1),    // rows
            Constraint::Length(2), // detail footer
        ])
        .split(area);

    render_filter_row(frame, app, chunks[0]);

    let list_height = chunks[1].height as usize;
    let items = app.visible_catalog();
    let total = items.len();
    let cursor = app.catalog_state.cursor.min(total.saturating_sub(1));

    // keep the cursor inside the visible window
    let mut scroll = app.catalog_state.scroll.min(cursor);
    if list_height > 0 && cursor >= scroll + list_height {
        scroll = cursor + 1 - list_height;
    }

    let width = chunks[1].width as usize;
    let mut lines: Vec<Line> = Vec::with_capacity(list_height);
    for (idx, item) in items.iter().enumerate().skip(scroll).take(list_height) {
        let is_cursor = idx == cursor && total > 0;
        let row_bg = if is_cursor { app.theme.selection_bg } else { app.theme.background };
        let base = Style::default().bg(row_bg);

        let mut spans: Vec<Span> = Vec::new();
        let marker = if app.is_selected(&item.partnumber) { "+" } else { " " };
        spans.push(Span::styled(
            format!(" {} ", marker),
            base.fg(app.theme.green),
        ));
        spans.push(Span::styled(
            truncate_to_width(&item.title, 34),
            base.fg(if is_cursor { app.theme.text_bright } else { app.theme.text })
                .add_modifier(if is_cursor { Modifier::BOLD } else { Modifier::empty() }),
        ));
        spans.push(Span::styled(
            format!("  {}", item.partnumber),
            base.fg(app.theme.badge),
        ));
        spans.push(Span::styled(
            format!("  ({})", item.category),
            base.fg(app.theme.dim),
        ));
        if let Some(retail) = item.retail_price_text() {
            spans.push(Span::styled(format!("  {}", retail), base.fg(app.theme.green)));
        }
        if let Some(member) = item.member_price_text() {
            spans.push(Span::styled(
                format!(" / {} trade", member),
                base.fg(app.theme.yellow),
            ));
        }
        for tag in &item.tags {
            spans.push(Span::styled(format!(" #{}", tag), base.fg(app.theme.tag)));
        }

        // pad the row so the cursor background reaches the right edge
        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        if used < width {
            spans.push(Span::styled(" ".repeat(width - used), base));
        }
        lines.push(Line::from(spans));
    }

    if total == 0 {
        let message = if app.catalog_state.query.is_empty() {
            "The catalog is empty.".to_string()
        } else {
            format!("No products match '{}'.", app.catalog_state.query)
        };
        lines.push(Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(app.theme.dim),
        )));
    }

    let detail = items.get(cursor).map(|item| {
        let mut parts = Vec::new();
        if !item.description.is_empty() {
            parts.push(item.description.replace('\n', " "));
        }
        if !item.instruction_sheet.is_empty() {
            parts.push(format!("sheet: {}", item.instruction_sheet));
        }
        for link in &item.extra_links {
            parts.push(format!("{}: {}", link.label, link.url));
        }
        parts.join("  \u{00B7}  ")
    });

    frame.render_widget(Paragraph::new(lines), chunks[1]);
    render_detail_footer(frame, app, chunks[2], detail);

    app.catalog_state.cursor = cursor;
    app.catalog_state.scroll = scroll;
}

fn render_filter_row(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.mode {
        Mode::Search => Line::from(vec![
            Span::styled(" /", Style::default().fg(app.theme.highlight)),
            Span::styled(
                app.catalog_state.search_input.clone(),
                Style::default().fg(app.theme.text_bright),
            ),
            Span::styled("\u{258F}", Style::default().fg(app.theme.highlight)),
        ]),
        _ if !app.catalog_state.query.is_empty() => Line::from(vec![
            Span::styled(" filter: ", Style::default().fg(app.theme.dim)),
            Span::styled(
                app.catalog_state.query.clone(),
                Style::default().fg(app.theme.text_bright),
            ),
            Span::styled(
                "  (Esc clears)",
                Style::default().fg(app.theme.dim),
            ),
        ]),
        _ => Line::from(Span::styled(
            " / to search",
            Style::default().fg(app.theme.dim),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_detail_footer(frame: &mut Frame, app: &App, area: Rect, detail: Option<String>) {
    let width = area.width as usize;
    let text = detail.unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(
            "\u{2500}".repeat(width),
            Style::default().fg(app.theme.dim),
        )),
        Line::from(Span::styled(
            format!(" {}", truncate_to_width(&text, width.saturating_sub(2))),
            Style::default().fg(app.theme.dim),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
