use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};

use crate::anim::{LineField, MIN_VISIBLE_ALPHA, Shape};
use crate::tui::app::App;
use crate::tui::theme::Theme;

/// Home: animated hero banner with the shop pitch over it, a short
/// capabilities blurb, and an animated section divider.
pub fn render_home_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let now = app.now();
    let theme = app.theme.clone();
    let shop_name = app.config.shop.name.clone();
    let tagline = app.config.shop.tagline.clone();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Min(6),
            Constraint::Length(4),
        ])
        .split(area);

    let Some(home) = app.home.as_mut() else {
        return;
    };
    home.ensure_hero(chunks[0]);
    home.ensure_divider(chunks[2]);

    render_field(
        frame,
        &home.hero,
        chunks[0],
        theme.hero_line,
        theme.hero_line_alpha,
        &theme,
        now,
    );
    render_hero_text(frame, &theme, &shop_name, &tagline, chunks[0]);
    render_capabilities(frame, &theme, chunks[1]);
    render_field(
        frame,
        &home.divider,
        chunks[2],
        theme.break_line,
        theme.break_line_alpha,
        &theme,
        now,
    );
}

/// Draw one animation field as a Braille canvas. Fade is emulated by
/// mixing each segment's color toward the background.
fn render_field(
    frame: &mut Frame,
    field: &LineField,
    area: Rect,
    line_color: Color,
    alpha_scale: f64,
    theme: &Theme,
    now: f64,
) {
    let height = f64::from(area.height) * 4.0;
    let width = f64::from(area.width) * 2.0;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            for seg in field.segments() {
                let alpha = seg.alpha(now, alpha_scale);
                if alpha < MIN_VISIBLE_ALPHA {
                    continue;
                }
                let color = theme.fade(line_color, alpha);
                // engine y grows downward, canvas y grows upward
                match seg.shape {
                    Shape::Line { from, to } => ctx.draw(&CanvasLine {
                        x1: from.0,
                        y1: height - from.1,
                        x2: to.0,
                        y2: height - to.1,
                        color,
                    }),
                    Shape::Dot { center, radius } => ctx.draw(&Circle {
                        x: center.0,
                        y: height - center.1,
                        radius,
                        color,
                    }),
                }
            }
        });
    frame.render_widget(canvas, area);
}

fn render_hero_text(frame: &mut Frame, theme: &Theme, shop_name: &str, tagline: &str, area: Rect) {
    if area.height < 4 {
        return;
    }
    let text_height = 3u16;
    let top = area.y + (area.height - text_height) / 2;
    let inner = Rect::new(area.x, top, area.width, text_height);

    let lines = vec![
        Line::from(Span::styled(
            "Anything's Possible",
            Style::default()
                .fg(theme.text_bright)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} — {}", shop_name, tagline),
            Style::default().fg(theme.text),
        )),
    ];
    let overlay = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(overlay, inner);
}

fn render_capabilities(frame: &mut Frame, theme: &Theme, area: Rect) {
    let header = Style::default()
        .fg(theme.text_bright)
        .add_modifier(Modifier::BOLD);
    let body = Style::default().fg(theme.text);
    let dim = Style::default().fg(theme.dim);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("  From idea to integrated systems", header)),
        Line::from(""),
        Line::from(vec![
            Span::styled("  \u{2022} Pick & place  ", body),
            Span::styled("high speed SMT placement for prototypes and production", dim),
        ]),
        Line::from(vec![
            Span::styled("  \u{2022} Assembly      ", body),
            Span::styled("through-hole and odd-form builds on our own lines", dim),
        ]),
        Line::from(vec![
            Span::styled("  \u{2022} Repair        ", body),
            Span::styled("automotive, marine, and industrial electronics", dim),
        ]),
        Line::from(vec![
            Span::styled("  \u{2022} Design        ", body),
            Span::styled("R&D from schematic to finished product", dim),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Press 2 to explore products \u{00B7} 3 to get in contact \u{00B7} click or r to reshuffle the lines",
            dim,
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
