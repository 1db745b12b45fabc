mod form;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use super::app::{App, Mode};

/// Handle a key event in the current mode.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if app.show_help {
        app.show_help = false;
        return;
    }
    app.status = None;

    match app.mode {
        Mode::Navigate => navigate::handle(app, key),
        Mode::Search => search::handle(app, key),
        Mode::Form => form::handle(app, key),
    }
}

/// A click on either animated surface reshuffles that field; its
/// in-flight segments keep fading.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
        return;
    }
    let pos = Position { x: mouse.column, y: mouse.row };
    if let Some(home) = &mut app.home {
        if home.hero_area.contains(pos) {
            home.hero.reset();
        } else if home.divider_area.contains(pos) {
            home.divider.reset();
        }
    }
}
