use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

/// Typing a catalog query. Enter commits the filter, Esc abandons it.
pub fn handle(app: &mut App, key: KeyEvent) {
    let state = &mut app.catalog_state;
    match key.code {
        KeyCode::Esc => {
            state.search_input.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            state.query = std::mem::take(&mut state.search_input);
            state.cursor = 0;
            state.scroll = 0;
            app.mode = Mode::Navigate;
        }
        KeyCode::Backspace => {
            state.search_input.pop();
        }
        KeyCode::Char(c) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                state.search_input.push(c);
            }
        }
        _ => {}
    }
}
