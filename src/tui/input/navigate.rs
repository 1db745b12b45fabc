use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use crate::ops::Enquiry;
use crate::tui::app::{App, ContactField, Mode, View};

pub fn handle(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
            return;
        }
        KeyCode::Char('1') => {
            app.enter_view(View::Home);
            return;
        }
        KeyCode::Char('2') => {
            app.enter_view(View::Catalog);
            return;
        }
        KeyCode::Char('3') => {
            app.enter_view(View::Contact);
            return;
        }
        _ => {}
    }

    match app.view {
        View::Home => handle_home(app, key),
        View::Catalog => handle_catalog(app, key),
        View::Contact => handle_contact(app, key),
    }
}

fn handle_home(app: &mut App, key: KeyEvent) {
    if let KeyCode::Char('r') = key.code {
        app.reset_animations();
    }
}

fn handle_catalog(app: &mut App, key: KeyEvent) {
    let total = app.visible_catalog().len();
    let state = &mut app.catalog_state;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if total > 0 {
                state.cursor = (state.cursor + 1).min(total - 1);
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.cursor = state.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') => state.cursor = 0,
        KeyCode::Char('G') => state.cursor = total.saturating_sub(1),
        KeyCode::Char('/') => {
            state.search_input = state.query.clone();
            app.mode = Mode::Search;
        }
        KeyCode::Esc => {
            state.query.clear();
            state.cursor = 0;
            state.scroll = 0;
        }
        KeyCode::Char('a') | KeyCode::Enter => add_highlighted(app),
        _ => {}
    }
}

fn add_highlighted(app: &mut App) {
    let picked = {
        let items = app.visible_catalog();
        items
            .get(app.catalog_state.cursor)
            .map(|i| (i.partnumber.clone(), i.title.clone(), i.image.clone()))
    };
    let Some((partnumber, title, image)) = picked else {
        return;
    };
    app.store.add_item(partnumber.clone(), title, image);
    app.set_status(format!("Added {} to your enquiry", partnumber));
}

fn handle_contact(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab => {
            app.contact_state.focus = app.contact_state.focus.next();
            if app.contact_state.focus != ContactField::Items {
                app.mode = Mode::Form;
            }
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let total = app.selection.len();
            if total > 0 {
                app.contact_state.cursor = (app.contact_state.cursor + 1).min(total - 1);
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.contact_state.cursor = app.contact_state.cursor.saturating_sub(1);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => bump_quantity(app, 1.0),
        KeyCode::Char('-') => bump_quantity(app, -1.0),
        KeyCode::Char('x') => remove_highlighted(app),
        KeyCode::Char('C') => {
            app.store.clear();
            app.set_status("Selection cleared");
        }
        KeyCode::Char('e') => email_selection(app),
        _ => {}
    }
}

/// Adjust the highlighted row's quantity through the store, so driving
/// it to zero removes the row.
fn bump_quantity(app: &mut App, delta: f64) {
    let Some(item) = app.selection.get(app.contact_state.cursor) else {
        return;
    };
    let partnumber = item.partnumber.clone();
    let qty = f64::from(item.qty) + delta;
    app.store.update_quantity(&partnumber, qty);
}

fn remove_highlighted(app: &mut App) {
    let Some(item) = app.selection.get(app.contact_state.cursor) else {
        return;
    };
    let partnumber = item.partnumber.clone();
    app.store.remove_item(&partnumber);
    app.set_status(format!("Removed {}", partnumber));
}

fn email_selection(app: &mut App) {
    if app.selection.is_empty() {
        app.set_status("Nothing selected to enquire about");
        return;
    }
    let enquiry = Enquiry::for_selection(&app.config.shop, &app.selection);
    match enquiry.send() {
        Ok(()) => app.set_status("Opening your mail client\u{2026}"),
        Err(e) => {
            warn!(error = %e, "mail client failed to open");
            app.set_status(format!("Could not open mail client: {}", e));
        }
    }
}
