use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use crate::ops::Enquiry;
use crate::tui::app::{App, ContactField, Mode};

/// Typing into the enquiry form. Tab cycles fields (back to the items
/// list after Message), ctrl-s sends once the form is complete.
pub fn handle(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
        send_general(app);
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.contact_state.focus = ContactField::Items;
            app.mode = Mode::Navigate;
        }
        KeyCode::Tab => {
            app.contact_state.focus = app.contact_state.focus.next();
            if app.contact_state.focus == ContactField::Items {
                app.mode = Mode::Navigate;
            }
        }
        KeyCode::Backspace => {
            if let Some(field) = focused_field(app) {
                field.pop();
            }
        }
        KeyCode::Enter => {
            // only the message is multi-line; Enter elsewhere advances
            if app.contact_state.focus == ContactField::Message {
                app.contact_state.message.push('\n');
            } else {
                app.contact_state.focus = app.contact_state.focus.next();
            }
        }
        KeyCode::Char(c) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && let Some(field) = focused_field(app)
            {
                field.push(c);
            }
        }
        _ => {}
    }
}

fn focused_field(app: &mut App) -> Option<&mut String> {
    match app.contact_state.focus {
        ContactField::Name => Some(&mut app.contact_state.name),
        ContactField::Email => Some(&mut app.contact_state.email),
        ContactField::Message => Some(&mut app.contact_state.message),
        ContactField::Items => None,
    }
}

fn send_general(app: &mut App) {
    if !app.contact_state.can_send() {
        app.set_status("Fill in name, email, and message first");
        return;
    }
    let enquiry = Enquiry::general(
        &app.config.shop,
        &app.contact_state.name,
        &app.contact_state.email,
        &app.contact_state.message,
    );
    match enquiry.send() {
        Ok(()) => app.set_status("Opening your mail client\u{2026}"),
        Err(e) => {
            warn!(error = %e, "mail client failed to open");
            app.set_status(format!("Could not open mail client: {}", e));
        }
    }
}
