//! Terminal event handling.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent};

use crate::app::App;
use crate::data::TimeRange;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // While the edit dialog is open only closing keys are handled;
    // polling stays suspended until it closes
    if app.edit_open {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('e') => {
                app.close_edit();
            }
            _ => {}
        }
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // Time-range tabs
        KeyCode::Left | KeyCode::Char('h') => {
            app.request_range(app.selected_range().prev());
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.request_range(app.selected_range().next());
        }
        KeyCode::Char(c @ '1'..='7') => {
            let index = (c as usize) - ('1' as usize);
            app.request_range(TimeRange::ALL[index]);
        }

        // Manual refresh
        KeyCode::Char('r') => {
            app.refresh_now();
            app.set_status_message("Refreshing...".to_string());
        }

        // Edit dialog (suspends polling while open)
        KeyCode::Char('e') => app.open_edit(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}
