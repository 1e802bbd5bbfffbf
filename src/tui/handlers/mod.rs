//! Input handler modules for different TUI contexts.

pub mod actions;
pub mod popups;

use anyhow::Result;
use crossterm::event::{self, KeyCode};

use crate::tui::AppState;

pub use actions::dispatch_action;
pub use popups::handle_popup_input;

/// Handle input for main UI
pub fn handle_main_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match state.shortcuts.lookup("main", key) {
        Some(action) => dispatch_action(state, action),
        // No action mapped - ignore key
        None => Ok(false),
    }
}

/// Handle typing into the catalog filter
pub fn handle_search_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            state.search_active = false;
            let count = state.visible_catalog().len();
            state.set_status(format!("{count} device(s) match '{}'", state.catalog_query));
        }
        KeyCode::Esc => {
            state.search_active = false;
            state.catalog_query.clear();
            state.set_status("Filter cleared");
        }
        KeyCode::Backspace => {
            state.catalog_query.pop();
        }
        KeyCode::Char(c) => {
            state.catalog_query.push(c);
        }
        _ => {}
    }

    state.catalog_cursor = 0;
    state.clamp_cursors();
    Ok(false)
}
