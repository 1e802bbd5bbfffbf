//! Popup input handlers.

use anyhow::Result;
use crossterm::event::{self, KeyCode};

use super::actions;
use crate::tui::{AppState, PopupType};

/// Route input to the active popup
pub fn handle_popup_input(
    state: &mut AppState,
    popup: PopupType,
    key: event::KeyEvent,
) -> Result<bool> {
    match popup {
        PopupType::HelpOverlay => handle_help_input(state, key),
        PopupType::UnsavedChangesPrompt => handle_unsaved_prompt_input(state, key),
    }
}

fn handle_help_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    if matches!(
        key.code,
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?' | 'q')
    ) {
        state.active_popup = None;
    }
    Ok(false)
}

fn handle_unsaved_prompt_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('s' | 'S') => {
            state.active_popup = None;
            actions::save(state);
            // Stay open if the save failed so nothing is lost
            Ok(!state.dirty)
        }
        KeyCode::Char('q' | 'Q') => {
            tracing::info!("quit without saving");
            Ok(true)
        }
        KeyCode::Esc => {
            state.active_popup = None;
            state.set_status("Quit cancelled");
            Ok(false)
        }
        _ => Ok(false),
    }
}
