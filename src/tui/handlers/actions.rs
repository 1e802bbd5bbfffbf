//! Action dispatch for the main editor screen.

use anyhow::Result;
use std::fs;

use crate::export::{default_export_path, export_to_markdown};
use crate::services::{bill_of_materials, format_bom_text, PanelService};
use crate::shortcuts::Action;
use crate::tui::{clipboard, AppState, Focus, PopupType};

/// Applies an action. Returns `true` when the editor should exit.
pub fn dispatch_action(state: &mut AppState, action: Action) -> Result<bool> {
    tracing::trace!(action = action.id(), "dispatch");

    match action {
        Action::NavigateUp => move_cursor(state, -1),
        Action::NavigateDown => move_cursor(state, 1),
        Action::JumpToFirst => move_cursor(state, isize::MIN),
        Action::JumpToLast => move_cursor(state, isize::MAX),
        Action::SwitchFocus => {
            state.focus = state.focus.toggled();
            state.clamp_cursors();
        }
        Action::NextGroup => switch_group(state, true),
        Action::PreviousGroup => switch_group(state, false),
        Action::Search => {
            state.focus = Focus::Catalog;
            state.search_active = true;
            state.set_status("Type to filter, Enter: apply, Esc: clear");
        }
        Action::Activate => match state.focus {
            Focus::Catalog => add_from_catalog(state),
            Focus::Panel => toggle_selection(state),
        },
        Action::Remove => remove_device(state),
        Action::ClearAll => clear_all(state),
        Action::ToggleView => {
            state.view_mode = state.view_mode.toggled();
            state.set_status(format!("View: {}", state.view_mode));
        }
        Action::Save => save(state),
        Action::Export => export(state),
        Action::CopyBom => copy_bom(state),
        Action::Quit => {
            if state.dirty {
                state.active_popup = Some(PopupType::UnsavedChangesPrompt);
            } else {
                return Ok(true);
            }
        }
        Action::ToggleHelp => {
            state.active_popup = match state.active_popup {
                Some(PopupType::HelpOverlay) => None,
                _ => Some(PopupType::HelpOverlay),
            };
        }
        Action::Cancel => {
            if !state.catalog_query.is_empty() {
                state.catalog_query.clear();
                state.clamp_cursors();
                state.set_status("Filter cleared");
            } else {
                state.set_status("");
            }
        }
    }

    Ok(false)
}

fn move_cursor(state: &mut AppState, delta: isize) {
    let len = match state.focus {
        Focus::Catalog => state.visible_catalog().len(),
        Focus::Panel => state.project.layout.len(),
    };
    let cursor = match state.focus {
        Focus::Catalog => &mut state.catalog_cursor,
        Focus::Panel => &mut state.panel_cursor,
    };
    if len == 0 {
        *cursor = 0;
        return;
    }
    *cursor = cursor.saturating_add_signed(delta).min(len - 1);
}

fn switch_group(state: &mut AppState, forward: bool) {
    state.catalog_group = if forward {
        state.catalog_group.next()
    } else {
        state.catalog_group.previous()
    };
    state.catalog_cursor = 0;
    state.focus = Focus::Catalog;
    state.set_status(format!("Catalog: {}", state.catalog_group.title()));
}

fn add_from_catalog(state: &mut AppState) {
    let Some(definition) = state.catalog_device().cloned() else {
        state.set_status("No device under cursor");
        return;
    };

    let placed = state.project.add_device(&definition);
    state.mark_dirty();
    state.panel_cursor = state.project.layout.len() - 1;
    state.set_status(format!(
        "Added {} as {} at slot {}",
        placed.device.name,
        placed.instance_id,
        placed.slot_label()
    ));
}

fn toggle_selection(state: &mut AppState) {
    let Some(instance_id) = state.panel_device().map(|placed| placed.instance_id) else {
        state.set_status("Panel is empty");
        return;
    };

    if state.project.layout.selected() == Some(instance_id) {
        state.project.layout.select(None);
        state.set_status("Selection cleared");
    } else {
        state.project.layout.select(Some(instance_id));
        state.set_status(format!("Selected {instance_id}"));
    }
}

fn remove_device(state: &mut AppState) {
    // Catalog focus removes the selected device, panel focus the one under the cursor
    let target = match state.focus {
        Focus::Panel => state.panel_device().map(|placed| placed.instance_id),
        Focus::Catalog => state.project.layout.selected(),
    };
    let Some(instance_id) = target else {
        state.set_status("Nothing to remove");
        return;
    };

    if state.project.remove_device(instance_id) {
        state.mark_dirty();
        state.clamp_cursors();
        state.set_status(format!("Removed {instance_id}"));
    }
}

fn clear_all(state: &mut AppState) {
    let count = state.project.layout.len();
    if count == 0 {
        state.set_status("Panel is already empty");
        return;
    }

    state.project.clear_all();
    state.mark_dirty();
    state.panel_cursor = 0;
    state.set_status(format!("Cleared {count} device(s)"));
}

/// Saves to the source path, or a new file in the configured panels directory.
pub fn save(state: &mut AppState) {
    let path = state.source_path.clone().unwrap_or_else(|| {
        PanelService::default_path(&state.config.panels_dir(), &state.project.metadata.name)
    });

    match PanelService::save(&state.project, &path) {
        Ok(()) => {
            state.mark_clean();
            state.set_status(format!("Saved to {}", path.display()));
            state.source_path = Some(path);
        }
        Err(e) => state.set_error(format!("{e:#}")),
    }
}

fn export(state: &mut AppState) {
    let file_name = default_export_path(&state.project);
    let output_path = match state.source_path.as_ref().and_then(|p| p.parent()) {
        Some(dir) => dir.join(file_name),
        None => file_name,
    };

    match fs::write(&output_path, export_to_markdown(&state.project)) {
        Ok(()) => state.set_status(format!("✓ Exported to: {}", output_path.display())),
        Err(e) => state.set_error(format!(
            "Failed to write {}: {e}",
            output_path.display()
        )),
    }
}

fn copy_bom(state: &mut AppState) {
    let lines = bill_of_materials(&state.project.layout);
    if lines.is_empty() {
        state.set_status("Panel is empty, nothing to copy");
        return;
    }

    match clipboard::copy_text(&format_bom_text(&lines)) {
        Ok(()) => state.set_status(format!("Copied {} BOM line(s) to clipboard", lines.len())),
        Err(e) => state.set_error(format!("Failed to copy to clipboard: {e}")),
    }
}
