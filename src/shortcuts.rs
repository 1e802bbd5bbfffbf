//! Centralized shortcut and action system.
//!
//! This module provides a unified system for keyboard shortcuts and actions,
//! connecting help text definitions with actual event handling logic.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// All possible actions in the editor.
///
/// This enum represents every action a user can take. It serves as the
/// bridge between keyboard shortcuts and application behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // === NAVIGATION ===
    /// Move the cursor up in the focused pane
    NavigateUp,
    /// Move the cursor down in the focused pane
    NavigateDown,
    /// Jump to the first entry
    JumpToFirst,
    /// Jump to the last entry
    JumpToLast,
    /// Move focus between catalog and panel
    SwitchFocus,

    // === CATALOG ===
    /// Next catalog tab
    NextGroup,
    /// Previous catalog tab
    PreviousGroup,
    /// Start typing a catalog filter
    Search,

    // === EDITING ===
    /// Add the catalog entry, or select the panel entry, under the cursor
    Activate,
    /// Remove the panel entry under the cursor
    Remove,
    /// Remove every device
    ClearAll,

    // === VIEW ===
    /// Switch between list and rail views
    ToggleView,

    // === FILE OPERATIONS ===
    /// Save the panel file
    Save,
    /// Write the markdown project specification
    Export,
    /// Copy the bill of materials to the clipboard
    CopyBom,
    /// Leave the editor
    Quit,

    // === HELP ===
    /// Show or hide the help overlay
    ToggleHelp,

    // === GENERAL ===
    /// Close popups, clear filters
    Cancel,
}

impl Action {
    /// Stable identifier for the action.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::NavigateUp => "navigate_up",
            Self::NavigateDown => "navigate_down",
            Self::JumpToFirst => "jump_first",
            Self::JumpToLast => "jump_last",
            Self::SwitchFocus => "switch_focus",
            Self::NextGroup => "next_group",
            Self::PreviousGroup => "previous_group",
            Self::Search => "search",
            Self::Activate => "activate",
            Self::Remove => "remove",
            Self::ClearAll => "clear_all",
            Self::ToggleView => "toggle_view",
            Self::Save => "save",
            Self::Export => "export",
            Self::CopyBom => "copy_bom",
            Self::Quit => "quit",
            Self::ToggleHelp => "toggle_help",
            Self::Cancel => "cancel",
        }
    }

    /// One-line description for the help overlay.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::NavigateUp => "Move up",
            Self::NavigateDown => "Move down",
            Self::JumpToFirst => "Jump to first",
            Self::JumpToLast => "Jump to last",
            Self::SwitchFocus => "Switch between catalog and panel",
            Self::NextGroup => "Next catalog group",
            Self::PreviousGroup => "Previous catalog group",
            Self::Search => "Filter catalog",
            Self::Activate => "Add device (catalog) / select device (panel)",
            Self::Remove => "Remove device",
            Self::ClearAll => "Clear all devices",
            Self::ToggleView => "Toggle list / rail view",
            Self::Save => "Save panel",
            Self::Export => "Export markdown specification",
            Self::CopyBom => "Copy bill of materials",
            Self::Quit => "Quit",
            Self::ToggleHelp => "Toggle help",
            Self::Cancel => "Close popup / clear filter",
        }
    }
}

/// A key binding (key + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    /// Key code
    pub code: KeyCode,
    /// Modifier keys held
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Create a new key binding.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key binding from a KeyEvent.
    #[must_use]
    pub const fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }

    /// Short label such as "Ctrl+S" or "Shift+C".
    #[must_use]
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::Delete => "Del".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            other => format!("{other:?}"),
        };

        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", key.to_uppercase())
        } else if self.modifiers.contains(KeyModifiers::SHIFT) && self.code != KeyCode::BackTab {
            format!("Shift+{key}")
        } else {
            key
        }
    }
}

/// Shortcut registry that maps key events to actions for a given context.
///
/// This is the central source of truth for all keyboard shortcuts in the application.
pub struct ShortcutRegistry {
    /// Maps (context, key_binding) to Action
    bindings: HashMap<(String, KeyBinding), Action>,
    /// Registration order, for the help overlay
    order: Vec<(String, KeyBinding, Action)>,
}

impl ShortcutRegistry {
    /// Create a new shortcut registry with default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            bindings: HashMap::new(),
            order: Vec::new(),
        };

        registry.register_main_shortcuts();
        registry
    }

    /// Register all shortcuts for the main context.
    fn register_main_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = "main";

        // === NAVIGATION ===
        self.register(ctx, K::Up, M::NONE, Action::NavigateUp);
        self.register(ctx, K::Down, M::NONE, Action::NavigateDown);
        self.register(ctx, K::Char('k'), M::NONE, Action::NavigateUp);
        self.register(ctx, K::Char('j'), M::NONE, Action::NavigateDown);
        self.register(ctx, K::Home, M::NONE, Action::JumpToFirst);
        self.register(ctx, K::End, M::NONE, Action::JumpToLast);
        self.register(ctx, K::Tab, M::NONE, Action::SwitchFocus);
        self.register(ctx, K::BackTab, M::SHIFT, Action::SwitchFocus);

        // === CATALOG ===
        self.register(ctx, K::Right, M::NONE, Action::NextGroup);
        self.register(ctx, K::Left, M::NONE, Action::PreviousGroup);
        self.register(ctx, K::Char('l'), M::NONE, Action::NextGroup);
        self.register(ctx, K::Char('h'), M::NONE, Action::PreviousGroup);
        self.register(ctx, K::Char('/'), M::NONE, Action::Search);

        // === EDITING ===
        self.register(ctx, K::Enter, M::NONE, Action::Activate);
        self.register(ctx, K::Char(' '), M::NONE, Action::Activate);
        self.register(ctx, K::Char('d'), M::NONE, Action::Remove);
        self.register(ctx, K::Delete, M::NONE, Action::Remove);
        self.register(ctx, K::Char('C'), M::SHIFT, Action::ClearAll);

        // === VIEW ===
        self.register(ctx, K::Char('v'), M::NONE, Action::ToggleView);

        // === FILE OPERATIONS ===
        self.register(ctx, K::Char('s'), M::CONTROL, Action::Save);
        self.register(ctx, K::Char('e'), M::NONE, Action::Export);
        self.register(ctx, K::Char('y'), M::NONE, Action::CopyBom);
        self.register(ctx, K::Char('q'), M::NONE, Action::Quit);
        self.register(ctx, K::Char('q'), M::CONTROL, Action::Quit);

        // === HELP ===
        self.register(ctx, K::Char('?'), M::NONE, Action::ToggleHelp);

        // === GENERAL ===
        self.register(ctx, K::Esc, M::NONE, Action::Cancel);
    }

    /// Register a shortcut binding.
    fn register(&mut self, context: &str, code: KeyCode, modifiers: KeyModifiers, action: Action) {
        let binding = KeyBinding::new(code, modifiers);
        self.bindings.insert((context.to_string(), binding), action);
        self.order.push((context.to_string(), binding, action));
    }

    /// Look up an action for a given context and key event.
    ///
    /// Some terminals report `?` and uppercase letters with SHIFT set and
    /// others without; both forms resolve to the same binding.
    #[must_use]
    pub fn lookup(&self, context: &str, event: KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(event);
        self.bindings
            .get(&(context.to_string(), binding))
            .or_else(|| {
                let toggled = KeyBinding::new(binding.code, binding.modifiers ^ KeyModifiers::SHIFT);
                match binding.code {
                    KeyCode::Char(c) if !c.is_ascii_lowercase() => {
                        self.bindings.get(&(context.to_string(), toggled))
                    }
                    _ => None,
                }
            })
            .copied()
    }

    /// Check if a key event matches a specific action in the given context.
    #[must_use]
    pub fn matches(&self, context: &str, event: KeyEvent, action: Action) -> bool {
        self.lookup(context, event) == Some(action)
    }

    /// Help entries for a context: each action once, with all its key labels.
    #[must_use]
    pub fn help_entries(&self, context: &str) -> Vec<(String, &'static str)> {
        let mut entries: Vec<(Action, Vec<String>)> = Vec::new();
        for (ctx, binding, action) in &self.order {
            if ctx != context {
                continue;
            }
            match entries.iter_mut().find(|(a, _)| a == action) {
                Some((_, keys)) => keys.push(binding.label()),
                None => entries.push((*action, vec![binding.label()])),
            }
        }
        entries
            .into_iter()
            .map(|(action, keys)| (keys.join(" / "), action.description()))
            .collect()
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_lookup() {
        let registry = ShortcutRegistry::new();

        let event = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(registry.lookup("main", event), Some(Action::NavigateUp));

        let event = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(registry.lookup("main", event), Some(Action::Save));

        let event = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(registry.lookup("main", event), None);
    }

    #[test]
    fn test_editing_shortcuts() {
        let registry = ShortcutRegistry::new();

        let event = KeyEvent::new(KeyCode::Char('C'), KeyModifiers::SHIFT);
        assert_eq!(registry.lookup("main", event), Some(Action::ClearAll));

        let event = KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE);
        assert_eq!(registry.lookup("main", event), Some(Action::Remove));

        let event = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert!(registry.matches("main", event, Action::Activate));
    }

    #[test]
    fn test_shift_reporting_variants() {
        let registry = ShortcutRegistry::new();

        // Uppercase without SHIFT, '?' with SHIFT
        let event = KeyEvent::new(KeyCode::Char('C'), KeyModifiers::NONE);
        assert_eq!(registry.lookup("main", event), Some(Action::ClearAll));
        let event = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(registry.lookup("main", event), Some(Action::ToggleHelp));

        // Lowercase with SHIFT is not a plain lowercase binding
        let event = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::SHIFT);
        assert_eq!(registry.lookup("main", event), None);
    }

    #[test]
    fn test_help_entries_group_keys() {
        let registry = ShortcutRegistry::new();
        let entries = registry.help_entries("main");

        let quit = entries
            .iter()
            .find(|(_, desc)| *desc == "Quit")
            .unwrap();
        assert_eq!(quit.0, "q / Ctrl+Q");
        assert!(registry.help_entries("other").is_empty());
    }
}
