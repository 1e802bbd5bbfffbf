//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and all UI widgets using Ratatui.

// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]

pub mod catalog_list;
pub mod clipboard;
pub mod handlers;
pub mod help_overlay;
pub mod panel_view;
pub mod spec_pane;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crate::catalog::{Catalog, CatalogGroup};
use crate::config::{Config, ViewMode};
use crate::constants::APP_NAME;
use crate::models::{DeviceDefinition, PanelProject, PlacedDevice};
use crate::shortcuts::ShortcutRegistry;

pub use catalog_list::CatalogList;
pub use help_overlay::HelpOverlay;
pub use panel_view::PanelView;
pub use spec_pane::SpecPane;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Device catalog browser
    Catalog,
    /// Placed devices
    Panel,
}

impl Focus {
    /// The other pane.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Catalog => Self::Panel,
            Self::Panel => Self::Catalog,
        }
    }
}

/// Popup shown above the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupType {
    /// Keyboard shortcut reference
    HelpOverlay,
    /// Quit requested with unsaved changes
    UnsavedChangesPrompt,
}

/// Application state - single source of truth
///
/// All UI components read from this state immutably.
/// Only event handlers modify state explicitly.
pub struct AppState {
    // Core data
    /// Panel being edited
    pub project: PanelProject,
    /// Path the panel was loaded from or last saved to
    pub source_path: Option<PathBuf>,
    /// Whether the panel has unsaved changes
    pub dirty: bool,

    // UI state
    /// Current UI theme
    pub theme: Theme,
    /// Pane receiving navigation keys
    pub focus: Focus,
    /// Active catalog tab
    pub catalog_group: CatalogGroup,
    /// Catalog filter text
    pub catalog_query: String,
    /// Whether keystrokes currently edit the filter
    pub search_active: bool,
    /// Highlighted row in the catalog list
    pub catalog_cursor: usize,
    /// Highlighted row in the panel
    pub panel_cursor: usize,
    /// Panel presentation
    pub view_mode: ViewMode,
    /// Currently active popup (if any)
    pub active_popup: Option<PopupType>,
    /// Status bar message
    pub status_message: String,
    /// Current error message (if any)
    pub error_message: Option<String>,

    // System resources
    /// Device catalog
    pub catalog: Catalog,
    /// Application configuration
    pub config: Config,
    /// Key bindings
    pub shortcuts: ShortcutRegistry,

    // Control flags
    /// Whether application should exit
    pub should_quit: bool,
}

impl AppState {
    /// Creates a new `AppState` for a project.
    ///
    /// # Errors
    ///
    /// Returns error if the device catalog cannot be loaded
    pub fn new(project: PanelProject, source_path: Option<PathBuf>, config: Config) -> Result<Self> {
        let catalog = Catalog::load().context("Failed to load device catalog")?;
        let theme = Theme::from_mode(config.ui.theme_mode);
        let active_popup = config
            .ui
            .show_help_on_startup
            .then_some(PopupType::HelpOverlay);

        Ok(Self {
            project,
            source_path,
            dirty: false,
            theme,
            focus: Focus::Catalog,
            catalog_group: CatalogGroup::All,
            catalog_query: String::new(),
            search_active: false,
            catalog_cursor: 0,
            panel_cursor: 0,
            view_mode: config.ui.default_view,
            active_popup,
            status_message: "Press ? for help".to_string(),
            error_message: None,
            catalog,
            shortcuts: ShortcutRegistry::new(),
            config,
            should_quit: false,
        })
    }

    /// Catalog entries visible under the current tab and filter.
    #[must_use]
    pub fn visible_catalog(&self) -> Vec<&DeviceDefinition> {
        self.catalog.browse(self.catalog_group, &self.catalog_query)
    }

    /// Catalog entry under the cursor.
    #[must_use]
    pub fn catalog_device(&self) -> Option<&DeviceDefinition> {
        self.visible_catalog().get(self.catalog_cursor).copied()
    }

    /// Placed device under the panel cursor.
    #[must_use]
    pub fn panel_device(&self) -> Option<&PlacedDevice> {
        self.project.layout.devices().get(self.panel_cursor)
    }

    /// Keeps both cursors inside their lists.
    pub fn clamp_cursors(&mut self) {
        let catalog_len = self.visible_catalog().len();
        self.catalog_cursor = self.catalog_cursor.min(catalog_len.saturating_sub(1));
        let panel_len = self.project.layout.len();
        self.panel_cursor = self.panel_cursor.min(panel_len.saturating_sub(1));
    }

    /// Mark the panel as modified
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Mark the panel as saved
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        let error = error.into();
        tracing::warn!(%error, "editor error");
        self.error_message = Some(error);
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            // Resize events need no handling; the next draw picks up the new size
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Press && handle_key_event(state, key)? {
                    break;
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(4), // Status bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state);
    render_main_content(f, chunks[1], state);
    StatusBar::render(f, chunks[2], state, &state.theme);

    if let Some(popup_type) = state.active_popup {
        render_popup(f, popup_type, state);
    }

    // Render error overlay on top of everything if error is present
    if let Some(ref error) = state.error_message {
        render_error_overlay(f, error, &state.theme);
    }
}

/// Render title bar with panel name and dirty indicator
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let dirty_indicator = if state.dirty { " *" } else { "" };
    let file = state
        .source_path
        .as_ref()
        .map(|p| format!(" ({})", p.display()))
        .unwrap_or_default();
    let title = format!(
        " {} - {}{}{}",
        APP_NAME, state.project.metadata.name, file, dirty_indicator
    );

    let title_widget = Paragraph::new(title)
        .style(
            Style::default()
                .fg(state.theme.primary)
                .bg(state.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(state.theme.background)),
        );

    f.render_widget(title_widget, area);
}

/// Render main content: catalog, panel and specification side by side
fn render_main_content(f: &mut Frame, area: Rect, state: &AppState) {
    let columns = RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(45),
            Constraint::Percentage(25),
        ])
        .split(area);

    CatalogList::render(f, columns[0], state);
    PanelView::render(f, columns[1], state);
    SpecPane::render(f, columns[2], state);
}

/// Render active popup
fn render_popup(f: &mut Frame, popup_type: PopupType, state: &AppState) {
    match popup_type {
        PopupType::HelpOverlay => HelpOverlay::render(f, centered_rect(60, 80, f.area()), state),
        PopupType::UnsavedChangesPrompt => render_unsaved_prompt(f, &state.theme),
    }
}

/// Render unsaved changes prompt
fn render_unsaved_prompt(f: &mut Frame, theme: &Theme) {
    let area = centered_rect(60, 30, f.area());

    f.render_widget(Clear, area);
    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, area);

    let text = vec![
        Line::from(""),
        Line::from("You have unsaved changes."),
        Line::from(""),
        Line::from("  [S] Save and quit"),
        Line::from("  [Q] Quit without saving"),
        Line::from("  [Esc] Cancel"),
    ];

    let prompt = Paragraph::new(text).block(
        Block::default()
            .title(" Unsaved Changes ")
            .borders(Borders::ALL)
            .style(Style::default().fg(theme.warning)),
    );

    f.render_widget(prompt, area);
}

/// Render error overlay on top of all other UI elements
fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let area = centered_rect(70, 30, f.area());

    f.render_widget(Clear, area);
    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, area);

    let mut text = vec![Line::from("")];
    text.extend(error.lines().map(|line| Line::from(line.to_string())));
    text.push(Line::from(""));
    text.push(Line::from(vec![
        Span::styled(
            "Enter/Esc",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(": dismiss"),
    ]));

    let overlay = Paragraph::new(text).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Error ")
            .borders(Borders::ALL)
            .style(Style::default().fg(theme.error).bg(theme.background)),
    );

    f.render_widget(overlay, area);
}

/// Helper to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Handle keyboard input events
///
/// Returns `true` when the editor should exit.
pub fn handle_key_event(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    use crossterm::event::KeyCode;

    // If error overlay is shown, allow dismissing with Enter or Esc
    if state.error_message.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.clear_error();
        }
        // Block all other input while error is shown
        return Ok(false);
    }

    // Route to popup handler if popup is active
    if let Some(popup) = state.active_popup {
        return handlers::handle_popup_input(state, popup, key);
    }

    if state.search_active {
        return handlers::handle_search_input(state, key);
    }

    handlers::handle_main_input(state, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeMode;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn test_state() -> AppState {
        let mut config = Config::new();
        config.ui.theme_mode = ThemeMode::Dark;
        config.ui.show_help_on_startup = false;
        AppState::new(PanelProject::new("Test").unwrap(), None, config).unwrap()
    }

    fn press(state: &mut AppState, code: KeyCode) -> bool {
        handle_key_event(state, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn press_mod(state: &mut AppState, code: KeyCode, modifiers: KeyModifiers) -> bool {
        handle_key_event(state, KeyEvent::new(code, modifiers)).unwrap()
    }

    #[test]
    fn test_new_state_defaults() {
        let state = test_state();
        assert_eq!(state.focus, Focus::Catalog);
        assert_eq!(state.view_mode, ViewMode::List);
        assert!(state.active_popup.is_none());
        assert_eq!(state.visible_catalog().len(), 63);
        assert!(!state.dirty);
    }

    #[test]
    fn test_help_on_startup() {
        let mut config = Config::new();
        config.ui.theme_mode = ThemeMode::Dark;
        let state = AppState::new(PanelProject::new("Test").unwrap(), None, config).unwrap();
        assert_eq!(state.active_popup, Some(PopupType::HelpOverlay));
    }

    #[test]
    fn test_add_from_catalog_appends() {
        let mut state = test_state();
        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Enter);

        let devices = state.project.layout.devices();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].device.id, "br-b6");
        assert_eq!(devices[1].device.id, "br-b10");
        assert_eq!(devices[1].position, 1);
        assert!(state.dirty);
    }

    #[test]
    fn test_group_switch_resets_cursor() {
        let mut state = test_state();
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Right);
        press(&mut state, KeyCode::Right);
        assert_eq!(state.catalog_group, CatalogGroup::Rcd);
        assert_eq!(state.catalog_cursor, 0);

        press(&mut state, KeyCode::Enter);
        assert_eq!(state.project.layout.devices()[0].device.slots(), 2);
    }

    #[test]
    fn test_select_toggle_and_remove_in_panel() {
        let mut state = test_state();
        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.focus, Focus::Panel);

        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Enter);
        let second = state.project.layout.devices()[1].instance_id;
        assert_eq!(state.project.layout.selected(), Some(second));

        press(&mut state, KeyCode::Char(' '));
        assert_eq!(state.project.layout.selected(), None);

        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Char('d'));
        assert_eq!(state.project.layout.len(), 1);
        assert_eq!(state.project.layout.selected(), None);
        assert_eq!(state.panel_cursor, 0);
    }

    #[test]
    fn test_clear_all() {
        let mut state = test_state();
        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Enter);
        press_mod(&mut state, KeyCode::Char('C'), KeyModifiers::SHIFT);
        assert!(state.project.layout.is_empty());
        assert_eq!(state.project.layout.next_position(), 0);
    }

    #[test]
    fn test_search_filters_catalog() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char('/'));
        assert!(state.search_active);
        for c in "meter".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        press(&mut state, KeyCode::Enter);
        assert!(!state.search_active);
        assert_eq!(state.visible_catalog().len(), 1);

        press(&mut state, KeyCode::Enter);
        assert_eq!(state.project.layout.devices()[0].device.id, "meter-1");

        press(&mut state, KeyCode::Esc);
        assert!(state.catalog_query.is_empty());
    }

    #[test]
    fn test_quit_clean_and_dirty() {
        let mut state = test_state();
        assert!(press(&mut state, KeyCode::Char('q')));

        let mut state = test_state();
        press(&mut state, KeyCode::Enter);
        assert!(!press(&mut state, KeyCode::Char('q')));
        assert_eq!(state.active_popup, Some(PopupType::UnsavedChangesPrompt));

        assert!(!press(&mut state, KeyCode::Esc));
        assert!(state.active_popup.is_none());

        press(&mut state, KeyCode::Char('q'));
        assert!(press(&mut state, KeyCode::Char('q')));
    }

    #[test]
    fn test_save_writes_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("panel.json");
        let mut state = test_state();
        state.source_path = Some(path.clone());

        press(&mut state, KeyCode::Enter);
        press_mod(&mut state, KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(!state.dirty);
        assert!(path.exists());
    }

    #[test]
    fn test_toggle_view_and_help() {
        let mut state = test_state();
        press(&mut state, KeyCode::Char('v'));
        assert_eq!(state.view_mode, ViewMode::Rail);
        press(&mut state, KeyCode::Char('?'));
        assert_eq!(state.active_popup, Some(PopupType::HelpOverlay));
        press(&mut state, KeyCode::Esc);
        assert!(state.active_popup.is_none());
    }

    #[test]
    fn test_error_blocks_input_until_dismissed() {
        let mut state = test_state();
        state.set_error("boom");
        press(&mut state, KeyCode::Enter);
        assert!(state.project.layout.is_empty());
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_render_both_views() {
        let mut state = test_state();
        for _ in 0..3 {
            press(&mut state, KeyCode::Enter);
        }
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| render(f, &state)).unwrap();

        state.view_mode = ViewMode::Rail;
        state.active_popup = Some(PopupType::HelpOverlay);
        terminal.draw(|f| render(f, &state)).unwrap();
    }
}
