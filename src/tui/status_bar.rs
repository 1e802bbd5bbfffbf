//! Bottom bar: last status or error, then key hints for the focused pane.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Focus, Theme};
use crate::shortcuts::Action;

/// Actions advertised in the hint line, per focused pane.
const CATALOG_HINTS: [Action; 5] = [
    Action::Activate,
    Action::NextGroup,
    Action::Search,
    Action::SwitchFocus,
    Action::Save,
];
const PANEL_HINTS: [Action; 5] = [
    Action::Activate,
    Action::Remove,
    Action::ToggleView,
    Action::SwitchFocus,
    Action::Save,
];

pub struct StatusBar;

impl StatusBar {
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let first_line = if let Some(error) = &state.error_message {
            Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::raw(error.as_str()),
            ])
        } else if state.search_active {
            Line::from(vec![
                Span::styled("Search: ", Style::default().fg(theme.primary)),
                Span::styled(state.catalog_query.as_str(), Style::default().fg(theme.text)),
                Span::styled("_", Style::default().fg(theme.accent)),
            ])
        } else {
            Line::from(state.status_message.as_str())
        };

        let lines = vec![first_line, Self::hints_line(state, theme)];
        let status = Paragraph::new(lines)
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    /// Key hints for the focused pane, ending with the help key
    fn hints_line(state: &AppState, theme: &Theme) -> Line<'static> {
        if state.search_active {
            return Line::from(vec![
                Span::styled("Enter", Style::default().fg(theme.accent)),
                Span::raw(": apply | "),
                Span::styled("Esc", Style::default().fg(theme.accent)),
                Span::raw(": clear"),
            ]);
        }

        let actions = match state.focus {
            Focus::Catalog => &CATALOG_HINTS,
            Focus::Panel => &PANEL_HINTS,
        };

        let mut spans: Vec<Span<'static>> = Vec::new();
        spans.push(Span::styled("Help: ", Style::default().fg(theme.primary)));

        let entries = state.shortcuts.help_entries("main");
        for action in actions.iter().chain(std::iter::once(&Action::ToggleHelp)) {
            let Some((keys, description)) = entries
                .iter()
                .find(|(_, description)| *description == action.description())
            else {
                continue;
            };
            if spans.len() > 1 {
                spans.push(Span::raw(" | "));
            }
            let first_key = keys.split(" / ").next().unwrap_or(keys.as_str()).to_string();
            spans.push(Span::styled(
                first_key,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(": "));
            spans.push(Span::raw(*description));
        }

        Line::from(spans)
    }
}
