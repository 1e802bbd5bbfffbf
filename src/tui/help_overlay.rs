//! Help overlay listing every key binding of the editor.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::AppState;
use crate::constants::APP_NAME;

/// Width of the key column.
const KEY_COLUMN_WIDTH: usize = 22;

/// Help overlay widget
pub struct HelpOverlay;

impl HelpOverlay {
    /// Render the overlay into `area`
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;

        f.render_widget(Clear, area);

        let mut lines = vec![
            Line::from(Span::styled(
                format!("{APP_NAME} - Help"),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            Line::from(""),
        ];

        for (keys, description) in state.shortcuts.help_entries("main") {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {keys:<KEY_COLUMN_WIDTH$}"),
                    Style::default().fg(theme.success),
                ),
                Span::styled(description, Style::default().fg(theme.text)),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  Catalog: ", Style::default().fg(theme.accent)),
            Span::styled(
                "Enter adds the device at the end of the rail.",
                Style::default().fg(theme.text_muted),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  Panel:   ", Style::default().fg(theme.accent)),
            Span::styled(
                "Enter toggles selection, d removes the device.",
                Style::default().fg(theme.text_muted),
            ),
        ]));
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled(
                "Esc / ? to close",
                Style::default().fg(theme.text_muted),
            ))
            .alignment(Alignment::Center),
        );

        let help = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary))
                .style(Style::default().bg(theme.background)),
        );

        f.render_widget(help, area);
    }
}
