//! Catalog browser: group tabs, filter line and device list.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
    Frame,
};

use super::{AppState, Focus};
use crate::catalog::CatalogGroup;

/// Catalog browser widget
pub struct CatalogList;

impl CatalogList {
    /// Render the catalog pane
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let focused = state.focus == Focus::Catalog;
        let border_color = if focused { theme.active } else { theme.inactive };

        let block = Block::default()
            .title(" Catalog ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Tabs
                Constraint::Length(1), // Filter
                Constraint::Min(1),    // List
            ])
            .split(inner);

        let selected_tab = CatalogGroup::ALL
            .iter()
            .position(|g| *g == state.catalog_group)
            .unwrap_or(0);
        let tabs = Tabs::new(CatalogGroup::ALL.iter().map(|g| g.title()))
            .select(selected_tab)
            .style(Style::default().fg(theme.text_secondary))
            .highlight_style(
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, chunks[0]);

        let filter_line = if state.search_active {
            Line::from(vec![
                Span::styled("/", Style::default().fg(theme.accent)),
                Span::styled(state.catalog_query.as_str(), Style::default().fg(theme.text)),
                Span::styled("_", Style::default().fg(theme.accent)),
            ])
        } else if state.catalog_query.is_empty() {
            Line::from(Span::styled(
                "/ to filter",
                Style::default().fg(theme.text_muted),
            ))
        } else {
            Line::from(vec![
                Span::styled("Filter: ", Style::default().fg(theme.text_muted)),
                Span::styled(state.catalog_query.as_str(), Style::default().fg(theme.text)),
            ])
        };
        f.render_widget(Paragraph::new(filter_line), chunks[1]);

        let devices = state.visible_catalog();
        if devices.is_empty() {
            let empty = Paragraph::new("No matching devices")
                .style(Style::default().fg(theme.text_muted));
            f.render_widget(empty, chunks[2]);
            return;
        }

        let items: Vec<ListItem> = devices
            .iter()
            .map(|device| {
                let kind = device.kind();
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<4}", kind.short_label()),
                        Style::default().fg(theme.device_color(kind)),
                    ),
                    Span::styled(device.name.clone(), Style::default().fg(theme.text)),
                    Span::styled(
                        format!("  {}m", device.slots()),
                        Style::default().fg(theme.text_muted),
                    ),
                ]))
            })
            .collect();

        let highlight = if focused {
            Style::default()
                .bg(theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(theme.surface)
        };
        let list = List::new(items)
            .highlight_style(highlight)
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default().with_selected(Some(state.catalog_cursor));
        f.render_stateful_widget(list, chunks[2], &mut list_state);
    }
}
