//! Panel view: placed devices as a list or as a drawn DIN rail.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::fmt::Write as _;

use super::{AppState, Focus, Theme};
use crate::config::ViewMode;
use crate::export::{rail_segments, RailSegment};
use crate::models::InstanceId;

/// Panel widget
pub struct PanelView;

impl PanelView {
    /// Render the panel pane in the current view mode
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let focused = state.focus == Focus::Panel;
        let border_color = if focused { theme.active } else { theme.inactive };

        let block = Block::default()
            .title(format!(" Panel ({}) ", state.view_mode))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        if state.project.layout.is_empty() {
            let hint = Paragraph::new(vec![
                Line::from(""),
                Line::from("No devices on the rail."),
                Line::from("Pick one in the catalog and press Enter."),
            ])
            .style(Style::default().fg(theme.text_muted));
            f.render_widget(hint, inner);
            return;
        }

        match state.view_mode {
            ViewMode::List => Self::render_list(f, inner, state, focused),
            ViewMode::Rail => Self::render_rail(f, inner, state, focused),
        }
    }

    fn render_list(f: &mut Frame, area: Rect, state: &AppState, focused: bool) {
        let theme = &state.theme;
        let selected = state.project.layout.selected();

        let items: Vec<ListItem> = state
            .project
            .layout
            .devices()
            .iter()
            .map(|placed| {
                let kind = placed.device.kind();
                let marker = if selected == Some(placed.instance_id) {
                    "● "
                } else {
                    "  "
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(theme.accent)),
                    Span::styled(
                        format!("{:<5}", placed.instance_id.to_string()),
                        Style::default().fg(theme.text_muted),
                    ),
                    Span::styled(
                        format!("{:<6}", placed.slot_label()),
                        Style::default().fg(theme.text_secondary),
                    ),
                    Span::styled(
                        format!("{:<4}", kind.short_label()),
                        Style::default().fg(theme.device_color(kind)),
                    ),
                    Span::styled(placed.device.name.clone(), Style::default().fg(theme.text)),
                    Span::styled(
                        format!("  {}", placed.device.ratings_label()),
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
            Style::default()
        };
        let list = List::new(items).highlight_style(highlight);

        let mut list_state = ListState::default().with_selected(Some(state.panel_cursor));
        f.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_rail(f: &mut Frame, area: Rect, state: &AppState, focused: bool) {
        let segments = rail_segments(&state.project.layout);
        let cursor_id = focused
            .then(|| state.panel_device().map(|placed| placed.instance_id))
            .flatten();
        let highlight = RailHighlight {
            selected: state.project.layout.selected(),
            cursor: cursor_id,
        };

        let mut lines = Vec::new();
        for row in wrap_segments(&segments, area.width as usize) {
            lines.extend(rail_row_lines(row, &state.theme, highlight));
            lines.push(Line::from(""));
        }

        f.render_widget(Paragraph::new(lines), area);
    }
}

#[derive(Clone, Copy)]
struct RailHighlight {
    selected: Option<InstanceId>,
    cursor: Option<InstanceId>,
}

/// Splits segments into rows that fit `width` columns.
fn wrap_segments<'s, 'a>(segments: &'s [RailSegment<'a>], width: usize) -> Vec<&'s [RailSegment<'a>]> {
    let mut rows = Vec::new();
    let mut start = 0;
    let mut used = 1;

    for (i, segment) in segments.iter().enumerate() {
        let needed = segment.inner_width() + 1;
        if i > start && used + needed > width {
            rows.push(&segments[start..i]);
            start = i;
            used = 1;
        }
        used += needed;
    }
    if start < segments.len() {
        rows.push(&segments[start..]);
    }
    rows
}

/// Draws one rail row: top border, three text rows, bottom border, slot labels.
fn rail_row_lines(
    row: &[RailSegment<'_>],
    theme: &Theme,
    highlight: RailHighlight,
) -> Vec<Line<'static>> {
    let border_style = Style::default().fg(theme.text_muted);
    let border = |left: &str, join: &str, right: &str| {
        let mut text = String::from(left);
        for (i, segment) in row.iter().enumerate() {
            if i > 0 {
                text.push_str(join);
            }
            text.push_str(&"─".repeat(segment.inner_width()));
        }
        text.push_str(right);
        Line::from(Span::styled(text, border_style))
    };

    let mut lines = vec![border("┌", "┬", "┐")];

    let texts: Vec<[String; 3]> = row.iter().map(RailSegment::text_rows).collect();
    for text_row in 0..3 {
        let mut spans = vec![Span::styled("│", border_style)];
        for (segment, text) in row.iter().zip(&texts) {
            let width = segment.inner_width();
            let content: String = text[text_row].chars().take(width).collect();
            spans.push(Span::styled(
                format!("{content:^width$}"),
                segment_style(segment, theme, highlight),
            ));
            spans.push(Span::styled("│", border_style));
        }
        lines.push(Line::from(spans));
    }

    lines.push(border("└", "┴", "┘"));

    let mut labels = String::from(" ");
    for segment in row {
        let label = segment.label();
        let width = segment.inner_width() + 1;
        let _ = write!(labels, "{label:<width$}");
    }
    lines.push(Line::from(Span::styled(
        labels.trim_end().to_string(),
        Style::default().fg(theme.text_muted),
    )));

    lines
}

fn segment_style(segment: &RailSegment<'_>, theme: &Theme, highlight: RailHighlight) -> Style {
    let Some(placed) = segment.device else {
        return Style::default().fg(theme.text_muted);
    };

    let mut style = Style::default().fg(theme.device_color(placed.device.kind()));
    if highlight.selected == Some(placed.instance_id) {
        style = style.add_modifier(Modifier::REVERSED);
    }
    if highlight.cursor == Some(placed.instance_id) {
        style = style.bg(theme.highlight_bg).add_modifier(Modifier::BOLD);
    }
    style
}
