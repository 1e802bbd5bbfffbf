//! Specification pane: panel aggregates, enclosure advice and the
//! bill of materials, recomputed on every draw.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::AppState;
use crate::models::EnclosureSize;
use crate::services::{bill_of_materials, PanelSummary};

/// Specification widget
pub struct SpecPane;

impl SpecPane {
    /// Render the specification pane
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let summary = PanelSummary::from_layout(&state.project.layout);

        let label = |text: &'static str| Span::styled(text, Style::default().fg(theme.text_muted));
        let value = |text: String| {
            Span::styled(
                text,
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )
        };

        let enclosure_style = if summary.enclosure.is_oversized() {
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD)
        };

        let mut lines = vec![
            Line::from(vec![
                label("Devices:   "),
                value(summary.device_count.to_string()),
            ]),
            Line::from(vec![
                label("Modules:   "),
                value(summary.total_slots.to_string()),
            ]),
            Line::from(vec![
                label("Current:   "),
                value(format!("{} A", summary.total_current_amps)),
            ]),
            Line::from(vec![
                label("Enclosure: "),
                Span::styled(summary.enclosure.to_string(), enclosure_style),
            ]),
        ];

        match summary.enclosure {
            EnclosureSize::Standard { .. } => {
                if let Some(free) = summary.free_slots {
                    lines.push(Line::from(vec![label("Free:      "), value(free.to_string())]));
                }
            }
            EnclosureSize::Oversized { .. } => {
                lines.push(Line::from(Span::styled(
                    "Exceeds largest standard enclosure",
                    Style::default().fg(theme.warning),
                )));
            }
        }

        if let Some(selected) = state.project.layout.selected_device() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Selected",
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!(
                "{} {}",
                selected.instance_id, selected.device.name
            )));
            lines.push(Line::from(Span::styled(
                format!("slot {}  {}", selected.slot_label(), selected.device.ratings_label()),
                Style::default().fg(theme.text_secondary),
            )));
        }

        let bom = bill_of_materials(&state.project.layout);
        if !bom.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Bill of Materials",
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )));
            for line in &bom {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{:>2}x ", line.quantity),
                        Style::default().fg(theme.primary),
                    ),
                    Span::styled(line.name.clone(), Style::default().fg(theme.text)),
                ]));
            }
        }

        let pane = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(" Specification ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.inactive))
                .style(Style::default().bg(theme.background)),
        );

        f.render_widget(pane, area);
    }
}
