//! DIN rail renderer.
//!
//! Draws the rail with box-drawing characters, one cell per module slot.
//! Gaps left by removed devices are drawn as one empty box spanning the freed
//! slots so that every device appears at its stored position.

use std::fmt::Write as _;

use crate::models::{PanelLayout, PlacedDevice};

/// Character columns per module slot, excluding the shared border.
pub const SLOT_CELL_WIDTH: usize = 5;

/// A contiguous run of slots on the rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RailSegment<'a> {
    /// First slot (0-based)
    pub start: u32,
    /// Number of slots covered
    pub slots: u32,
    /// Device occupying the run, `None` for a gap
    pub device: Option<&'a PlacedDevice>,
}

impl RailSegment<'_> {
    /// Inner character width of this segment's box.
    #[must_use]
    pub const fn inner_width(&self) -> usize {
        self.slots as usize * (SLOT_CELL_WIDTH + 1) - 1
    }

    /// 1-based slot label drawn under the box, e.g. "3-4".
    #[must_use]
    pub fn label(&self) -> String {
        match self.device {
            Some(placed) => placed.slot_label(),
            None => {
                let first = u64::from(self.start) + 1;
                let last = u64::from(self.start) + u64::from(self.slots);
                if first == last {
                    first.to_string()
                } else {
                    format!("{first}-{last}")
                }
            }
        }
    }

    /// The three text rows drawn inside the box.
    #[must_use]
    pub fn text_rows(&self) -> [String; 3] {
        let Some(placed) = self.device else {
            return ["·".to_string(), String::new(), String::new()];
        };
        let device = &placed.device;
        let rating = match (device.trip_curve(), device.rated_current_amps()) {
            (Some(curve), Some(amps)) => format!("{curve}{amps}"),
            (None, Some(amps)) => format!("{amps}A"),
            _ => String::new(),
        };
        let leakage = device
            .leakage_ma()
            .map(|ma| format!("{ma}mA"))
            .unwrap_or_default();
        [device.kind().short_label().to_string(), rating, leakage]
    }
}

/// Splits the rail into device and gap segments, left to right.
///
/// Each run of free slots between devices becomes a single gap segment.
#[must_use]
pub fn rail_segments(layout: &PanelLayout) -> Vec<RailSegment<'_>> {
    let mut segments = Vec::with_capacity(layout.len() * 2);
    let mut cursor = 0;

    for placed in layout.devices() {
        if placed.position > cursor {
            segments.push(RailSegment {
                start: cursor,
                slots: placed.position - cursor,
                device: None,
            });
        }
        segments.push(RailSegment {
            start: placed.position,
            slots: placed.device.slots(),
            device: Some(placed),
        });
        cursor = placed.end_slot();
    }

    segments
}

/// Renders the rail as a fixed-width text diagram.
///
/// # Example
///
/// ```text
/// ┌───────────┬─────┐
/// │    RCD    │ QF  │
/// │    40A    │ C16 │
/// │   30mA    │     │
/// └───────────┴─────┘
///  1-2         3
/// ```
#[must_use]
pub fn render_rail_diagram(layout: &PanelLayout) -> String {
    let segments = rail_segments(layout);
    if segments.is_empty() {
        return "(empty rail)\n".to_string();
    }

    let border = |left: char, join: char, right: char| {
        let mut line = String::new();
        line.push(left);
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                line.push(join);
            }
            line.push_str(&"─".repeat(segment.inner_width()));
        }
        line.push(right);
        line
    };

    let mut output = String::new();
    output.push_str(&border('┌', '┬', '┐'));
    output.push('\n');

    let rows: Vec<[String; 3]> = segments.iter().map(RailSegment::text_rows).collect();
    for row in 0..3 {
        output.push('│');
        for (segment, text) in segments.iter().zip(&rows) {
            output.push_str(&fit_centered(&text[row], segment.inner_width()));
            output.push('│');
        }
        output.push('\n');
    }

    output.push_str(&border('└', '┴', '┘'));
    output.push('\n');

    // Slot numbers under each box
    output.push(' ');
    for segment in &segments {
        let label = segment.label();
        let width = segment.inner_width() + 1;
        let _ = write!(output, "{:<width$}", truncate(&label, width));
    }
    output.truncate(output.trim_end().len());
    output.push('\n');

    output
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

fn fit_centered(text: &str, width: usize) -> String {
    format!("{:^width$}", truncate(text, width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::InstanceId;

    #[test]
    fn test_empty_rail() {
        assert_eq!(render_rail_diagram(&PanelLayout::new()), "(empty rail)\n");
    }

    #[test]
    fn test_rail_diagram_shapes() {
        let catalog = Catalog::load().unwrap();
        let mut layout = PanelLayout::new();
        layout.add_device(catalog.get("rcd-40-30").unwrap());
        layout.add_device(catalog.get("br-c16").unwrap());

        let diagram = render_rail_diagram(&layout);
        let lines: Vec<&str> = diagram.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "┌───────────┬─────┐");
        assert!(lines[1].contains("RCD"));
        assert!(lines[1].contains("QF"));
        assert!(lines[2].contains("C16"));
        assert!(lines[3].contains("30mA"));
        assert_eq!(lines[5], " 1-2         3");
    }

    #[test]
    fn test_rail_shows_gaps_after_removal() {
        let catalog = Catalog::load().unwrap();
        let mut layout = PanelLayout::new();
        let first = layout.add_device(catalog.get("br-c16").unwrap());
        layout.add_device(catalog.get("br-c10").unwrap());
        layout.remove_device(first.instance_id);

        let segments = rail_segments(&layout);
        assert_eq!(segments.len(), 2);
        assert!(segments[0].device.is_none());
        assert_eq!(segments[1].start, 1);

        let diagram = render_rail_diagram(&layout);
        assert!(diagram.lines().nth(1).unwrap().contains('·'));
    }

    #[test]
    fn test_wide_gap_is_one_segment() {
        let catalog = Catalog::load().unwrap();
        let breaker = catalog.get("br-c16").unwrap();
        let layout = PanelLayout::from_placements(vec![
            PlacedDevice {
                instance_id: InstanceId::new(1),
                position: 0,
                device: breaker.clone(),
            },
            PlacedDevice {
                instance_id: InstanceId::new(2),
                position: 9_000,
                device: breaker.clone(),
            },
        ])
        .unwrap();

        let segments = rail_segments(&layout);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].start, 1);
        assert_eq!(segments[1].slots, 8_999);
        assert!(segments[1].device.is_none());
        assert_eq!(segments[1].label(), "2-9000");
        assert_eq!(segments[2].label(), "9001");

        let diagram = render_rail_diagram(&layout);
        assert_eq!(diagram.lines().count(), 6);
        assert_eq!(diagram.matches('·').count(), 1);
    }
}
