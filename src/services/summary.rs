//! Aggregate figures shown in the status bar, CLI and exports.

use serde::Serialize;

use crate::models::{EnclosureSize, PanelLayout};

/// Snapshot of the panel aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelSummary {
    /// Number of placed devices
    pub device_count: usize,
    /// Sum of slot widths
    pub total_slots: u32,
    /// Sum of rated currents (devices without a rating count as zero)
    pub total_current_amps: u32,
    /// Recommended housing
    pub enclosure: EnclosureSize,
    /// Free slots left in the recommended housing
    pub free_slots: Option<u32>,
    /// Rail length including gaps left by removals
    pub rail_length: u32,
}

impl PanelSummary {
    /// Computes the summary for a layout.
    #[must_use]
    pub fn from_layout(layout: &PanelLayout) -> Self {
        let total_slots = layout.total_slots_used();
        let enclosure = layout.recommended_enclosure();
        Self {
            device_count: layout.len(),
            total_slots,
            total_current_amps: layout.total_current_amps(),
            enclosure,
            free_slots: enclosure.free_slots(total_slots),
            rail_length: layout.next_position(),
        }
    }

    /// Slots lost to gaps left by removed devices.
    #[must_use]
    pub const fn gap_slots(&self) -> u32 {
        self.rail_length.saturating_sub(self.total_slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_summary_tracks_gaps() {
        let catalog = Catalog::load().unwrap();
        let mut layout = PanelLayout::new();
        let first = layout.add_device(catalog.get("rcd-40-30").unwrap());
        layout.add_device(catalog.get("br-c16").unwrap());
        layout.add_device(catalog.get("relay-16").unwrap());
        layout.remove_device(first.instance_id);

        let summary = PanelSummary::from_layout(&layout);
        assert_eq!(summary.device_count, 2);
        assert_eq!(summary.total_slots, 3);
        assert_eq!(summary.total_current_amps, 16);
        assert_eq!(summary.rail_length, 5);
        assert_eq!(summary.gap_slots(), 2);
        assert_eq!(summary.free_slots, Some(9));
    }

    #[test]
    fn test_summary_oversized_has_no_free_slots() {
        let catalog = Catalog::load().unwrap();
        let meter = catalog.get("meter-1").unwrap();
        let mut layout = PanelLayout::new();
        for _ in 0..7 {
            layout.add_device(meter);
        }
        let summary = PanelSummary::from_layout(&layout);
        assert_eq!(summary.total_slots, 42);
        assert!(summary.enclosure.is_oversized());
        assert_eq!(summary.free_slots, None);
    }
}
