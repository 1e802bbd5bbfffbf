//! Bill of materials.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write as _;

use crate::models::{DeviceKind, PanelLayout};

/// One line of the bill of materials: all placements of one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BomLine {
    /// Catalog id
    pub catalog_id: String,
    /// Display name
    pub name: String,
    /// Device kind
    pub kind: DeviceKind,
    /// Number of placements
    pub quantity: u32,
    /// Slot width of one unit
    pub unit_slots: u32,
    /// Rated current of one unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_current_amps: Option<u32>,
    /// Compact ratings text
    pub ratings: String,
}

impl BomLine {
    /// Slots used by all units on this line.
    #[must_use]
    pub const fn total_slots(&self) -> u32 {
        self.unit_slots * self.quantity
    }

    /// Current drawn by all units on this line.
    #[must_use]
    pub fn total_current_amps(&self) -> u32 {
        self.unit_current_amps.unwrap_or(0) * self.quantity
    }
}

/// Groups placements by catalog id, in order of first placement.
#[must_use]
pub fn bill_of_materials(layout: &PanelLayout) -> Vec<BomLine> {
    let mut lines: Vec<BomLine> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for placed in layout.devices() {
        let device = &placed.device;
        if let Some(&line_idx) = index.get(device.id.as_str()) {
            lines[line_idx].quantity += 1;
            continue;
        }

        index.insert(device.id.as_str(), lines.len());
        lines.push(BomLine {
            catalog_id: device.id.clone(),
            name: device.name.clone(),
            kind: device.kind(),
            quantity: 1,
            unit_slots: device.slots(),
            unit_current_amps: device.rated_current_amps(),
            ratings: device.ratings_label(),
        });
    }

    lines
}

/// Plain-text rendering used for the clipboard and the CLI.
#[must_use]
pub fn format_bom_text(lines: &[BomLine]) -> String {
    let mut output = String::new();
    for (i, line) in lines.iter().enumerate() {
        let _ = writeln!(
            output,
            "{:>2}. {:<24} x{:<3} {:>3} mod  {}",
            i + 1,
            line.name,
            line.quantity,
            line.total_slots(),
            line.ratings
        );
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_bom_groups_by_catalog_id() {
        let catalog = Catalog::load().unwrap();
        let mut layout = PanelLayout::new();
        for id in ["rcd-40-30", "br-c16", "br-c16", "relay-16", "br-c16"] {
            layout.add_device(catalog.get(id).unwrap());
        }

        let bom = bill_of_materials(&layout);
        assert_eq!(bom.len(), 3);
        assert_eq!(bom[0].catalog_id, "rcd-40-30");
        assert_eq!(bom[1].catalog_id, "br-c16");
        assert_eq!(bom[1].quantity, 3);
        assert_eq!(bom[2].unit_current_amps, None);

        let slots: u32 = bom.iter().map(BomLine::total_slots).sum();
        let amps: u32 = bom.iter().map(BomLine::total_current_amps).sum();
        assert_eq!(slots, layout.total_slots_used());
        assert_eq!(amps, layout.total_current_amps());
    }

    #[test]
    fn test_bom_empty_layout() {
        assert!(bill_of_materials(&PanelLayout::new()).is_empty());
        assert_eq!(format_bom_text(&[]), "");
    }

    #[test]
    fn test_format_bom_text() {
        let catalog = Catalog::load().unwrap();
        let mut layout = PanelLayout::new();
        layout.add_device(catalog.get("br-c16").unwrap());
        layout.add_device(catalog.get("br-c16").unwrap());
        let text = format_bom_text(&bill_of_materials(&layout));
        assert!(text.contains("Breaker C16"));
        assert!(text.contains("x2"));
        assert!(text.contains("16A • 230V • C"));
    }
}
