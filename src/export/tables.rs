//! Markdown tables for the project specification export.

use std::fmt::Write as _;

use crate::models::PanelLayout;
use crate::services::{BomLine, PanelSummary};

/// Generates the summary section.
pub fn generate_summary_section(summary: &PanelSummary) -> String {
    let mut output = String::new();

    output.push_str("## Summary\n\n");
    output.push_str("| Metric | Value |\n");
    output.push_str("|--------|-------|\n");
    let _ = writeln!(output, "| Devices | {} |", summary.device_count);
    let _ = writeln!(output, "| Modules used | {} |", summary.total_slots);
    let _ = writeln!(
        output,
        "| Total rated current | {} A |",
        summary.total_current_amps
    );
    let _ = writeln!(output, "| Recommended enclosure | {} |", summary.enclosure);
    match summary.free_slots {
        Some(free) => {
            let _ = writeln!(output, "| Free modules | {free} |");
        }
        None => output.push_str("| Free modules | none, exceeds largest standard housing |\n"),
    }
    if summary.gap_slots() > 0 {
        let _ = writeln!(
            output,
            "| Unused gaps on rail | {} |",
            summary.gap_slots()
        );
    }
    output.push('\n');

    output
}

/// Generates the placements table, in rail order.
pub fn generate_placements_table(layout: &PanelLayout) -> String {
    let mut output = String::new();

    output.push_str("## Placements\n\n");
    if layout.is_empty() {
        output.push_str("_No devices placed._\n\n");
        return output;
    }

    output.push_str("| Slots | Ref | Device | Ratings | Catalog id |\n");
    output.push_str("|-------|-----|--------|---------|------------|\n");
    for placed in layout.devices() {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} | `{}` |",
            placed.slot_label(),
            placed.instance_id,
            placed.device.name,
            placed.device.ratings_label(),
            placed.device.id
        );
    }
    output.push('\n');

    output
}

/// Generates the bill of materials with a totals row.
pub fn generate_bom_section(lines: &[BomLine]) -> String {
    let mut output = String::new();

    output.push_str("## Bill of Materials\n\n");
    if lines.is_empty() {
        output.push_str("_Nothing to order._\n\n");
        return output;
    }

    output.push_str("| Device | Catalog id | Qty | Modules | Current (A) |\n");
    output.push_str("|--------|------------|-----|---------|-------------|\n");

    let (mut qty, mut slots, mut amps) = (0, 0, 0);
    for line in lines {
        let current = line
            .unit_current_amps
            .map_or_else(|| "-".to_string(), |_| line.total_current_amps().to_string());
        let _ = writeln!(
            output,
            "| {} | `{}` | {} | {} | {} |",
            line.name,
            line.catalog_id,
            line.quantity,
            line.total_slots(),
            current
        );
        qty += line.quantity;
        slots += line.total_slots();
        amps += line.total_current_amps();
    }
    let _ = writeln!(output, "| **Total** | | {qty} | {slots} | {amps} |");
    output.push('\n');

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::services::bill_of_materials;

    fn sample_layout() -> PanelLayout {
        let catalog = Catalog::load().unwrap();
        let mut layout = PanelLayout::new();
        for id in ["rcd-40-30", "br-c16", "br-c16", "cont-25"] {
            layout.add_device(catalog.get(id).unwrap());
        }
        layout
    }

    #[test]
    fn test_summary_section() {
        let layout = sample_layout();
        let section = generate_summary_section(&PanelSummary::from_layout(&layout));
        assert!(section.contains("| Modules used | 6 |"));
        assert!(section.contains("| Total rated current | 97 A |"));
        assert!(section.contains("| Recommended enclosure | 12 modules |"));
        assert!(section.contains("| Free modules | 6 |"));
        assert!(!section.contains("gaps"));
    }

    #[test]
    fn test_placements_table_uses_one_based_slots() {
        let section = generate_placements_table(&sample_layout());
        assert!(section.contains("| 1-2 | #1 | RCD 40A 30mA |"));
        assert!(section.contains("| 3 | #2 | Breaker C16 |"));
        assert!(section.contains("| 5-6 | #4 | Contactor 25A |"));
    }

    #[test]
    fn test_bom_totals_row() {
        let layout = sample_layout();
        let section = generate_bom_section(&bill_of_materials(&layout));
        assert!(section.contains("| Breaker C16 | `br-c16` | 2 | 2 | 32 |"));
        assert!(section.contains("| **Total** | | 4 | 6 | 97 |"));
    }

    #[test]
    fn test_empty_sections() {
        let layout = PanelLayout::new();
        assert!(generate_placements_table(&layout).contains("No devices placed"));
        assert!(generate_bom_section(&[]).contains("Nothing to order"));
    }
}
