//! Export functionality for panel projects.
//!
//! Produces a markdown project specification: metadata, aggregate summary,
//! a DIN rail diagram, the placement table and a bill of materials.

pub mod rail_renderer;
pub mod tables;

use std::fmt::Write as _;
use std::path::PathBuf;

pub use rail_renderer::{rail_segments, render_rail_diagram, RailSegment};
pub use tables::{generate_bom_section, generate_placements_table, generate_summary_section};

use crate::constants::APP_NAME;
use crate::models::PanelProject;
use crate::services::{bill_of_materials, panels::sanitize_filename, PanelSummary};

/// Renders the whole project as a markdown document.
///
/// # Example
///
/// ```
/// use electropanel::catalog::Catalog;
/// use electropanel::export::export_to_markdown;
/// use electropanel::models::PanelProject;
///
/// let catalog = Catalog::load().unwrap();
/// let mut project = PanelProject::new("Kitchen").unwrap();
/// project.add_device(catalog.get("br-c16").unwrap());
/// let markdown = export_to_markdown(&project);
/// assert!(markdown.starts_with("# Kitchen"));
/// ```
pub fn export_to_markdown(project: &PanelProject) -> String {
    let metadata = &project.metadata;
    let layout = &project.layout;
    let mut output = String::new();

    let _ = writeln!(output, "# {}\n", metadata.name);
    if !metadata.description.is_empty() {
        let _ = writeln!(output, "{}\n", metadata.description);
    }
    if !metadata.author.is_empty() {
        let _ = writeln!(output, "- **Author:** {}", metadata.author);
    }
    let _ = writeln!(
        output,
        "- **Created:** {}",
        metadata.created.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(
        output,
        "- **Modified:** {}\n",
        metadata.modified.format("%Y-%m-%d %H:%M UTC")
    );

    output.push_str(&generate_summary_section(&PanelSummary::from_layout(layout)));

    output.push_str("## DIN Rail\n\n```text\n");
    output.push_str(&render_rail_diagram(layout));
    output.push_str("```\n\n");

    output.push_str(&generate_placements_table(layout));
    output.push_str(&generate_bom_section(&bill_of_materials(layout)));

    let _ = writeln!(
        output,
        "---\n*Generated by {} v{}*",
        APP_NAME,
        env!("CARGO_PKG_VERSION")
    );

    output
}

/// Default export file name: `<name>_spec_<date>.md`.
#[must_use]
pub fn default_export_path(project: &PanelProject) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d");
    PathBuf::from(format!(
        "{}_spec_{}.md",
        sanitize_filename(&project.metadata.name),
        date
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_export_sections_in_order() {
        let catalog = Catalog::load().unwrap();
        let mut project = PanelProject::new("Garage").unwrap();
        project.metadata.author = "J. Doe".to_string();
        project.add_device(catalog.get("rcd-40-30").unwrap());
        project.add_device(catalog.get("br-c16").unwrap());

        let markdown = export_to_markdown(&project);
        let positions: Vec<usize> = [
            "# Garage",
            "**Author:** J. Doe",
            "## Summary",
            "## DIN Rail",
            "## Placements",
            "## Bill of Materials",
            "Generated by",
        ]
        .iter()
        .map(|needle| markdown.find(needle).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(markdown.contains("┌───────────┬─────┐"));
    }

    #[test]
    fn test_export_empty_project() {
        let project = PanelProject::new("Empty").unwrap();
        let markdown = export_to_markdown(&project);
        assert!(markdown.contains("(empty rail)"));
        assert!(markdown.contains("| Recommended enclosure | 12 modules |"));
        assert!(!markdown.contains("**Author:**"));
    }

    #[test]
    fn test_default_export_path() {
        let project = PanelProject::new("Main Panel").unwrap();
        let path = default_export_path(&project).to_string_lossy().to_string();
        assert!(path.starts_with("main_panel_spec_"));
        assert!(path.ends_with(".md"));
    }
}
