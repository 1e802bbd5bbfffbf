//! Bill of materials command.

use crate::catalog::Catalog;
use crate::cli::common::{print_json, CliError, CliResult};
use crate::services::{bill_of_materials, format_bom_text, BomLine, PanelService, PanelSummary};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Print the bill of materials for a panel
#[derive(Debug, Clone, Args)]
pub struct BomArgs {
    /// Panel file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct BomResponse {
    lines: Vec<BomLine>,
    summary: PanelSummary,
}

impl BomArgs {
    /// Execute the bom command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = Catalog::load()
            .map_err(|e| CliError::io(format!("Failed to load device catalog: {e}")))?;
        let project =
            PanelService::load(&self.file, &catalog).map_err(|e| CliError::io(format!("{e:#}")))?;

        let lines = bill_of_materials(&project.layout);
        let summary = PanelSummary::from_layout(&project.layout);

        if self.json {
            return print_json(&BomResponse { lines, summary });
        }

        if lines.is_empty() {
            println!("Panel is empty.");
            return Ok(());
        }

        print!("{}", format_bom_text(&lines));
        println!();
        println!(
            "{} device(s), {} modules, {} A, enclosure {}",
            summary.device_count, summary.total_slots, summary.total_current_amps, summary.enclosure
        );

        Ok(())
    }
}
