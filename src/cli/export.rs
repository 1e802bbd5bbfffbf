//! `electropanel export`: write the markdown project specification.

use crate::catalog::Catalog;
use crate::cli::common::{CliError, CliResult};
use crate::export;
use crate::models::PanelProject;
use crate::services::PanelService;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Write a panel's project specification as markdown
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Panel file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Where to write the markdown (default: <panel_name>_spec_<date>.md)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    pub fn execute(&self) -> CliResult<()> {
        let catalog = Catalog::load()
            .map_err(|e| CliError::io(format!("Failed to load device catalog: {e}")))?;
        let project =
            PanelService::load(&self.file, &catalog).map_err(|e| CliError::io(format!("{e:#}")))?;

        let target = self.target_path(&project);
        fs::write(&target, export::export_to_markdown(&project))
            .map_err(|e| CliError::io(format!("Failed to write {}: {e}", target.display())))?;
        tracing::info!(path = %target.display(), devices = project.layout.len(), "panel exported");

        println!("✓ Exported panel to: {}", target.display());
        Ok(())
    }

    fn target_path(&self, project: &PanelProject) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| export::default_export_path(project))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(output: Option<&str>) -> ExportArgs {
        ExportArgs {
            file: PathBuf::from("garage.panel.json"),
            output: output.map(PathBuf::from),
        }
    }

    #[test]
    fn test_target_path_derived_from_panel_name() {
        let project = PanelProject::new("Garage Sub-Panel").unwrap();
        let name = args(None).target_path(&project).to_string_lossy().into_owned();

        assert!(name.starts_with("garage_sub-panel_spec_"));
        assert!(name.ends_with(".md"));
    }

    #[test]
    fn test_target_path_explicit_output_wins() {
        let project = PanelProject::new("Garage").unwrap();
        assert_eq!(
            args(Some("out/garage.md")).target_path(&project),
            PathBuf::from("out/garage.md")
        );
    }
}
