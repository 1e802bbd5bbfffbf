//! Panel editing commands.
//!
//! Each command loads the panel file, applies one layout operation and
//! writes the file back. Placements keep their positions across runs.

use crate::catalog::Catalog;
use crate::cli::common::{print_json, CliError, CliResult};
use crate::models::{InstanceId, PanelMetadata, PanelProject, PlacedDevice};
use crate::services::{PanelService, PanelSummary};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Create and edit panel files
#[derive(Debug, Args)]
pub struct PanelArgs {
    #[command(subcommand)]
    command: PanelCommand,
}

#[derive(Debug, Subcommand)]
enum PanelCommand {
    /// Create an empty panel file
    New(NewArgs),
    /// Append catalog devices to the rail
    Add(AddArgs),
    /// Remove a placed device by instance id
    Remove(RemoveArgs),
    /// Remove every device
    Clear(ClearArgs),
    /// Show placements and totals
    Show(ShowArgs),
}

/// Create an empty panel file
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Path of the panel file to create
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Project name
    #[arg(long, value_name = "NAME", default_value = "Untitled Panel")]
    name: String,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

/// Append catalog devices to the rail
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Panel file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Catalog ids, placed left to right in the given order
    #[arg(value_name = "CATALOG_ID", required = true)]
    ids: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Remove a placed device by instance id
#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Panel file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Instance id ("3" or "#3")
    #[arg(value_name = "INSTANCE_ID")]
    instance_id: String,

    /// Fail when the instance id is not on the panel
    #[arg(long)]
    strict: bool,
}

/// Remove every device
#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Panel file
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

/// Show placements and totals
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Panel file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// JSON view of one placement.
#[derive(Debug, Serialize)]
struct PlacementView {
    instance_id: InstanceId,
    position: u32,
    slots: String,
    catalog_id: String,
    name: String,
    ratings: String,
}

impl From<&PlacedDevice> for PlacementView {
    fn from(placed: &PlacedDevice) -> Self {
        Self {
            instance_id: placed.instance_id,
            position: placed.position,
            slots: placed.slot_label(),
            catalog_id: placed.device.id.clone(),
            name: placed.device.name.clone(),
            ratings: placed.device.ratings_label(),
        }
    }
}

#[derive(Debug, Serialize)]
struct AddResponse {
    added: Vec<PlacementView>,
    summary: PanelSummary,
}

#[derive(Debug, Serialize)]
struct ShowResponse<'a> {
    metadata: &'a PanelMetadata,
    summary: PanelSummary,
    devices: Vec<PlacementView>,
}

impl PanelArgs {
    /// Execute panel subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            PanelCommand::New(args) => args.execute(),
            PanelCommand::Add(args) => args.execute(),
            PanelCommand::Remove(args) => args.execute(),
            PanelCommand::Clear(args) => args.execute(),
            PanelCommand::Show(args) => args.execute(),
        }
    }
}

fn load_catalog() -> CliResult<Catalog> {
    Catalog::load().map_err(|e| CliError::io(format!("Failed to load device catalog: {e}")))
}

fn load_project(path: &Path, catalog: &Catalog) -> CliResult<PanelProject> {
    PanelService::load(path, catalog).map_err(|e| CliError::io(format!("{e:#}")))
}

fn save_project(project: &PanelProject, path: &Path) -> CliResult<()> {
    PanelService::save(project, path).map_err(|e| CliError::io(format!("{e:#}")))
}

impl NewArgs {
    fn execute(&self) -> CliResult<()> {
        if self.file.exists() && !self.force {
            return Err(CliError::validation(format!(
                "Panel file already exists: {} (use --force to overwrite)",
                self.file.display()
            )));
        }
        PanelMetadata::validate_name(&self.name).map_err(|e| CliError::validation(e.to_string()))?;

        PanelService::create(&self.file, &self.name, true)
            .map_err(|e| CliError::io(format!("{e:#}")))?;

        println!("✓ Created panel '{}' at {}", self.name, self.file.display());
        Ok(())
    }
}

impl AddArgs {
    fn execute(&self) -> CliResult<()> {
        let catalog = load_catalog()?;
        let mut project = load_project(&self.file, &catalog)?;

        // Resolve every id before touching the layout so a typo adds nothing
        let definitions = self
            .ids
            .iter()
            .map(|id| {
                catalog
                    .get(id)
                    .ok_or_else(|| CliError::validation(format!("Unknown catalog id: {id}")))
            })
            .collect::<CliResult<Vec<_>>>()?;

        let added: Vec<PlacedDevice> = definitions
            .into_iter()
            .map(|definition| project.add_device(definition))
            .collect();

        save_project(&project, &self.file)?;

        let summary = PanelSummary::from_layout(&project.layout);
        if self.json {
            return print_json(&AddResponse {
                added: added.iter().map(PlacementView::from).collect(),
                summary,
            });
        }

        for placed in &added {
            println!(
                "Added {} as {} at slot {}",
                placed.device.name,
                placed.instance_id,
                placed.slot_label()
            );
        }
        println!(
            "Total: {} modules, {} A, enclosure {}",
            summary.total_slots, summary.total_current_amps, summary.enclosure
        );

        Ok(())
    }
}

impl RemoveArgs {
    fn execute(&self) -> CliResult<()> {
        let instance_id: InstanceId = self
            .instance_id
            .parse()
            .map_err(|e: anyhow::Error| CliError::validation(e.to_string()))?;

        let catalog = load_catalog()?;
        let mut project = load_project(&self.file, &catalog)?;

        if !project.remove_device(instance_id) {
            if self.strict {
                return Err(CliError::validation(format!(
                    "No device {instance_id} on panel"
                )));
            }
            println!("No device {instance_id} on panel; nothing removed.");
            return Ok(());
        }

        save_project(&project, &self.file)?;
        println!("Removed {instance_id}");
        Ok(())
    }
}

impl ClearArgs {
    fn execute(&self) -> CliResult<()> {
        let catalog = load_catalog()?;
        let mut project = load_project(&self.file, &catalog)?;

        let count = project.layout.len();
        project.clear_all();
        save_project(&project, &self.file)?;

        println!("Cleared {count} device(s)");
        Ok(())
    }
}

impl ShowArgs {
    fn execute(&self) -> CliResult<()> {
        let catalog = load_catalog()?;
        let project = load_project(&self.file, &catalog)?;
        let summary = PanelSummary::from_layout(&project.layout);

        if self.json {
            return print_json(&ShowResponse {
                metadata: &project.metadata,
                summary,
                devices: project
                    .layout
                    .devices()
                    .iter()
                    .map(PlacementView::from)
                    .collect(),
            });
        }

        println!("{}", project.metadata.name);
        println!("{}", "=".repeat(project.metadata.name.chars().count()));
        println!();

        if project.layout.is_empty() {
            println!("No devices placed.");
        } else {
            println!("{:<6} {:<7} {:<26} Ratings", "Id", "Slots", "Device");
            for placed in project.layout.devices() {
                println!(
                    "{:<6} {:<7} {:<26} {}",
                    placed.instance_id.to_string(),
                    placed.slot_label(),
                    placed.device.name,
                    placed.device.ratings_label()
                );
            }
        }
        println!();
        println!("Devices:     {}", summary.device_count);
        println!("Modules:     {}", summary.total_slots);
        println!("Current:     {} A", summary.total_current_amps);
        println!("Enclosure:   {}", summary.enclosure);
        if let Some(free) = summary.free_slots {
            println!("Free slots:  {free}");
        }

        Ok(())
    }
}
