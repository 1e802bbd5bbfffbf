//! Catalog browsing commands.

use crate::catalog::{Catalog, CatalogGroup};
use crate::cli::common::{print_json, CliError, CliResult};
use crate::models::DeviceDefinition;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Browse the built-in device catalog
#[derive(Debug, Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    command: CatalogCommand,
}

#[derive(Debug, Subcommand)]
enum CatalogCommand {
    /// List catalog devices
    List(ListArgs),
    /// Show one catalog device
    Show(ShowArgs),
}

/// List catalog devices
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Restrict to a group (all, breakers, rcd, rcbo, other)
    #[arg(long, value_name = "GROUP", default_value = "all")]
    group: String,

    /// Filter by id or name
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Show one catalog device
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Catalog id (e.g., br-c16)
    #[arg(value_name = "ID")]
    id: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct ListResponse<'a> {
    group: CatalogGroup,
    devices: Vec<&'a DeviceDefinition>,
    count: usize,
}

impl CatalogArgs {
    /// Execute catalog subcommand
    pub fn execute(&self) -> CliResult<()> {
        let catalog = Catalog::load()
            .map_err(|e| CliError::io(format!("Failed to load device catalog: {e}")))?;

        match &self.command {
            CatalogCommand::List(args) => args.execute(&catalog),
            CatalogCommand::Show(args) => args.execute(&catalog),
        }
    }
}

impl ListArgs {
    fn execute(&self, catalog: &Catalog) -> CliResult<()> {
        let group: CatalogGroup = self
            .group
            .parse()
            .map_err(|e: anyhow::Error| CliError::validation(e.to_string()))?;
        let devices = catalog.browse(group, self.search.as_deref().unwrap_or(""));

        if self.json {
            return print_json(&ListResponse {
                group,
                count: devices.len(),
                devices,
            });
        }

        if devices.is_empty() {
            println!("No devices found.");
            return Ok(());
        }

        println!("{:<16} {:<26} {:>5}  Ratings", "ID", "Name", "Slots");
        for device in &devices {
            println!(
                "{:<16} {:<26} {:>5}  {}",
                device.id,
                device.name,
                device.slots(),
                device.ratings_label()
            );
        }
        println!();
        println!("{} device(s)", devices.len());

        Ok(())
    }
}

impl ShowArgs {
    fn execute(&self, catalog: &Catalog) -> CliResult<()> {
        let device = catalog
            .get(&self.id)
            .ok_or_else(|| CliError::validation(format!("Unknown catalog id: {}", self.id)))?;

        if self.json {
            return print_json(device);
        }

        println!("{}", device.name);
        println!("  Id:       {}", device.id);
        println!("  Kind:     {}", device.kind().display_name());
        println!("  Slots:    {}", device.slots());
        if let Some(amps) = device.rated_current_amps() {
            println!("  Current:  {amps} A");
        }
        if let Some(volts) = device.rated_voltage() {
            println!("  Voltage:  {volts} V");
        }
        if let Some(curve) = device.trip_curve() {
            println!("  Curve:    {curve}");
        }
        if let Some(leakage) = device.leakage_ma() {
            println!("  Leakage:  {leakage} mA");
        }

        Ok(())
    }
}
