//! ElectroPanel Designer - terminal-based electrical panel planner
//!
//! Without a subcommand the interactive editor starts. Subcommands give
//! headless, scriptable access to the catalog and to panel files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use electropanel::catalog::Catalog;
use electropanel::cli::{BomArgs, CatalogArgs, CliResult, ConfigArgs, ExportArgs, PanelArgs};
use electropanel::config::Config;
use electropanel::constants::APP_BINARY_NAME;
use electropanel::models::PanelProject;
use electropanel::services::PanelService;
use electropanel::{logging, tui};

/// ElectroPanel Designer - plan DIN rail panels from a device catalog
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Panel file to open in the editor (created on first save)
    #[arg(value_name = "FILE")]
    panel_path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse the device catalog
    Catalog(CatalogArgs),
    /// Create and edit panel files
    Panel(PanelArgs),
    /// Print the bill of materials of a panel
    Bom(BomArgs),
    /// Export a panel specification as Markdown
    Export(ExportArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

impl Command {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Catalog(args) => args.execute(),
            Self::Panel(args) => args.execute(),
            Self::Bom(args) => args.execute(),
            Self::Export(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        logging::init_stderr(cli.verbose);
        if let Err(e) = command.execute() {
            e.exit();
        }
        return Ok(());
    }

    run_editor(cli.panel_path, cli.verbose)
}

/// Starts the interactive editor, loading `panel_path` when it exists.
fn run_editor(panel_path: Option<PathBuf>, verbose: bool) -> Result<()> {
    let log_path = logging::log_file_path()?;
    logging::init_file(&log_path, verbose)?;

    let config = if Config::exists() {
        match Config::load() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: Failed to load config: {e:#}");
                eprintln!("Continuing with defaults.");
                Config::new()
            }
        }
    } else {
        Config::new()
    };

    let project = match &panel_path {
        Some(path) if path.exists() => {
            let catalog = Catalog::load().context("Failed to load device catalog")?;
            PanelService::load(path, &catalog).with_context(|| {
                format!(
                    "Cannot open {}. Create a new panel with: {} panel new <FILE>",
                    path.display(),
                    APP_BINARY_NAME
                )
            })?
        }
        _ => PanelProject::new("Untitled Panel")?,
    };

    tracing::info!(path = ?panel_path, devices = project.layout.len(), "starting editor");

    let mut terminal = tui::setup_terminal()?;
    let mut app_state = tui::AppState::new(project, panel_path, config)?;

    // Run main TUI loop
    let result = tui::run_tui(&mut app_state, &mut terminal);

    // Restore terminal
    tui::restore_terminal(terminal)?;

    result
}
