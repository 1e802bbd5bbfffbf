//! `electropanel config`: inspect and change editor preferences.

use std::str::FromStr;

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::{Config, ThemeMode, ViewMode};

/// Show or change preferences
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the active preferences
    Show(ConfigShowArgs),
    /// Change one or more preferences
    Set(ConfigSetArgs),
}

/// Print the active preferences
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Change one or more preferences
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Editor colors: auto, light or dark
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,

    /// Panel view the editor opens with: list or rail
    #[arg(long, value_name = "VIEW")]
    view: Option<String>,
}

#[derive(Serialize, Debug)]
struct ConfigReport {
    config_file: Option<String>,
    paths: PathsReport,
    ui: UiReport,
}

#[derive(Serialize, Debug)]
struct PathsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    panels_dir: Option<String>,
}

#[derive(Serialize, Debug)]
struct UiReport {
    theme: String,
    default_view: String,
    show_help_on_startup: bool,
}

impl From<&Config> for ConfigReport {
    fn from(config: &Config) -> Self {
        Self {
            config_file: Config::config_file_path()
                .ok()
                .map(|path| path.display().to_string()),
            paths: PathsReport {
                panels_dir: config
                    .paths
                    .panels_dir
                    .as_ref()
                    .map(|dir| dir.display().to_string()),
            },
            ui: UiReport {
                theme: config.ui.theme_mode.to_string(),
                default_view: config.ui.default_view.to_string(),
                show_help_on_startup: config.ui.show_help_on_startup,
            },
        }
    }
}

impl ConfigArgs {
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;

        if self.json {
            return print_json(&ConfigReport::from(&config));
        }

        let panels_dir = config
            .paths
            .panels_dir
            .as_ref()
            .map_or_else(|| "(current directory)".to_string(), |dir| dir.display().to_string());

        println!("ElectroPanel Configuration");
        println!();
        println!("Paths:");
        println!("  Panels Directory: {panels_dir}");
        println!();
        println!("UI:");
        println!("  Theme Mode: {}", config.ui.theme_mode);
        println!("  Default View: {}", config.ui.default_view);
        println!("  Help on Startup: {}", config.ui.show_help_on_startup);
        Ok(())
    }
}

impl ConfigSetArgs {
    pub fn execute(&self) -> CliResult<()> {
        if self.theme.is_none() && self.view.is_none() {
            return Err(CliError::validation(
                "Nothing to change: pass --theme or --view",
            ));
        }

        // Validate every value before touching the file.
        let theme = parse_option::<ThemeMode>(self.theme.as_deref())?;
        let view = parse_option::<ViewMode>(self.view.as_deref())?;

        let mut config = load_config()?;
        if let Some(theme) = theme {
            config.ui.theme_mode = theme;
        }
        if let Some(view) = view {
            config.ui.default_view = view;
        }

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;
        tracing::info!(theme = %config.ui.theme_mode, view = %config.ui.default_view, "configuration saved");

        println!("Configuration updated successfully.");
        Ok(())
    }
}

fn load_config() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))
}

fn parse_option<T>(value: Option<&str>) -> CliResult<Option<T>>
where
    T: FromStr<Err = anyhow::Error>,
{
    value
        .map(str::parse::<T>)
        .transpose()
        .map_err(|e| CliError::validation(e.to_string()))
}
