//! Editor preferences stored as TOML in the platform config directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "ELECTROPANEL_CONFIG_DIR";

/// Which palette the editor uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Follow the OS appearance
    #[default]
    Auto,
    Dark,
    Light,
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Dark => "dark",
            Self::Light => "light",
        })
    }
}

impl FromStr for ThemeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => anyhow::bail!("Unknown theme '{s}' (expected auto, dark or light)"),
        }
    }
}

/// How the panel is drawn in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Ordered list of placements with slot ranges
    #[default]
    List,
    /// Schematic DIN rail drawn to scale
    Rail,
}

impl ViewMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::List => Self::Rail,
            Self::Rail => Self::List,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list",
            Self::Rail => "rail",
        })
    }
}

impl FromStr for ViewMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "list" => Ok(Self::List),
            "rail" => Ok(Self::Rail),
            _ => anyhow::bail!("Unknown view '{s}' (expected list or rail)"),
        }
    }
}

/// Where panel files live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory where new panels are saved by default
    pub panels_dir: Option<PathBuf>,
}

/// Editor appearance and startup behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Open the help overlay when the editor starts
    pub show_help_on_startup: bool,
    #[serde(default)]
    pub theme_mode: ThemeMode,
    /// Panel view shown when the editor opens
    #[serde(default)]
    pub default_view: ViewMode,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_help_on_startup: true,
            theme_mode: ThemeMode::default(),
            default_view: ViewMode::default(),
        }
    }
}

/// Persisted preferences.
///
/// # File Location
///
/// - Linux: `~/.config/ElectroPanel/config.toml`
/// - macOS: `~/Library/Application Support/ElectroPanel/config.toml`
/// - Windows: `%APPDATA%\ElectroPanel\config.toml`
///
/// Setting `ELECTROPANEL_CONFIG_DIR` replaces the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a config file has been written yet.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// `$ELECTROPANEL_CONFIG_DIR`, else `<platform config dir>/ElectroPanel`.
    pub fn config_dir() -> Result<PathBuf> {
        match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => Ok(dirs::config_dir()
                .context("No platform config directory available")?
                .join("ElectroPanel")),
        }
    }

    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Reads the config file, or returns defaults when there is none.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates, then writes atomically through a temp file.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let path = Self::config_file_path()?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// The panels directory, when set, must not name an existing file.
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.paths.panels_dir {
            if dir.exists() && !dir.is_dir() {
                anyhow::bail!("Panels path is not a directory: {}", dir.display());
            }
        }
        Ok(())
    }

    /// Directory for new panels: the configured one, else the working directory.
    #[must_use]
    pub fn panels_dir(&self) -> PathBuf {
        self.paths
            .panels_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
