//! Panel file I/O service.
//!
//! This module centralizes panel file operations so that every entry point
//! (TUI, CLI, web) reports the same path context on failure.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::models::PanelProject;
use crate::parser;

/// Default extension for panel files.
pub const PANEL_FILE_EXTENSION: &str = "panel.json";

/// Service for loading and saving panel files.
pub struct PanelService;

impl PanelService {
    /// Loads a panel file, resolving placements against `catalog`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use electropanel::catalog::Catalog;
    /// use electropanel::services::PanelService;
    ///
    /// let catalog = Catalog::load()?;
    /// let project = PanelService::load(Path::new("main.panel.json"), &catalog)?;
    /// println!("{} devices", project.layout.len());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &Path, catalog: &Catalog) -> Result<PanelProject> {
        let project = parser::parse_panel_file(path, catalog)
            .with_context(|| format!("Failed to load panel from {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            devices = project.layout.len(),
            "panel loaded"
        );
        Ok(project)
    }

    /// Saves a panel file atomically.
    pub fn save(project: &PanelProject, path: &Path) -> Result<()> {
        parser::save_panel_file(project, path)
            .with_context(|| format!("Failed to save panel to {}", path.display()))?;
        tracing::info!(path = %path.display(), "panel saved");
        Ok(())
    }

    /// Creates a new empty panel file.
    ///
    /// Refuses to overwrite an existing file unless `overwrite` is set.
    pub fn create(path: &Path, name: &str, overwrite: bool) -> Result<PanelProject> {
        if path.exists() && !overwrite {
            anyhow::bail!("Panel file already exists: {}", path.display());
        }

        let project = PanelProject::new(name)?;
        Self::save(&project, path)?;
        Ok(project)
    }

    /// Derives a default file path for a project name inside `dir`.
    #[must_use]
    pub fn default_path(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}.{PANEL_FILE_EXTENSION}", sanitize_filename(name)))
    }
}

/// Sanitizes a project name for use as a filename.
///
/// ```
/// # use electropanel::services::panels::sanitize_filename;
/// assert_eq!(sanitize_filename("Main Panel"), "main_panel");
/// assert_eq!(sanitize_filename("Flat/12:A"), "flat_12_a");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    name.trim()
        .replace(['/', '\\', ':', ' '], "_")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("My Panel"), "my_panel");
        assert_eq!(sanitize_filename("Panel\\Name"), "panel_name");
        assert_eq!(sanitize_filename("  Garage  "), "garage");
    }

    #[test]
    fn test_default_path() {
        let path = PanelService::default_path(Path::new("/tmp"), "Main Panel");
        assert_eq!(path, PathBuf::from("/tmp/main_panel.panel.json"));
    }

    #[test]
    fn test_create_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("p.panel.json");

        PanelService::create(&path, "First", false).unwrap();
        assert!(PanelService::create(&path, "Second", false).is_err());
        let project = PanelService::create(&path, "Second", true).unwrap();
        assert_eq!(project.metadata.name, "Second");
    }

    #[test]
    fn test_load_missing_file_mentions_path() {
        let catalog = Catalog::load().unwrap();
        let err = PanelService::load(Path::new("/tmp/nonexistent_panel_xyz.json"), &catalog)
            .unwrap_err();
        assert!(err.to_string().contains("nonexistent_panel_xyz"));
    }
}
