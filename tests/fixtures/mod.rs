//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use electropanel::catalog::Catalog;
use electropanel::config::CONFIG_DIR_ENV;
use electropanel::models::PanelProject;
use electropanel::services::PanelService;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the electropanel binary
pub fn electropanel_bin() -> &'static str {
    env!("CARGO_BIN_EXE_electropanel")
}

/// Builds a project named `name` with `catalog_ids` placed left to right.
pub fn test_project(name: &str, catalog_ids: &[&str]) -> PanelProject {
    let catalog = Catalog::load().expect("catalog should load");
    let mut project = PanelProject::new(name).expect("valid project name");
    for id in catalog_ids {
        let definition = catalog
            .get(id)
            .unwrap_or_else(|| panic!("fixture uses unknown catalog id {id}"));
        project.add_device(definition);
    }
    project
}

/// Writes `project` to a panel file in a fresh temp directory.
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub fn write_panel_file(project: &PanelProject) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("test.panel.json");
    PanelService::save(project, &path).expect("Failed to write panel file");
    (path, temp_dir)
}

/// Shorthand for a panel file holding `catalog_ids`.
pub fn create_temp_panel_file(catalog_ids: &[&str]) -> (PathBuf, TempDir) {
    write_panel_file(&test_project("Test Panel", catalog_ids))
}

/// Reads a panel file back through the library.
pub fn load_panel_file(path: &Path) -> PanelProject {
    let catalog = Catalog::load().expect("catalog should load");
    PanelService::load(path, &catalog).expect("panel file should load")
}

/// Creates a Command with an isolated config directory.
pub fn isolated_config_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(electropanel_bin());
    cmd.env(CONFIG_DIR_ENV, config_dir);
    cmd.args(args);
    cmd
}

/// Runs the binary with `args` in an isolated config directory.
pub fn run(args: &[&str]) -> Output {
    let config_dir = TempDir::new().expect("Failed to create temp dir");
    isolated_config_command(args, config_dir.path())
        .output()
        .expect("Failed to execute command")
}

/// Parses stdout as JSON, with stderr in the failure message.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not valid JSON ({e}). stdout: {} stderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    })
}
