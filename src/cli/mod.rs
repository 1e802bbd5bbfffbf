//! CLI command handlers for ElectroPanel.
//!
//! This module provides headless, scriptable access to the catalog and
//! panel files for automation and testing.

pub mod bom;
pub mod catalog;
pub mod common;
pub mod config;
pub mod export;
pub mod panel;

// Re-export types used by main.rs and tests
pub use bom::BomArgs;
pub use catalog::CatalogArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use export::ExportArgs;
pub use panel::PanelArgs;
