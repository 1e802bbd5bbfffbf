//! Service layer for business logic.
//!
//! Services coordinate between models, the parser and the presentation
//! layers (TUI, CLI, web).

pub mod bom;
pub mod panels;
pub mod summary;

// Re-export commonly used types and functions
pub use bom::{bill_of_materials, format_bom_text, BomLine};
pub use panels::PanelService;
pub use summary::PanelSummary;
