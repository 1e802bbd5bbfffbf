//! Parsing and serialization of panel files.

pub mod panel_file;

// Re-export commonly used functions
pub use panel_file::{
    parse_panel_file, parse_panel_str, save_panel_file, serialize_panel, PanelFile,
    PlacementRecord,
};
