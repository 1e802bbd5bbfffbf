//! Data models for device definitions, panel layouts, and projects.
//!
//! Models are independent of UI and file formats.

pub mod device;
pub mod enclosure;
pub mod panel;
pub mod project;

// Re-export all model types
pub use device::{DeviceDefinition, DeviceKind, DeviceSpec, TripCurve};
pub use enclosure::{EnclosureSize, STANDARD_ENCLOSURE_SIZES};
pub use panel::{InstanceId, PanelLayout, PlacedDevice, MAX_INSTANCE_ID, MAX_RAIL_SLOTS};
pub use project::{PanelMetadata, PanelProject, PANEL_FILE_VERSION};
