//! Panel project: metadata plus the layout being edited.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::device::DeviceDefinition;
use crate::models::panel::{InstanceId, PanelLayout, PlacedDevice};

/// Current panel file schema version.
pub const PANEL_FILE_VERSION: &str = "1.0";

/// Descriptive metadata stored alongside the placements.
///
/// # Validation
///
/// - name must be non-empty, max 100 characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelMetadata {
    /// Project name (e.g., "Apartment 12 main panel")
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Creator name
    #[serde(default)]
    pub author: String,
    /// Creation timestamp
    pub created: DateTime<Utc>,
    /// Last modification timestamp
    pub modified: DateTime<Utc>,
}

impl PanelMetadata {
    /// Creates metadata stamped with the current time.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Self::validate_name(&name)?;

        let now = Utc::now();
        Ok(Self {
            name,
            description: String::new(),
            author: String::new(),
            created: now,
            modified: now,
        })
    }

    /// Validates a project name.
    pub fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("Panel name cannot be empty");
        }

        if name.chars().count() > 100 {
            anyhow::bail!(
                "Panel name '{}' exceeds maximum length of 100 characters (got {})",
                name,
                name.chars().count()
            );
        }

        Ok(())
    }

    /// Updates the modification timestamp to now.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}

impl Default for PanelMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            name: "Untitled Panel".to_string(),
            description: String::new(),
            author: String::new(),
            created: now,
            modified: now,
        }
    }
}

/// A panel document: what gets saved, loaded, exported and edited.
///
/// Mutating helpers forward to [`PanelLayout`] and touch the metadata
/// timestamp when the layout actually changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelProject {
    /// Descriptive metadata
    pub metadata: PanelMetadata,
    /// Placed devices and selection
    pub layout: PanelLayout,
}

impl PanelProject {
    /// Creates an empty project.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            metadata: PanelMetadata::new(name)?,
            layout: PanelLayout::new(),
        })
    }

    /// Adds a device and touches the metadata.
    pub fn add_device(&mut self, definition: &DeviceDefinition) -> PlacedDevice {
        let placed = self.layout.add_device(definition);
        self.metadata.touch();
        placed
    }

    /// Removes a device; touches the metadata only if something was removed.
    pub fn remove_device(&mut self, instance_id: InstanceId) -> bool {
        let removed = self.layout.remove_device(instance_id);
        if removed {
            self.metadata.touch();
        }
        removed
    }

    /// Clears the layout; touches the metadata only if it was non-empty.
    pub fn clear_all(&mut self) {
        let had_devices = !self.layout.is_empty();
        self.layout.clear_all();
        if had_devices {
            self.metadata.touch();
        }
    }
}

impl Default for PanelProject {
    fn default() -> Self {
        Self {
            metadata: PanelMetadata::default(),
            layout: PanelLayout::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::device::DeviceSpec;

    #[test]
    fn test_metadata_name_validation() {
        assert!(PanelMetadata::new("Main panel").is_ok());
        assert!(PanelMetadata::new("").is_err());
        assert!(PanelMetadata::new("x".repeat(101)).is_err());
    }

    #[test]
    fn test_remove_unknown_does_not_touch() {
        let mut project = PanelProject::new("Test").unwrap();
        let modified = project.metadata.modified;
        assert!(!project.remove_device(InstanceId::new(1)));
        assert_eq!(project.metadata.modified, modified);
    }

    #[test]
    fn test_add_device_forwards_to_layout() {
        let mut project = PanelProject::new("Test").unwrap();
        let meter = DeviceDefinition::new(
            "meter-1",
            "Energy meter",
            6,
            DeviceSpec::Meter { rated_voltage: 230 },
        )
        .unwrap();
        let placed = project.add_device(&meter);
        assert_eq!(placed.position, 0);
        assert_eq!(project.layout.total_slots_used(), 6);
        assert!(project.metadata.modified >= project.metadata.created);
    }
}
