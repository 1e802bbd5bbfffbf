//! Panel file format (`.panel.json`).
//!
//! A panel file stores metadata and an ordered list of placements. Each
//! placement references a catalog entry by id; the definition snapshot is
//! resolved against the catalog when the file is read.
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "metadata": { "name": "Main panel", "created": "...", "modified": "..." },
//!   "placements": [ { "catalog_id": "br-c16", "instance_id": 1, "position": 0 } ]
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::Catalog;
use crate::models::{
    InstanceId, PanelLayout, PanelMetadata, PanelProject, PlacedDevice, MAX_RAIL_SLOTS,
    PANEL_FILE_VERSION,
};

/// On-disk representation of a panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelFile {
    /// Schema version
    pub version: String,
    /// Project metadata
    pub metadata: PanelMetadata,
    /// Placements in slot order
    #[serde(default)]
    pub placements: Vec<PlacementRecord>,
}

/// One stored placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// Catalog entry the placement was created from
    pub catalog_id: String,
    /// Placement id
    pub instance_id: InstanceId,
    /// Zero-based start slot
    pub position: u32,
}

impl PanelFile {
    /// Captures a project for writing.
    #[must_use]
    pub fn from_project(project: &PanelProject) -> Self {
        let placements = project
            .layout
            .devices()
            .iter()
            .map(|placed| PlacementRecord {
                catalog_id: placed.device.id.clone(),
                instance_id: placed.instance_id,
                position: placed.position,
            })
            .collect();

        Self {
            version: PANEL_FILE_VERSION.to_string(),
            metadata: project.metadata.clone(),
            placements,
        }
    }

    /// Resolves placements against the catalog and rebuilds the project.
    pub fn into_project(self, catalog: &Catalog) -> Result<PanelProject> {
        if self.version != PANEL_FILE_VERSION {
            anyhow::bail!(
                "Unsupported panel file version '{}' (expected {})",
                self.version,
                PANEL_FILE_VERSION
            );
        }

        PanelMetadata::validate_name(&self.metadata.name)?;

        let placements = self
            .placements
            .into_iter()
            .map(|record| {
                let device = catalog.get(&record.catalog_id).with_context(|| {
                    format!(
                        "Placement {} references unknown catalog id '{}'",
                        record.instance_id, record.catalog_id
                    )
                })?;
                Ok(PlacedDevice {
                    instance_id: record.instance_id,
                    position: record.position,
                    device: device.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let layout = PanelLayout::from_placements(placements)?;

        Ok(PanelProject {
            metadata: self.metadata,
            layout,
        })
    }
}

/// Parses panel JSON text.
pub fn parse_panel_str(content: &str, catalog: &Catalog) -> Result<PanelProject> {
    let file: PanelFile = serde_json::from_str(content).context("Invalid panel file JSON")?;
    file.into_project(catalog)
}

/// Reads and parses a panel file.
pub fn parse_panel_file(path: &Path, catalog: &Catalog) -> Result<PanelProject> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read panel file: {}", path.display()))?;
    parse_panel_str(&content, catalog)
}

/// Serializes a project to pretty-printed JSON.
///
/// Refuses rails longer than [`MAX_RAIL_SLOTS`], which could not be read back.
pub fn serialize_panel(project: &PanelProject) -> Result<String> {
    let rail_length = project.layout.next_position();
    if rail_length > MAX_RAIL_SLOTS {
        anyhow::bail!(
            "Panel spans {rail_length} modules, more than the {MAX_RAIL_SLOTS} a panel file can hold"
        );
    }

    let mut json = serde_json::to_string_pretty(&PanelFile::from_project(project))
        .context("Failed to serialize panel")?;
    json.push('\n');
    Ok(json)
}

/// Writes a project to disk atomically (temp file + rename).
pub fn save_panel_file(project: &PanelProject, path: &Path) -> Result<()> {
    let json = serialize_panel(project)?;
    atomic_write(path, &json)
}

fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("json.tmp");

    std::fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write to temporary file: {}", temp_path.display()))?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temporary file to: {}", path.display()))?;

    Ok(())
}
