//! Panel layout model: placed devices on a DIN rail.
//!
//! # Placement rules
//!
//! - New devices are appended right after the highest occupied slot.
//! - Removal never compacts: freed slots stay empty until the panel is cleared.
//! - Instance ids come from a counter owned by the layout and are never reused.
//! - Devices are kept in ascending `position` order.
//! - A stored panel spans at most [`MAX_RAIL_SLOTS`] modules and uses instance
//!   ids up to [`MAX_INSTANCE_ID`].

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::models::device::DeviceDefinition;
use crate::models::enclosure::EnclosureSize;

/// Longest rail, in modules, a panel file may describe.
pub const MAX_RAIL_SLOTS: u32 = 10_000;

/// Largest instance id accepted from a panel file (the largest integer JSON
/// clients represent exactly).
pub const MAX_INSTANCE_ID: u64 = (1 << 53) - 1;

/// Identifier of one placement, distinct from the catalog id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Wraps a raw id value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for InstanceId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s.trim().trim_start_matches('#');
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| anyhow::anyhow!("Invalid instance id '{s}': expected a number like 3 or #3"))
    }
}

/// A device mounted on the rail.
///
/// Holds a snapshot of the catalog definition taken at placement time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedDevice {
    /// Placement id
    pub instance_id: InstanceId,
    /// Zero-based start slot
    pub position: u32,
    /// Definition snapshot
    pub device: DeviceDefinition,
}

impl PlacedDevice {
    /// First slot after this device.
    #[must_use]
    pub const fn end_slot(&self) -> u32 {
        self.position.saturating_add(self.device.slots())
    }

    /// Occupied slots `[position, position + slot_width)`.
    #[must_use]
    pub const fn slot_range(&self) -> Range<u32> {
        self.position..self.end_slot()
    }

    /// Human-facing 1-based slot range, e.g. "3-4" (or "3" for one slot).
    #[must_use]
    pub fn slot_label(&self) -> String {
        let first = self.position.saturating_add(1);
        let last = self.end_slot();
        if first == last {
            first.to_string()
        } else {
            format!("{first}-{last}")
        }
    }

    fn overlaps(&self, other: &Self) -> bool {
        self.position < other.end_slot() && other.position < self.end_slot()
    }
}

/// Mutable sequence of placed devices plus the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLayout {
    devices: Vec<PlacedDevice>,
    selected: Option<InstanceId>,
    next_instance_id: u64,
}

impl PanelLayout {
    /// Creates an empty panel.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            devices: Vec::new(),
            selected: None,
            next_instance_id: 1,
        }
    }

    /// Rebuilds a panel from stored placements.
    ///
    /// Rejects duplicate or out-of-range instance ids, devices reaching past
    /// [`MAX_RAIL_SLOTS`] and overlapping slot ranges. The result is ordered by
    /// position and allocates ids above the largest one seen.
    pub fn from_placements(mut placements: Vec<PlacedDevice>) -> Result<Self> {
        let mut seen = HashSet::new();
        for placed in &placements {
            placed.device.validate()?;
            if placed.instance_id.get() > MAX_INSTANCE_ID {
                anyhow::bail!(
                    "Instance id {} exceeds the maximum of {MAX_INSTANCE_ID}",
                    placed.instance_id
                );
            }
            if !seen.insert(placed.instance_id) {
                anyhow::bail!("Duplicate instance id {}", placed.instance_id);
            }
            let within_rail = placed
                .position
                .checked_add(placed.device.slots())
                .is_some_and(|end| end <= MAX_RAIL_SLOTS);
            if !within_rail {
                anyhow::bail!(
                    "Device {} at slot {} extends past the {MAX_RAIL_SLOTS}-module rail limit",
                    placed.instance_id,
                    u64::from(placed.position) + 1
                );
            }
        }

        placements.sort_by_key(|placed| placed.position);

        for pair in placements.windows(2) {
            if pair[0].overlaps(&pair[1]) {
                anyhow::bail!(
                    "Devices {} (slots {}) and {} (slots {}) overlap",
                    pair[0].instance_id,
                    pair[0].slot_label(),
                    pair[1].instance_id,
                    pair[1].slot_label()
                );
            }
        }

        // Ids are bounded by MAX_INSTANCE_ID above, so this cannot wrap.
        let next_instance_id = placements
            .iter()
            .map(|placed| placed.instance_id.get())
            .max()
            .map_or(1, |max| max + 1);

        Ok(Self {
            devices: placements,
            selected: None,
            next_instance_id,
        })
    }

    /// Placed devices in ascending slot order.
    #[must_use]
    pub fn devices(&self) -> &[PlacedDevice] {
        &self.devices
    }

    /// Number of placed devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether no devices are placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Looks up a placed device.
    #[must_use]
    pub fn get(&self, instance_id: InstanceId) -> Option<&PlacedDevice> {
        self.devices
            .iter()
            .find(|placed| placed.instance_id == instance_id)
    }

    /// Index of a placed device in the sequence.
    #[must_use]
    pub fn index_of(&self, instance_id: InstanceId) -> Option<usize> {
        self.devices
            .iter()
            .position(|placed| placed.instance_id == instance_id)
    }

    /// Currently selected instance id (may be stale).
    #[must_use]
    pub const fn selected(&self) -> Option<InstanceId> {
        self.selected
    }

    /// The selected device, if the selection matches a placed device.
    #[must_use]
    pub fn selected_device(&self) -> Option<&PlacedDevice> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Slot where the next device will start.
    #[must_use]
    pub fn next_position(&self) -> u32 {
        self.devices
            .iter()
            .map(PlacedDevice::end_slot)
            .max()
            .unwrap_or(0)
    }

    /// Appends a copy of `definition` after the highest occupied slot.
    pub fn add_device(&mut self, definition: &DeviceDefinition) -> PlacedDevice {
        let placed = PlacedDevice {
            instance_id: InstanceId(self.next_instance_id),
            position: self.next_position(),
            device: definition.clone(),
        };
        // Starts at most MAX_INSTANCE_ID + 1, far below u64::MAX.
        self.next_instance_id = self.next_instance_id.saturating_add(1);

        tracing::debug!(
            catalog_id = %placed.device.id,
            instance_id = %placed.instance_id,
            position = placed.position,
            "device added"
        );

        self.devices.push(placed.clone());
        placed
    }

    /// Removes a placed device. Unknown ids are a no-op returning `false`.
    ///
    /// Remaining devices keep their positions. Clears the selection when it
    /// pointed at the removed device.
    pub fn remove_device(&mut self, instance_id: InstanceId) -> bool {
        let Some(index) = self.index_of(instance_id) else {
            tracing::debug!(%instance_id, "remove ignored: no such device");
            return false;
        };

        self.devices.remove(index);
        if self.selected == Some(instance_id) {
            self.selected = None;
        }

        tracing::debug!(%instance_id, "device removed");
        true
    }

    /// Removes every device and clears the selection.
    pub fn clear_all(&mut self) {
        tracing::debug!(count = self.devices.len(), "panel cleared");
        self.devices.clear();
        self.selected = None;
    }

    /// Sets the selection without checking that the id is placed.
    pub fn select(&mut self, instance_id: Option<InstanceId>) {
        self.selected = instance_id;
    }

    /// Sum of slot widths over all placed devices.
    #[must_use]
    pub fn total_slots_used(&self) -> u32 {
        self.devices.iter().map(|placed| placed.device.slots()).sum()
    }

    /// Sum of rated currents, devices without a rating count as zero.
    #[must_use]
    pub fn total_current_amps(&self) -> u32 {
        self.devices
            .iter()
            .filter_map(|placed| placed.device.rated_current_amps())
            .sum()
    }

    /// Smallest standard enclosure for the current usage.
    #[must_use]
    pub fn recommended_enclosure(&self) -> EnclosureSize {
        EnclosureSize::recommend(self.total_slots_used())
    }
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self::new()
    }
}
