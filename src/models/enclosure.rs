//! Enclosure size recommendation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard enclosure capacities in DIN-rail slots, ascending.
pub const STANDARD_ENCLOSURE_SIZES: [u32; 3] = [12, 24, 36];

/// Recommended enclosure for a given slot usage.
///
/// Usage above the largest standard size yields [`EnclosureSize::Oversized`]
/// rather than clamping to 36, so callers can warn instead of silently
/// under-recommending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnclosureSize {
    /// A standard housing with the given slot capacity
    Standard {
        /// Slot capacity (12, 24 or 36)
        capacity: u32,
    },
    /// Usage exceeds every standard housing
    Oversized {
        /// Slots actually required
        required: u32,
    },
}

impl EnclosureSize {
    /// Smallest standard size that fits `total_slots`.
    #[must_use]
    pub fn recommend(total_slots: u32) -> Self {
        STANDARD_ENCLOSURE_SIZES
            .iter()
            .copied()
            .find(|&capacity| capacity >= total_slots)
            .map_or(
                Self::Oversized {
                    required: total_slots,
                },
                |capacity| Self::Standard { capacity },
            )
    }

    /// Slot capacity, `None` when oversized.
    #[must_use]
    pub const fn capacity(&self) -> Option<u32> {
        match *self {
            Self::Standard { capacity } => Some(capacity),
            Self::Oversized { .. } => None,
        }
    }

    /// Whether usage exceeds the largest standard housing.
    #[must_use]
    pub const fn is_oversized(&self) -> bool {
        matches!(self, Self::Oversized { .. })
    }

    /// Remaining free slots in the housing for the given usage.
    #[must_use]
    pub fn free_slots(&self, used: u32) -> Option<u32> {
        self.capacity().map(|capacity| capacity.saturating_sub(used))
    }
}

impl fmt::Display for EnclosureSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard { capacity } => write!(f, "{capacity} modules"),
            Self::Oversized { required } => {
                let largest = STANDARD_ENCLOSURE_SIZES[STANDARD_ENCLOSURE_SIZES.len() - 1];
                write!(f, "oversized ({required} > {largest} modules)")
            }
        }
    }
}
