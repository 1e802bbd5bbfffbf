//! Device definitions for DIN-rail panel components.
//!
//! A [`DeviceDefinition`] describes one catalog entry: its identity, how many
//! DIN-rail slots it occupies, and a [`DeviceSpec`] carrying only the
//! electrical attributes that make sense for its kind.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Closed set of device categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// Miniature circuit breaker
    Breaker,
    /// Residual-current device
    Rcd,
    /// Combination breaker + residual-current device
    Rcbo,
    /// Voltage monitoring relay
    Relay,
    /// Contactor
    Contactor,
    /// Energy meter
    Meter,
}

impl DeviceKind {
    /// All kinds in catalog order.
    pub const ALL: [Self; 6] = [
        Self::Breaker,
        Self::Rcd,
        Self::Rcbo,
        Self::Relay,
        Self::Contactor,
        Self::Meter,
    ];

    /// Wire identifier (matches the serde representation).
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Breaker => "breaker",
            Self::Rcd => "rcd",
            Self::Rcbo => "rcbo",
            Self::Relay => "relay",
            Self::Contactor => "contactor",
            Self::Meter => "meter",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Breaker => "Circuit breaker",
            Self::Rcd => "Residual-current device",
            Self::Rcbo => "RCBO",
            Self::Relay => "Voltage relay",
            Self::Contactor => "Contactor",
            Self::Meter => "Energy meter",
        }
    }

    /// Short tag used on the rail diagram.
    #[must_use]
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Breaker => "QF",
            Self::Rcd => "RCD",
            Self::Rcbo => "DIF",
            Self::Relay => "RV",
            Self::Contactor => "KM",
            Self::Meter => "PI",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DeviceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown device kind '{s}'. Expected one of: breaker, rcd, rcbo, relay, contactor, meter"
                )
            })
    }
}

/// Breaker trip characteristic (instantaneous-trip multiplier curve).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripCurve {
    /// 3-5x rated current
    B,
    /// 5-10x rated current
    C,
    /// 10-20x rated current
    D,
}

impl fmt::Display for TripCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        };
        f.write_str(letter)
    }
}

/// Kind-specific electrical attributes.
///
/// Each variant carries exactly the fields its kind requires, so a residual
/// current device without a leakage threshold cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DeviceSpec {
    /// Miniature circuit breaker
    Breaker {
        /// Trip characteristic
        trip_curve: TripCurve,
        /// Rated current in amps
        rated_current_amps: u32,
        /// Rated voltage in volts
        rated_voltage: u32,
    },
    /// Residual-current device
    Rcd {
        /// Rated current in amps
        rated_current_amps: u32,
        /// Rated voltage in volts
        rated_voltage: u32,
        /// Leakage trip threshold in milliamps
        leakage_ma: u32,
    },
    /// Combination breaker + residual-current device
    Rcbo {
        /// Trip characteristic
        trip_curve: TripCurve,
        /// Rated current in amps
        rated_current_amps: u32,
        /// Rated voltage in volts
        rated_voltage: u32,
        /// Leakage trip threshold in milliamps
        leakage_ma: u32,
    },
    /// Voltage monitoring relay (no current rating)
    Relay {
        /// Rated voltage in volts
        rated_voltage: u32,
    },
    /// Contactor
    Contactor {
        /// Rated current in amps
        rated_current_amps: u32,
        /// Rated coil/line voltage in volts, if specified
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rated_voltage: Option<u32>,
    },
    /// Energy meter
    Meter {
        /// Rated voltage in volts
        rated_voltage: u32,
    },
}

impl DeviceSpec {
    /// The kind this spec belongs to.
    #[must_use]
    pub const fn kind(&self) -> DeviceKind {
        match self {
            Self::Breaker { .. } => DeviceKind::Breaker,
            Self::Rcd { .. } => DeviceKind::Rcd,
            Self::Rcbo { .. } => DeviceKind::Rcbo,
            Self::Relay { .. } => DeviceKind::Relay,
            Self::Contactor { .. } => DeviceKind::Contactor,
            Self::Meter { .. } => DeviceKind::Meter,
        }
    }

    /// Rated current, absent for devices without one.
    #[must_use]
    pub const fn rated_current_amps(&self) -> Option<u32> {
        match *self {
            Self::Breaker {
                rated_current_amps, ..
            }
            | Self::Rcd {
                rated_current_amps, ..
            }
            | Self::Rcbo {
                rated_current_amps, ..
            }
            | Self::Contactor {
                rated_current_amps, ..
            } => Some(rated_current_amps),
            Self::Relay { .. } | Self::Meter { .. } => None,
        }
    }

    /// Rated voltage, if any.
    #[must_use]
    pub const fn rated_voltage(&self) -> Option<u32> {
        match *self {
            Self::Breaker { rated_voltage, .. }
            | Self::Rcd { rated_voltage, .. }
            | Self::Rcbo { rated_voltage, .. }
            | Self::Relay { rated_voltage }
            | Self::Meter { rated_voltage } => Some(rated_voltage),
            Self::Contactor { rated_voltage, .. } => rated_voltage,
        }
    }

    /// Trip characteristic for breakers and RCBOs.
    #[must_use]
    pub const fn trip_curve(&self) -> Option<TripCurve> {
        match *self {
            Self::Breaker { trip_curve, .. } | Self::Rcbo { trip_curve, .. } => Some(trip_curve),
            _ => None,
        }
    }

    /// Leakage threshold for RCDs and RCBOs.
    #[must_use]
    pub const fn leakage_ma(&self) -> Option<u32> {
        match *self {
            Self::Rcd { leakage_ma, .. } | Self::Rcbo { leakage_ma, .. } => Some(leakage_ma),
            _ => None,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.rated_current_amps() == Some(0) {
            anyhow::bail!("Rated current must be positive");
        }
        if self.rated_voltage() == Some(0) {
            anyhow::bail!("Rated voltage must be positive");
        }
        if self.leakage_ma() == Some(0) {
            anyhow::bail!("Leakage threshold must be positive");
        }
        Ok(())
    }
}

/// One catalog entry.
///
/// # Validation
///
/// - id and name must be non-empty
/// - slot_width is at least 1 (enforced by the type)
/// - all ratings present for the kind are positive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDefinition {
    /// Stable catalog key (e.g., "br-c16")
    pub id: String,
    /// Display label (e.g., "Breaker C16")
    pub name: String,
    /// Number of contiguous DIN-rail slots the device occupies
    pub slot_width: NonZeroU32,
    /// Kind-specific attributes
    #[serde(flatten)]
    pub spec: DeviceSpec,
}

impl DeviceDefinition {
    /// Creates a validated device definition.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        slot_width: u32,
        spec: DeviceSpec,
    ) -> Result<Self> {
        let id = id.into();
        let name = name.into();

        if id.trim().is_empty() {
            anyhow::bail!("Device id cannot be empty");
        }
        if name.trim().is_empty() {
            anyhow::bail!("Device '{id}' has an empty name");
        }
        let Some(slot_width) = NonZeroU32::new(slot_width) else {
            anyhow::bail!("Device '{id}' must occupy at least one slot");
        };
        spec.validate()
            .map_err(|e| anyhow::anyhow!("Device '{id}': {e}"))?;

        Ok(Self {
            id,
            name,
            slot_width,
            spec,
        })
    }

    /// Re-checks the invariants of a definition built outside [`Self::new`].
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            anyhow::bail!("Device id cannot be empty");
        }
        if self.name.trim().is_empty() {
            anyhow::bail!("Device '{}' has an empty name", self.id);
        }
        self.spec
            .validate()
            .map_err(|e| anyhow::anyhow!("Device '{}': {e}", self.id))
    }

    /// Device kind.
    #[must_use]
    pub const fn kind(&self) -> DeviceKind {
        self.spec.kind()
    }

    /// Slot width as a plain integer.
    #[must_use]
    pub const fn slots(&self) -> u32 {
        self.slot_width.get()
    }

    /// Rated current, absent for devices without one.
    #[must_use]
    pub const fn rated_current_amps(&self) -> Option<u32> {
        self.spec.rated_current_amps()
    }

    /// Rated voltage, if any.
    #[must_use]
    pub const fn rated_voltage(&self) -> Option<u32> {
        self.spec.rated_voltage()
    }

    /// Trip characteristic, if any.
    #[must_use]
    pub const fn trip_curve(&self) -> Option<TripCurve> {
        self.spec.trip_curve()
    }

    /// Leakage threshold, if any.
    #[must_use]
    pub const fn leakage_ma(&self) -> Option<u32> {
        self.spec.leakage_ma()
    }

    /// Compact ratings text, e.g. "16A • 230V • C • 30mA".
    #[must_use]
    pub fn ratings_label(&self) -> String {
        let mut parts = Vec::new();
        if let Some(amps) = self.rated_current_amps() {
            parts.push(format!("{amps}A"));
        }
        if let Some(volts) = self.rated_voltage() {
            parts.push(format!("{volts}V"));
        }
        if let Some(curve) = self.trip_curve() {
            parts.push(curve.to_string());
        }
        if let Some(leakage) = self.leakage_ma() {
            parts.push(format!("{leakage}mA"));
        }
        parts.join(" • ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaker(amps: u32) -> DeviceSpec {
        DeviceSpec::Breaker {
            trip_curve: TripCurve::C,
            rated_current_amps: amps,
            rated_voltage: 230,
        }
    }

    #[test]
    fn test_new_rejects_zero_slot_width() {
        let err = DeviceDefinition::new("br-c16", "Breaker C16", 0, breaker(16)).unwrap_err();
        assert!(err.to_string().contains("at least one slot"));
    }

    #[test]
    fn test_new_rejects_empty_id_and_name() {
        assert!(DeviceDefinition::new("", "Breaker", 1, breaker(16)).is_err());
        assert!(DeviceDefinition::new("br", "  ", 1, breaker(16)).is_err());
    }

    #[test]
    fn test_new_rejects_zero_rating() {
        let err = DeviceDefinition::new("br-c0", "Breaker C0", 1, breaker(0)).unwrap_err();
        assert!(err.to_string().contains("Rated current"));
    }

    #[test]
    fn test_relay_has_no_current_rating() {
        let relay = DeviceDefinition::new(
            "relay-16",
            "Voltage relay",
            2,
            DeviceSpec::Relay { rated_voltage: 230 },
        )
        .unwrap();
        assert_eq!(relay.kind(), DeviceKind::Relay);
        assert_eq!(relay.rated_current_amps(), None);
        assert_eq!(relay.rated_voltage(), Some(230));
        assert_eq!(relay.ratings_label(), "230V");
    }

    #[test]
    fn test_rcbo_attributes() {
        let rcbo = DeviceDefinition::new(
            "rcbo-c16-30",
            "RCBO C16 30mA",
            2,
            DeviceSpec::Rcbo {
                trip_curve: TripCurve::C,
                rated_current_amps: 16,
                rated_voltage: 230,
                leakage_ma: 30,
            },
        )
        .unwrap();
        assert_eq!(rcbo.trip_curve(), Some(TripCurve::C));
        assert_eq!(rcbo.leakage_ma(), Some(30));
        assert_eq!(rcbo.ratings_label(), "16A • 230V • C • 30mA");
    }

    #[test]
    fn test_json_shape_is_flat_and_tagged() {
        let def = DeviceDefinition::new("br-b6", "Breaker B6", 1, breaker(6)).unwrap();
        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(value["kind"], "breaker");
        assert_eq!(value["slot_width"], 1);
        assert_eq!(value["trip_curve"], "C");
        assert!(value.get("leakage_ma").is_none());
    }

    #[test]
    fn test_deserialize_rejects_zero_slot_width() {
        let json = r#"{"id":"x","name":"X","slot_width":0,"kind":"relay","rated_voltage":230}"#;
        assert!(serde_json::from_str::<DeviceDefinition>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_missing_leakage() {
        let json = r#"{"id":"rcd","name":"RCD","slot_width":2,"kind":"rcd","rated_current_amps":16,"rated_voltage":230}"#;
        assert!(serde_json::from_str::<DeviceDefinition>(json).is_err());
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("RCBO".parse::<DeviceKind>().unwrap(), DeviceKind::Rcbo);
        assert!("fuse".parse::<DeviceKind>().is_err());
    }
}
