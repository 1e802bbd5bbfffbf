//! Built-in device catalog.
//!
//! The catalog is embedded in the binary at compile time and parsed once at
//! startup. It is read-only afterwards: lookups never fail at runtime and
//! listing is a pure function of the embedded data.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::models::{DeviceDefinition, DeviceKind};

/// Catalog schema from devices.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogDocument {
    version: String,
    devices: Vec<DeviceDefinition>,
}

/// Presentation grouping of catalog entries (the browser tabs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogGroup {
    /// Every device
    #[default]
    All,
    /// Circuit breakers
    Breakers,
    /// Residual-current devices
    Rcd,
    /// Combination breakers
    Rcbo,
    /// Relays, contactors and meters
    Other,
}

impl CatalogGroup {
    /// Groups in tab order.
    pub const ALL: [Self; 5] = [Self::All, Self::Breakers, Self::Rcd, Self::Rcbo, Self::Other];

    /// Identifier used on the command line and in query strings.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Breakers => "breakers",
            Self::Rcd => "rcd",
            Self::Rcbo => "rcbo",
            Self::Other => "other",
        }
    }

    /// Tab title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Breakers => "Breakers",
            Self::Rcd => "RCD",
            Self::Rcbo => "RCBO",
            Self::Other => "Other",
        }
    }

    /// Whether a definition belongs to this group.
    #[must_use]
    pub fn contains(self, device: &DeviceDefinition) -> bool {
        match self {
            Self::All => true,
            Self::Breakers => device.kind() == DeviceKind::Breaker,
            Self::Rcd => device.kind() == DeviceKind::Rcd,
            Self::Rcbo => device.kind() == DeviceKind::Rcbo,
            Self::Other => matches!(
                device.kind(),
                DeviceKind::Relay | DeviceKind::Contactor | DeviceKind::Meter
            ),
        }
    }

    /// Next tab, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|g| *g == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Previous tab, wrapping around.
    #[must_use]
    pub fn previous(self) -> Self {
        let index = Self::ALL.iter().position(|g| *g == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for CatalogGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CatalogGroup {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|group| group.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown catalog group '{s}'. Expected one of: all, breakers, rcd, rcbo, other"
                )
            })
    }
}

/// Immutable, ordered device catalog with id lookup.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Definitions in catalog order
    devices: Vec<DeviceDefinition>,
    /// Fast lookup by id
    lookup: HashMap<String, usize>,
}

impl Catalog {
    /// Loads the catalog embedded in the binary.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("devices.json");
        Self::from_json(json_data).context("Failed to load embedded devices.json")
    }

    /// Parses and validates a catalog document.
    ///
    /// Ids must be unique lowercase kebab-case; every definition must pass
    /// [`DeviceDefinition::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let document: CatalogDocument =
            serde_json::from_str(json).context("Failed to parse catalog JSON")?;

        if document.version != "1.0" {
            anyhow::bail!("Unsupported catalog version '{}'", document.version);
        }

        let id_pattern = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$")
            .context("Failed to compile catalog id pattern")?;

        let mut lookup = HashMap::with_capacity(document.devices.len());
        for (idx, device) in document.devices.iter().enumerate() {
            if !id_pattern.is_match(&device.id) {
                anyhow::bail!(
                    "Catalog id '{}' must be lowercase kebab-case",
                    device.id
                );
            }
            device.validate()?;
            if lookup.insert(device.id.clone(), idx).is_some() {
                anyhow::bail!("Duplicate catalog id '{}'", device.id);
            }
        }

        tracing::debug!(devices = document.devices.len(), "catalog loaded");

        Ok(Self {
            devices: document.devices,
            lookup,
        })
    }

    /// Every definition in stable catalog order.
    #[must_use]
    pub fn list_all(&self) -> &[DeviceDefinition] {
        &self.devices
    }

    /// Definitions matching a predicate, in catalog order.
    pub fn filter_by<F>(&self, predicate: F) -> Vec<&DeviceDefinition>
    where
        F: Fn(&DeviceDefinition) -> bool,
    {
        self.devices.iter().filter(|device| predicate(device)).collect()
    }

    /// Definitions in a presentation group.
    #[must_use]
    pub fn group(&self, group: CatalogGroup) -> Vec<&DeviceDefinition> {
        self.filter_by(|device| group.contains(device))
    }

    /// Looks up a definition by catalog id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DeviceDefinition> {
        let idx = self.lookup.get(id)?;
        self.devices.get(*idx)
    }

    /// Case-insensitive search over id and name.
    ///
    /// Exact matches rank first, then prefix matches, then substring
    /// matches; ties keep catalog order. An empty query returns everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&DeviceDefinition> {
        let query = query.trim();
        if query.is_empty() {
            return self.devices.iter().collect();
        }

        let query_lower = query.to_lowercase();
        let mut results: Vec<(&DeviceDefinition, i32)> = self
            .devices
            .iter()
            .filter_map(|device| {
                let id_lower = device.id.to_lowercase();
                let name_lower = device.name.to_lowercase();

                if id_lower == query_lower || name_lower == query_lower {
                    return Some((device, 100));
                }

                if id_lower.starts_with(&query_lower) || name_lower.starts_with(&query_lower) {
                    return Some((device, 50));
                }

                if id_lower.contains(&query_lower) || name_lower.contains(&query_lower) {
                    return Some((device, 10));
                }

                None
            })
            .collect();

        // Stable sort keeps catalog order within a score
        results.sort_by(|a, b| b.1.cmp(&a.1));

        results.into_iter().map(|(device, _)| device).collect()
    }

    /// Search restricted to one group; what the browser tabs show.
    #[must_use]
    pub fn browse(&self, group: CatalogGroup, query: &str) -> Vec<&DeviceDefinition> {
        self.search(query)
            .into_iter()
            .filter(|device| group.contains(device))
            .collect()
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TripCurve;

    fn get_test_catalog() -> Catalog {
        Catalog::load().expect("Failed to load catalog")
    }

    #[test]
    fn test_load_catalog() {
        let catalog = get_test_catalog();
        assert_eq!(catalog.len(), 63);
        assert_eq!(catalog.list_all()[0].id, "br-b6");
    }

    #[test]
    fn test_list_all_is_restartable() {
        let catalog = get_test_catalog();
        let first: Vec<_> = catalog.list_all().iter().map(|d| d.id.clone()).collect();
        let second: Vec<_> = catalog.list_all().iter().map(|d| d.id.clone()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_rcd_has_leakage() {
        let catalog = get_test_catalog();
        let rcds = catalog.filter_by(|d| matches!(d.kind(), DeviceKind::Rcd | DeviceKind::Rcbo));
        assert_eq!(rcds.len(), 27);
        assert!(rcds.iter().all(|d| d.leakage_ma().is_some()));
    }

    #[test]
    fn test_get_by_id() {
        let catalog = get_test_catalog();
        let breaker = catalog.get("br-c16").unwrap();
        assert_eq!(breaker.name, "Breaker C16");
        assert_eq!(breaker.slots(), 1);
        assert_eq!(breaker.rated_current_amps(), Some(16));
        assert_eq!(breaker.trip_curve(), Some(TripCurve::C));
        assert!(catalog.get("br-x99").is_none());
    }

    #[test]
    fn test_special_devices() {
        let catalog = get_test_catalog();
        assert_eq!(catalog.get("relay-16").unwrap().rated_current_amps(), None);
        assert_eq!(catalog.get("cont-25").unwrap().rated_voltage(), None);
        assert_eq!(catalog.get("meter-1").unwrap().slots(), 6);
        assert_eq!(catalog.get("rcd-3p-63-30").unwrap().slots(), 4);
        assert_eq!(catalog.get("br-3p-c32").unwrap().slots(), 3);
    }

    #[test]
    fn test_groups_partition_catalog() {
        let catalog = get_test_catalog();
        let total: usize = [
            CatalogGroup::Breakers,
            CatalogGroup::Rcd,
            CatalogGroup::Rcbo,
            CatalogGroup::Other,
        ]
        .into_iter()
        .map(|group| catalog.group(group).len())
        .sum();
        assert_eq!(total, catalog.len());
        assert_eq!(catalog.group(CatalogGroup::All).len(), catalog.len());
        assert_eq!(catalog.group(CatalogGroup::Breakers).len(), 33);
        assert_eq!(catalog.group(CatalogGroup::Other).len(), 3);
    }

    #[test]
    fn test_group_cycling() {
        assert_eq!(CatalogGroup::All.next(), CatalogGroup::Breakers);
        assert_eq!(CatalogGroup::Other.next(), CatalogGroup::All);
        assert_eq!(CatalogGroup::All.previous(), CatalogGroup::Other);
        assert_eq!("RCBO".parse::<CatalogGroup>().unwrap(), CatalogGroup::Rcbo);
        assert!("fuses".parse::<CatalogGroup>().is_err());
    }

    #[test]
    fn test_search_ranks_exact_first() {
        let catalog = get_test_catalog();
        let results = catalog.search("br-c16");
        assert_eq!(results[0].id, "br-c16");

        let results = catalog.search("meter");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "meter-1");
    }

    #[test]
    fn test_search_empty_returns_all() {
        let catalog = get_test_catalog();
        assert_eq!(catalog.search("").len(), catalog.len());
        assert!(catalog.search("nonexistent-device").is_empty());
    }

    #[test]
    fn test_browse_combines_group_and_query() {
        let catalog = Catalog::load().unwrap();
        let results = catalog.browse(CatalogGroup::Rcbo, "c16");
        let ids: Vec<&str> = results.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["rcbo-c16-10", "rcbo-c16-30"]);
        assert_eq!(catalog.browse(CatalogGroup::Other, "").len(), 3);
    }

    #[test]
    fn test_from_json_rejects_duplicates() {
        let json = r#"{"version":"1.0","devices":[
            {"id":"a","name":"A","slot_width":1,"kind":"relay","rated_voltage":230},
            {"id":"a","name":"A2","slot_width":1,"kind":"relay","rated_voltage":230}
        ]}"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_from_json_rejects_bad_id() {
        let json = r#"{"version":"1.0","devices":[
            {"id":"Bad Id","name":"A","slot_width":1,"kind":"relay","rated_voltage":230}
        ]}"#;
        assert!(Catalog::from_json(json).is_err());
    }

    #[test]
    fn test_from_json_rejects_zero_slot_width() {
        let json = r#"{"version":"1.0","devices":[
            {"id":"a","name":"A","slot_width":0,"kind":"relay","rated_voltage":230}
        ]}"#;
        assert!(Catalog::from_json(json).is_err());
    }
}
