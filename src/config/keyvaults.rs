// ABOUTME: Zone to keyvault endpoint index for production deployments.
// ABOUTME: Parsed once at startup from the KEYVAULTS JSON object.

use std::collections::BTreeMap;

use crate::types::Zone;

use super::ConfigError;

/// Read-only mapping from zone to keyvault URI.
///
/// Zones are kept sorted so production fan-out and reports are stable
/// between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyvaultIndex {
    entries: BTreeMap<Zone, String>,
}

impl KeyvaultIndex {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let entries: BTreeMap<String, String> =
            serde_json::from_str(json).map_err(ConfigError::InvalidKeyvaults)?;
        Ok(entries.into_iter().collect())
    }

    /// The keyvault URI for `zone`. An empty URI counts as absent.
    pub fn get(&self, zone: &Zone) -> Option<&str> {
        self.entries
            .get(zone)
            .map(String::as_str)
            .filter(|uri| !uri.is_empty())
    }

    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.entries.keys()
    }

    /// Zones a production release deploys to: every indexed zone except the
    /// reserved `edge` and `acceptance` entries.
    pub fn production_zones(&self) -> Vec<Zone> {
        self.zones()
            .filter(|zone| !zone.is_reserved())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<Z: Into<Zone>, U: Into<String>> FromIterator<(Z, U)> for KeyvaultIndex {
    fn from_iter<I: IntoIterator<Item = (Z, U)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(zone, uri)| (zone.into(), uri.into()))
                .collect(),
        }
    }
}
