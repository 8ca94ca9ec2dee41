// ABOUTME: Per-zone substitution variables and the resolver that computes them.
// ABOUTME: Pure lookup: fixed endpoints for edge/acceptance, keyvault index for production.

use thiserror::Error;

use crate::config::{KeyvaultEndpoints, KeyvaultIndex};
use crate::types::{Environment, Version, Zone};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("zone not found, for zone: {0}")]
    ZoneNotFound(Zone),
}

/// The fixed variable set substituted into a template for one zone.
///
/// Built fresh per (environment, zone) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSet {
    environment: String,
    registry: String,
    version: String,
    keyvault_endpoint: String,
}

impl VariableSet {
    pub const ENVIRONMENT: &'static str = "ENVIRONMENT";
    pub const REGISTRY: &'static str = "REGISTRY";
    pub const VERSION: &'static str = "VERSION";
    pub const KEYVAULT_ENDPOINT: &'static str = "KEYVAULT_ENDPOINT";

    pub fn new(
        environment: Environment,
        registry: impl Into<String>,
        version: &Version,
        keyvault_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            environment: environment.to_string(),
            registry: registry.into(),
            version: version.to_string(),
            keyvault_endpoint: keyvault_endpoint.into(),
        }
    }

    /// Key/value pairs in substitution order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (Self::ENVIRONMENT, self.environment.as_str()),
            (Self::REGISTRY, self.registry.as_str()),
            (Self::VERSION, self.version.as_str()),
            (Self::KEYVAULT_ENDPOINT, self.keyvault_endpoint.as_str()),
        ]
        .into_iter()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn keyvault_endpoint(&self) -> &str {
        &self.keyvault_endpoint
    }
}

/// Computes the variable set for an (environment, zone) pair.
#[derive(Debug, Clone, Copy)]
pub struct VariableResolver<'a> {
    registry: &'a str,
    endpoints: &'a KeyvaultEndpoints,
    keyvaults: &'a KeyvaultIndex,
}

impl<'a> VariableResolver<'a> {
    pub fn new(
        registry: &'a str,
        endpoints: &'a KeyvaultEndpoints,
        keyvaults: &'a KeyvaultIndex,
    ) -> Self {
        Self {
            registry,
            endpoints,
            keyvaults,
        }
    }

    pub fn resolve(
        &self,
        environment: Environment,
        version: &Version,
        zone: &Zone,
    ) -> Result<VariableSet, ResolveError> {
        let endpoint = self.keyvault_endpoint(environment, zone)?;
        Ok(VariableSet::new(environment, self.registry, version, endpoint))
    }

    /// Edge and acceptance ignore `zone`; production must find it in the index.
    pub fn keyvault_endpoint(
        &self,
        environment: Environment,
        zone: &Zone,
    ) -> Result<&'a str, ResolveError> {
        match self.endpoints.fixed_for(environment) {
            Some(endpoint) => Ok(endpoint),
            None => self
                .keyvaults
                .get(zone)
                .ok_or_else(|| ResolveError::ZoneNotFound(zone.clone())),
        }
    }
}
