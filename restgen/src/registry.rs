//! Aggregate API registry
//!
//! One [`Registry`] value holds everything a project declares about its API:
//! service info, groups, value types, named schemas, the error catalog and
//! the endpoints. Generators take `&Registry` and never consult process
//! globals, so two registries can coexist in one process.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::error::{RegistryError, Result};
use crate::errors::{ErrorCatalog, ErrorDescriptor};
use crate::schema::{Schema, SchemaRegistry};
use crate::types::TypeRegistry;

/// Top-level service metadata carried into generated harnesses and exports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiInfo {
    /// Service title
    pub title: String,
    /// Short description
    pub description: String,
    /// Base URL of a running instance, e.g. `"http://127.0.0.1:3001"`
    pub host: String,
    /// Path prefix every route is mounted under, e.g. `"/api"`
    pub base_path: String,
}

impl Default for ApiInfo {
    fn default() -> Self {
        Self {
            title: "API".to_string(),
            description: String::new(),
            host: "http://127.0.0.1:3001".to_string(),
            base_path: "/api".to_string(),
        }
    }
}

/// The registry every generator reads from
#[derive(Debug, Clone)]
pub struct Registry {
    /// Service metadata
    pub info: ApiInfo,
    types: TypeRegistry,
    schemas: SchemaRegistry,
    errors: ErrorCatalog,
    groups: BTreeMap<String, String>,
    endpoints: BTreeMap<String, Endpoint>,
}

impl Registry {
    /// Create a registry with the built-in value types installed.
    pub fn new() -> Self {
        Self {
            info: ApiInfo::default(),
            types: TypeRegistry::with_defaults(),
            schemas: SchemaRegistry::new(),
            errors: ErrorCatalog::new(),
            groups: BTreeMap::new(),
            endpoints: BTreeMap::new(),
        }
    }

    /// Create a registry with the given service metadata.
    pub fn with_info(info: ApiInfo) -> Self {
        let mut registry = Self::new();
        registry.info = info;
        registry
    }

    /// Registered value types.
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Register a value type. Re-registering a key replaces it.
    pub fn register_type(
        &mut self,
        key: impl Into<String>,
        ts_type: impl Into<String>,
        description: impl Into<String>,
    ) {
        self.types.register(key, ts_type, description);
    }

    /// Registered schemas.
    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    /// Register a named schema. Re-registering a name replaces it.
    pub fn register_schema(&mut self, name: impl Into<String>, schema: Schema) {
        self.schemas.register(name, schema);
    }

    /// Declared errors.
    pub fn errors(&self) -> &ErrorCatalog {
        &self.errors
    }

    /// Register an error. Duplicate names and duplicate codes are rejected.
    pub fn register_error(&mut self, descriptor: ErrorDescriptor) -> Result<()> {
        self.errors.register(descriptor)
    }

    /// Declare a group: a key used by endpoints plus a display name.
    pub fn group(&mut self, key: impl Into<String>, name: impl Into<String>) {
        self.groups.insert(key.into(), name.into());
    }

    /// Declared groups, key-sorted.
    pub fn groups(&self) -> &BTreeMap<String, String> {
        &self.groups
    }

    /// Register an endpoint.
    ///
    /// Fails when another endpoint already claimed the same key, or when the
    /// endpoint names a group that was never declared. An empty group means
    /// ungrouped and is always accepted.
    pub fn register(&mut self, endpoint: Endpoint) -> Result<()> {
        if self.endpoints.contains_key(&endpoint.key) {
            return Err(RegistryError::DuplicateEndpoint(endpoint.key));
        }
        if !endpoint.group.is_empty() && !self.groups.contains_key(&endpoint.group) {
            return Err(RegistryError::UnknownGroup {
                group: endpoint.group.clone(),
                endpoint: endpoint.key,
            });
        }
        self.endpoints.insert(endpoint.key.clone(), endpoint);
        Ok(())
    }

    /// Iterate endpoints in key order. The order is stable across runs, so
    /// generated files do not churn when registration order changes.
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.values()
    }

    /// Endpoints belonging to a group, in key order.
    pub fn endpoints_in_group<'a>(&'a self, group: &str) -> Vec<&'a Endpoint> {
        self.endpoints
            .values()
            .filter(|e| e.group == group)
            .collect()
    }

    /// Number of registered endpoints.
    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
