//! Resource lifecycle layer
//!
//! Each resource module wires the schema surface to the API client layer:
//! extract typed fields from schema state, build the full name, call the
//! resource service, and flatten the response back into state.
//!
//! # Architecture
//!
//! - [`schema`] - field schemas describing each resource's declarative surface
//! - [`data`] - per-instance schema state and the refresh/data-read context
//! - [`error`] - client failures wrapped with resource-identifying context
//! - [`common`] - the meta block mapping shared by every resource
//! - one module per resource with its CRUD and data-source handlers

pub mod akscluster;
pub mod cluster;
pub mod common;
pub mod data;
pub mod error;
pub mod inspections;
pub mod managementcluster;
pub mod provisioner;
pub mod schema;

pub use data::{OperationContext, ResourceData};
pub use error::{ProviderError, ProviderResult};

use schema::SchemaMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Resource,
    DataSource,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Resource => "resource",
            ResourceKind::DataSource => "data source",
        }
    }
}

/// One entry of the provider surface: a named resource or data source and
/// its field schema.
pub struct ResourceDescriptor {
    pub name: &'static str,
    pub kind: ResourceKind,
    pub schema: fn() -> SchemaMap,
}

/// Everything this provider exposes. Resources and data sources are
/// separate namespaces, so a name may appear once per kind.
pub fn registry() -> Vec<ResourceDescriptor> {
    vec![
        ResourceDescriptor {
            name: provisioner::RESOURCE_NAME,
            kind: ResourceKind::Resource,
            schema: provisioner::schema,
        },
        ResourceDescriptor {
            name: provisioner::RESOURCE_NAME,
            kind: ResourceKind::DataSource,
            schema: provisioner::list_schema,
        },
        ResourceDescriptor {
            name: cluster::RESOURCE_NAME,
            kind: ResourceKind::Resource,
            schema: cluster::schema,
        },
        ResourceDescriptor {
            name: cluster::RESOURCE_NAME,
            kind: ResourceKind::DataSource,
            schema: cluster::schema,
        },
        ResourceDescriptor {
            name: akscluster::RESOURCE_NAME,
            kind: ResourceKind::Resource,
            schema: akscluster::schema,
        },
        ResourceDescriptor {
            name: managementcluster::RESOURCE_NAME,
            kind: ResourceKind::Resource,
            schema: managementcluster::schema,
        },
        ResourceDescriptor {
            name: managementcluster::RESOURCE_NAME,
            kind: ResourceKind::DataSource,
            schema: managementcluster::schema,
        },
        ResourceDescriptor {
            name: inspections::SCANS_DATA_SOURCE_NAME,
            kind: ResourceKind::DataSource,
            schema: inspections::schema,
        },
        ResourceDescriptor {
            name: inspections::RESULTS_DATA_SOURCE_NAME,
            kind: ResourceKind::DataSource,
            schema: inspections::schema,
        },
    ]
}

/// Every registry entry carrying the given name.
pub fn lookup(name: &str) -> Vec<ResourceDescriptor> {
    registry()
        .into_iter()
        .filter(|entry| entry.name == name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_entries_are_unique_per_kind() {
        let keys: Vec<_> = registry().iter().map(|r| (r.name, r.kind)).collect();
        let mut deduped = keys.clone();
        deduped.sort_by_key(|(name, kind)| (*name, kind.as_str()));
        deduped.dedup();
        assert_eq!(keys.len(), deduped.len());
    }

    #[test]
    fn lookup_resolves_known_resources() {
        let entries = lookup(provisioner::RESOURCE_NAME);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, ResourceKind::Resource);
        assert!((entries[0].schema)().contains_key(provisioner::NAME_KEY));

        assert!(lookup("tanzu-mission-control_unknown").is_empty());
    }
}
