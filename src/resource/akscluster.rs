//! AKS cluster schema mappers.
//!
//! `construct_cluster` / `construct_nodepools` build API models from schema
//! state; `to_cluster_map` is their inverse, flattening a cluster and its
//! nodepool collection back into the schema representation. The flatten side
//! is total: a missing cluster yields an empty collection and a missing
//! nodepool list simply omits the nodepool entries.

use serde_json::{json, Map, Value};

use crate::model::akscluster::{
    AksCluster, AksClusterFullName, AksClusterSpec, AksConfig, AksNetworkConfig, Nodepool,
    NodepoolInfo, NodepoolSpec,
};

use super::common::{meta_schema, META_KEY};
use super::data::ResourceData;
use super::error::{ProviderError, ProviderResult};
use super::schema::{FieldSchema, SchemaMap};

pub const RESOURCE_NAME: &str = "tanzu-mission-control_akscluster";

pub const NAME_KEY: &str = "name";
pub const CREDENTIAL_NAME_KEY: &str = "credential_name";
pub const SUBSCRIPTION_ID_KEY: &str = "subscription_id";
pub const RESOURCE_GROUP_KEY: &str = "resource_group";
pub const CLUSTER_GROUP_KEY: &str = "cluster_group";
pub const LOCATION_KEY: &str = "location";
pub const KUBERNETES_VERSION_KEY: &str = "kubernetes_version";
pub const NETWORK_CONFIG_KEY: &str = "network_config";
pub const NODEPOOL_KEY: &str = "nodepool";

const NETWORK_PLUGIN_KEY: &str = "network_plugin";
const DNS_SERVICE_IP_KEY: &str = "dns_service_ip";
const SERVICE_CIDR_KEY: &str = "service_cidr";

const NODEPOOL_NAME_KEY: &str = "name";
const NODEPOOL_MODE_KEY: &str = "mode";
const NODEPOOL_VM_SIZE_KEY: &str = "vm_size";
const NODEPOOL_COUNT_KEY: &str = "count";

pub fn schema() -> SchemaMap {
    SchemaMap::from([
        (NAME_KEY, FieldSchema::required_string("Name of this cluster").force_new()),
        (
            CREDENTIAL_NAME_KEY,
            FieldSchema::required_string("Name of the Azure credential").force_new(),
        ),
        (
            SUBSCRIPTION_ID_KEY,
            FieldSchema::required_string("Azure subscription for this cluster").force_new(),
        ),
        (
            RESOURCE_GROUP_KEY,
            FieldSchema::required_string("Resource group for this cluster").force_new(),
        ),
        (
            CLUSTER_GROUP_KEY,
            FieldSchema::optional_string("Name of the cluster group this cluster belongs to"),
        ),
        (LOCATION_KEY, FieldSchema::optional_string("Azure region of the cluster")),
        (
            KUBERNETES_VERSION_KEY,
            FieldSchema::optional_string("Kubernetes version of the cluster"),
        ),
        (
            NETWORK_CONFIG_KEY,
            FieldSchema::optional_block("Pod and service networking configuration"),
        ),
        (NODEPOOL_KEY, FieldSchema::optional_block_list("Nodepools of the cluster")),
        (META_KEY, meta_schema()),
    ])
}

fn object_string(block: &Map<String, Value>, field: &str, key: &str) -> ProviderResult<String> {
    match block.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ProviderError::field(format!("{field}.{key}"), "string")),
    }
}

/// Build the AKS cluster model from schema state.
pub fn construct_cluster(data: &ResourceData) -> ProviderResult<AksCluster> {
    let full_name = AksClusterFullName {
        credential_name: data.string(CREDENTIAL_NAME_KEY)?,
        subscription_id: data.string(SUBSCRIPTION_ID_KEY)?,
        resource_group_name: data.string(RESOURCE_GROUP_KEY)?,
        name: data.string(NAME_KEY)?,
    };

    let location = data.opt_string(LOCATION_KEY)?;
    let kubernetes_version = data.opt_string(KUBERNETES_VERSION_KEY)?;

    let network_config = match data.opt_object(NETWORK_CONFIG_KEY)? {
        None => None,
        Some(block) => Some(AksNetworkConfig {
            network_plugin: object_string(block, NETWORK_CONFIG_KEY, NETWORK_PLUGIN_KEY)?,
            dns_service_ip: object_string(block, NETWORK_CONFIG_KEY, DNS_SERVICE_IP_KEY)?,
            service_cidr: object_string(block, NETWORK_CONFIG_KEY, SERVICE_CIDR_KEY)?,
        }),
    };

    let config = if location.is_empty() && kubernetes_version.is_empty() && network_config.is_none()
    {
        None
    } else {
        Some(AksConfig {
            location,
            kubernetes_version,
            network_config,
        })
    };

    Ok(AksCluster {
        full_name,
        meta: Default::default(),
        spec: AksClusterSpec {
            cluster_group_name: data.opt_string(CLUSTER_GROUP_KEY)?,
            config,
        },
    })
}

/// Build the nodepool models declared in schema state.
pub fn construct_nodepools(data: &ResourceData) -> ProviderResult<Vec<Nodepool>> {
    let mut nodepools = Vec::new();

    for (index, entry) in data.opt_array(NODEPOOL_KEY)?.iter().enumerate() {
        let Value::Object(block) = entry else {
            return Err(ProviderError::field(format!("{NODEPOOL_KEY}[{index}]"), "object"));
        };

        let name = object_string(block, NODEPOOL_KEY, NODEPOOL_NAME_KEY)?;
        if name.is_empty() {
            return Err(ProviderError::field(
                format!("{NODEPOOL_KEY}[{index}].{NODEPOOL_NAME_KEY}"),
                "non-empty string",
            ));
        }

        let count = match block.get(NODEPOOL_COUNT_KEY) {
            None | Some(Value::Null) => 0,
            Some(Value::Number(n)) => n.as_i64().ok_or_else(|| {
                ProviderError::field(format!("{NODEPOOL_KEY}[{index}].{NODEPOOL_COUNT_KEY}"), "integer")
            })?,
            Some(_) => {
                return Err(ProviderError::field(
                    format!("{NODEPOOL_KEY}[{index}].{NODEPOOL_COUNT_KEY}"),
                    "integer",
                ))
            }
        };

        nodepools.push(Nodepool {
            info: NodepoolInfo { name },
            spec: NodepoolSpec {
                mode: object_string(block, NODEPOOL_KEY, NODEPOOL_MODE_KEY)?,
                vm_size: object_string(block, NODEPOOL_KEY, NODEPOOL_VM_SIZE_KEY)?,
                count,
            },
        });
    }

    Ok(nodepools)
}

/// Flatten a cluster and its nodepool collection into the schema mapping.
///
/// A missing cluster flattens to an empty collection, never an error. An
/// empty nodepool collection omits the nodepool entries entirely.
pub fn to_cluster_map(cluster: Option<&AksCluster>, nodepools: &[Nodepool]) -> Vec<Value> {
    let Some(cluster) = cluster else {
        return Vec::new();
    };

    let mut map = Map::new();
    map.insert(NAME_KEY.to_string(), json!(cluster.full_name.name));
    map.insert(
        CREDENTIAL_NAME_KEY.to_string(),
        json!(cluster.full_name.credential_name),
    );
    map.insert(
        SUBSCRIPTION_ID_KEY.to_string(),
        json!(cluster.full_name.subscription_id),
    );
    map.insert(
        RESOURCE_GROUP_KEY.to_string(),
        json!(cluster.full_name.resource_group_name),
    );

    if !cluster.spec.cluster_group_name.is_empty() {
        map.insert(
            CLUSTER_GROUP_KEY.to_string(),
            json!(cluster.spec.cluster_group_name),
        );
    }

    if let Some(config) = &cluster.spec.config {
        if !config.location.is_empty() {
            map.insert(LOCATION_KEY.to_string(), json!(config.location));
        }
        if !config.kubernetes_version.is_empty() {
            map.insert(
                KUBERNETES_VERSION_KEY.to_string(),
                json!(config.kubernetes_version),
            );
        }
        if let Some(network) = &config.network_config {
            map.insert(
                NETWORK_CONFIG_KEY.to_string(),
                json!({
                    NETWORK_PLUGIN_KEY: network.network_plugin,
                    DNS_SERVICE_IP_KEY: network.dns_service_ip,
                    SERVICE_CIDR_KEY: network.service_cidr,
                }),
            );
        }
    }

    if !nodepools.is_empty() {
        let flattened: Vec<Value> = nodepools.iter().map(to_nodepool_map).collect();
        map.insert(NODEPOOL_KEY.to_string(), json!(flattened));
    }

    vec![Value::Object(map)]
}

fn to_nodepool_map(nodepool: &Nodepool) -> Value {
    let mut map = Map::new();
    map.insert(NODEPOOL_NAME_KEY.to_string(), json!(nodepool.info.name));
    if !nodepool.spec.mode.is_empty() {
        map.insert(NODEPOOL_MODE_KEY.to_string(), json!(nodepool.spec.mode));
    }
    if !nodepool.spec.vm_size.is_empty() {
        map.insert(NODEPOOL_VM_SIZE_KEY.to_string(), json!(nodepool.spec.vm_size));
    }
    if nodepool.spec.count != 0 {
        map.insert(NODEPOOL_COUNT_KEY.to_string(), json!(nodepool.spec.count));
    }
    Value::Object(map)
}
