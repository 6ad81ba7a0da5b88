//! Azure AKS cluster and nodepool models.
//!
//! AKS clusters are identified by Azure coordinates (credential,
//! subscription, resource group) rather than a management-cluster scope, and
//! their nodepools are a separate collection fetched alongside the cluster.

use serde::{Deserialize, Serialize};

use super::common::Meta;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AksClusterFullName {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub credential_name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub subscription_id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub resource_group_name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// Pod/service networking for the managed cluster. All fields optional; the
/// server applies defaults for absent ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AksNetworkConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub network_plugin: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub dns_service_ip: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub service_cidr: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AksConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub location: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub kubernetes_version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_config: Option<AksNetworkConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AksClusterSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cluster_group_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<AksConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AksCluster {
    pub full_name: AksClusterFullName,
    pub meta: Meta,
    pub spec: AksClusterSpec,
}

/// Identity of a nodepool within its parent cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodepoolInfo {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodepoolSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mode: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub vm_size: String,

    #[serde(skip_serializing_if = "is_zero")]
    pub count: i64,
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Nodepool {
    pub info: NodepoolInfo,
    pub spec: NodepoolSpec,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AksClusterResponse {
    pub aks_cluster: AksCluster,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodepoolListResponse {
    pub nodepools: Vec<Nodepool>,
}
