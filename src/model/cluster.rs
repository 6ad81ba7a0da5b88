//! Attached-cluster models.

use serde::{Deserialize, Serialize};

use super::common::Meta;

/// Composite identifier of a workload cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterFullName {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub management_cluster_name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub provisioner_name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cluster_group: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub proxy_name: String,
}

/// Server-reported lifecycle status. Read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterStatus {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phase: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub health: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cluster {
    pub full_name: ClusterFullName,
    pub meta: Meta,
    pub spec: ClusterSpec,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ClusterStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterRequest {
    pub cluster: Cluster,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterResponse {
    pub cluster: Cluster,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterListResponse {
    pub clusters: Vec<Cluster>,
}
