//! Management-cluster registration models.

use serde::{Deserialize, Serialize};

use super::common::Meta;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManagementClusterFullName {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManagementClusterSpec {
    /// Cluster group that workload clusters default into.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default_cluster_group: String,

    /// Kubernetes distribution backing this management cluster, e.g.
    /// `VMWARE_TANZU_KUBERNETES_GRID` or `VMWARE_TANZU_KUBERNETES_GRID_SERVICE`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kubernetes_provider_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManagementClusterStatus {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phase: String,

    /// One-time URL the cluster-side agent installer is fetched from.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub registration_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManagementCluster {
    pub full_name: ManagementClusterFullName,
    pub meta: Meta,
    pub spec: ManagementClusterSpec,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ManagementClusterStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManagementClusterRequest {
    pub management_cluster: ManagementCluster,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManagementClusterResponse {
    pub management_cluster: ManagementCluster,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManagementClusterListResponse {
    pub management_clusters: Vec<ManagementCluster>,
}
