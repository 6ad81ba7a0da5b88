//! Provisioner models: a provisioner scopes workload clusters under a
//! management cluster.

use serde::{Deserialize, Serialize};

use super::common::Meta;

/// Composite identifier of a provisioner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvisionerFullName {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub management_cluster_name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub org_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Provisioner {
    pub full_name: ProvisionerFullName,
    pub meta: Meta,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvisionerRequest {
    pub provisioner: Provisioner,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvisionerResponse {
    pub provisioner: Provisioner,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvisionerListResponse {
    pub provisioners: Vec<Provisioner>,
}
