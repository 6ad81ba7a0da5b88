//! Managed-namespace models. Namespaces are scoped under a workload
//! cluster and optionally attached to a workspace.

use serde::{Deserialize, Serialize};

use super::common::Meta;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamespaceFullName {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub management_cluster_name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub provisioner_name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub cluster_name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamespaceSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub workspace_name: String,

    pub attach: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Namespace {
    pub full_name: NamespaceFullName,
    pub meta: Meta,
    pub spec: NamespaceSpec,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamespaceRequest {
    pub namespace: Namespace,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamespaceResponse {
    pub namespace: Namespace,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamespaceListResponse {
    pub namespaces: Vec<Namespace>,
}
