//! Inspection scan models. Scans live under a cluster and are read-only
//! from this side of the API.

use serde::{Deserialize, Serialize};

use super::common::Meta;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectionScanFullName {
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
pub struct InspectionScanStatus {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phase: String,

    /// Opaque report payload; shape varies by scan type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectionScan {
    pub full_name: InspectionScanFullName,
    pub meta: Meta,
    pub status: InspectionScanStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectionScanListResponse {
    pub scans: Vec<InspectionScan>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub total_count: String,
}
