//! Inspection-scan data sources.
//!
//! Both data sources are list-oriented: the composite ID joins the scope
//! fields with `/`, and an empty result sets the `NO_DATA` sentinel instead
//! of failing.

use serde_json::{json, Value};

use crate::model::inspections::{InspectionScan, InspectionScanFullName, InspectionScanListResponse};
use crate::tmc::TmcClient;

use super::data::ResourceData;
use super::error::{ProviderError, ProviderResult};
use super::schema::{FieldSchema, SchemaMap};

pub const SCANS_DATA_SOURCE_NAME: &str = "tanzu-mission-control_inspections";
pub const RESULTS_DATA_SOURCE_NAME: &str = "tanzu-mission-control_inspection_results";

pub const NAME_KEY: &str = "name";
pub const MANAGEMENT_CLUSTER_NAME_KEY: &str = "management_cluster";
pub const PROVISIONER_NAME_KEY: &str = "provisioner_name";
pub const CLUSTER_NAME_KEY: &str = "cluster_name";
pub const SCANS_KEY: &str = "scans";
pub const STATUS_KEY: &str = "status";

/// Sentinel ID set when a list returns no items.
pub const NO_DATA_ID: &str = "NO_DATA";

const ID_SEPARATOR: &str = "/";
const RESOURCE: &str = "inspection";

pub fn schema() -> SchemaMap {
    SchemaMap::from([
        (NAME_KEY, FieldSchema::optional_string("Name of the inspection scan")),
        (
            MANAGEMENT_CLUSTER_NAME_KEY,
            FieldSchema::required_string("Name of the management cluster").force_new(),
        ),
        (
            PROVISIONER_NAME_KEY,
            FieldSchema::required_string("Name of the cluster provisioner").force_new(),
        ),
        (
            CLUSTER_NAME_KEY,
            FieldSchema::required_string("Name of the cluster").force_new(),
        ),
        (SCANS_KEY, FieldSchema::computed_block_list("Scans matching the search scope")),
    ])
}

/// Typed view of the inspection search scope, validated once per request.
struct InspectionScope {
    management_cluster: String,
    provisioner: String,
    cluster: String,
    name: String,
}

impl InspectionScope {
    fn from_data(data: &ResourceData) -> ProviderResult<Self> {
        Ok(Self {
            management_cluster: data.string(MANAGEMENT_CLUSTER_NAME_KEY)?,
            provisioner: data.string(PROVISIONER_NAME_KEY)?,
            cluster: data.string(CLUSTER_NAME_KEY)?,
            name: data.opt_string(NAME_KEY)?,
        })
    }

    fn full_name(&self) -> InspectionScanFullName {
        InspectionScanFullName {
            management_cluster_name: self.management_cluster.clone(),
            provisioner_name: self.provisioner.clone(),
            cluster_name: self.cluster.clone(),
            name: self.name.clone(),
        }
    }
}

async fn list_inspections(
    client: &TmcClient,
    scope: &InspectionScope,
) -> ProviderResult<InspectionScanListResponse> {
    client
        .inspections()
        .list(&scope.full_name())
        .await
        .map_err(ProviderError::api(RESOURCE, "list", &scope.cluster))
}

fn composite_id(full_name: &InspectionScanFullName) -> String {
    [
        full_name.management_cluster_name.as_str(),
        full_name.provisioner_name.as_str(),
        full_name.cluster_name.as_str(),
        full_name.name.as_str(),
    ]
    .join(ID_SEPARATOR)
}

fn flatten_scan(scan: &InspectionScan) -> Value {
    let mut status = json!({ "phase": scan.status.phase });
    if let Some(report) = &scan.status.report {
        status["report"] = report.clone();
    }

    json!({
        NAME_KEY: scan.full_name.name,
        STATUS_KEY: status,
    })
}

/// Read all scans matching the search scope.
pub async fn data_source_scans_read(
    client: &TmcClient,
    data: &mut ResourceData,
) -> ProviderResult<()> {
    let scope = InspectionScope::from_data(data)?;
    let response = list_inspections(client, &scope).await?;

    if response.scans.is_empty() {
        data.set_id(NO_DATA_ID);
        return Ok(());
    }

    let flattened: Vec<Value> = response.scans.iter().map(flatten_scan).collect();
    data.set(SCANS_KEY, json!(flattened));
    data.set_id(composite_id(&response.scans[0].full_name));

    Ok(())
}

/// Read the results of the first scan matching the search scope.
pub async fn data_source_results_read(
    client: &TmcClient,
    data: &mut ResourceData,
) -> ProviderResult<()> {
    let scope = InspectionScope::from_data(data)?;
    let response = list_inspections(client, &scope).await?;

    let Some(scan) = response.scans.first() else {
        data.set_id(NO_DATA_ID);
        return Ok(());
    };

    data.set(NAME_KEY, json!(scan.full_name.name));
    data.set(STATUS_KEY, flatten_scan(scan)[STATUS_KEY].clone());
    data.set_id(composite_id(&scan.full_name));

    Ok(())
}
