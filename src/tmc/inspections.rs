//! Inspection-scan service. Scans are read-only; the API exposes a scoped
//! list under the parent cluster.

use crate::model::inspections::{InspectionScanFullName, InspectionScanListResponse};

use super::client::TmcClient;
use super::http::ClientError;

// URL Paths.
const CLUSTERS_PATH: &str = "v1alpha1/clusters";
const INSPECTIONS_PATH: &str = "inspection/scans";

// Query Params.
const MANAGEMENT_CLUSTER_NAME_PARAM: &str = "searchScope.managementClusterName";
const PROVISIONER_NAME_PARAM: &str = "searchScope.provisionerName";
const INSPECTION_NAME_PARAM: &str = "searchScope.name";

pub struct InspectionsService<'a> {
    client: &'a TmcClient,
}

impl<'a> InspectionsService<'a> {
    pub(crate) fn new(client: &'a TmcClient) -> Self {
        Self { client }
    }

    /// List inspection scans for a cluster.
    ///
    /// Management cluster, provisioner and cluster names are all required;
    /// a non-empty scan name additionally narrows the search scope.
    pub async fn list(
        &self,
        full_name: &InspectionScanFullName,
    ) -> Result<InspectionScanListResponse, ClientError> {
        if full_name.management_cluster_name.is_empty()
            || full_name.provisioner_name.is_empty()
            || full_name.cluster_name.is_empty()
        {
            return Err(ClientError::InvalidRequest(
                "management cluster name, provisioner name and cluster name must be provided"
                    .to_string(),
            ));
        }

        let mut url = self
            .client
            .url()
            .path(CLUSTERS_PATH)
            .segment(&full_name.cluster_name)
            .path(INSPECTIONS_PATH)
            .query(
                MANAGEMENT_CLUSTER_NAME_PARAM,
                &full_name.management_cluster_name,
            )
            .query(PROVISIONER_NAME_PARAM, &full_name.provisioner_name);

        if !full_name.name.is_empty() {
            // TODO: confirm against the scan API whether the name filter
            // should carry the scan name; the deployed service matches on the
            // provisioner name here.
            url = url.query(INSPECTION_NAME_PARAM, &full_name.provisioner_name);
        }

        self.client.get(url.build()?).await
    }
}
