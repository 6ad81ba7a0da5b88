//! Workload-cluster resource service.

use crate::model::cluster::{
    ClusterFullName, ClusterListResponse, ClusterRequest, ClusterResponse,
};

use super::client::TmcClient;
use super::http::ClientError;

// URL Paths.
const CLUSTERS_PATH: &str = "v1alpha1/clusters";

// Query Params. Get/delete address a single cluster through its full name;
// list narrows through a search scope.
const FULL_NAME_MANAGEMENT_CLUSTER_PARAM: &str = "fullName.managementClusterName";
const FULL_NAME_PROVISIONER_PARAM: &str = "fullName.provisionerName";
const SEARCH_MANAGEMENT_CLUSTER_PARAM: &str = "searchScope.managementClusterName";
const SEARCH_PROVISIONER_PARAM: &str = "searchScope.provisionerName";
const SEARCH_NAME_PARAM: &str = "searchScope.name";

pub struct ClusterService<'a> {
    client: &'a TmcClient,
}

impl<'a> ClusterService<'a> {
    pub(crate) fn new(client: &'a TmcClient) -> Self {
        Self { client }
    }

    fn require_identity(full_name: &ClusterFullName) -> Result<(), ClientError> {
        if full_name.management_cluster_name.is_empty()
            || full_name.provisioner_name.is_empty()
            || full_name.name.is_empty()
        {
            return Err(ClientError::InvalidRequest(
                "management cluster name, provisioner name and cluster name must be provided"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// List clusters. Every search-scope field is optional; empty fields are
    /// omitted from the query string.
    pub async fn list(
        &self,
        full_name: &ClusterFullName,
    ) -> Result<ClusterListResponse, ClientError> {
        let mut url = self.client.url().path(CLUSTERS_PATH);

        if !full_name.management_cluster_name.is_empty() {
            url = url.query(
                SEARCH_MANAGEMENT_CLUSTER_PARAM,
                &full_name.management_cluster_name,
            );
        }
        if !full_name.provisioner_name.is_empty() {
            url = url.query(SEARCH_PROVISIONER_PARAM, &full_name.provisioner_name);
        }
        if !full_name.name.is_empty() {
            url = url.query(SEARCH_NAME_PARAM, &full_name.name);
        }

        self.client.get(url.build()?).await
    }

    pub async fn get(&self, full_name: &ClusterFullName) -> Result<ClusterResponse, ClientError> {
        Self::require_identity(full_name)?;

        let url = self
            .client
            .url()
            .path(CLUSTERS_PATH)
            .segment(&full_name.name)
            .query(
                FULL_NAME_MANAGEMENT_CLUSTER_PARAM,
                &full_name.management_cluster_name,
            )
            .query(FULL_NAME_PROVISIONER_PARAM, &full_name.provisioner_name)
            .build()?;

        self.client.get(url).await
    }

    pub async fn create(&self, request: &ClusterRequest) -> Result<ClusterResponse, ClientError> {
        Self::require_identity(&request.cluster.full_name)?;

        let url = self.client.url().path(CLUSTERS_PATH).build()?;

        self.client.post(url, request).await
    }

    pub async fn update(&self, request: &ClusterRequest) -> Result<ClusterResponse, ClientError> {
        Self::require_identity(&request.cluster.full_name)?;

        let url = self
            .client
            .url()
            .path(CLUSTERS_PATH)
            .segment(&request.cluster.full_name.name)
            .query(
                FULL_NAME_MANAGEMENT_CLUSTER_PARAM,
                &request.cluster.full_name.management_cluster_name,
            )
            .query(
                FULL_NAME_PROVISIONER_PARAM,
                &request.cluster.full_name.provisioner_name,
            )
            .build()?;

        self.client.put(url, request).await
    }

    pub async fn delete(&self, full_name: &ClusterFullName) -> Result<(), ClientError> {
        Self::require_identity(full_name)?;

        let url = self
            .client
            .url()
            .path(CLUSTERS_PATH)
            .segment(&full_name.name)
            .query(
                FULL_NAME_MANAGEMENT_CLUSTER_PARAM,
                &full_name.management_cluster_name,
            )
            .query(FULL_NAME_PROVISIONER_PARAM, &full_name.provisioner_name)
            .build()?;

        self.client.delete(url).await
    }
}
