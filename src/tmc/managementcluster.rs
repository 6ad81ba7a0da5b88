//! Management-cluster registration service.

use crate::model::managementcluster::{
    ManagementClusterFullName, ManagementClusterListResponse, ManagementClusterRequest,
    ManagementClusterResponse,
};

use super::client::TmcClient;
use super::http::ClientError;

const MANAGEMENT_CLUSTERS_PATH: &str = "v1alpha1/managementclusters";

const NAME_PARAM: &str = "searchScope.name";

pub struct ManagementClusterService<'a> {
    client: &'a TmcClient,
}

impl<'a> ManagementClusterService<'a> {
    pub(crate) fn new(client: &'a TmcClient) -> Self {
        Self { client }
    }

    fn require_identity(full_name: &ManagementClusterFullName) -> Result<(), ClientError> {
        if full_name.name.is_empty() {
            return Err(ClientError::InvalidRequest(
                "management cluster name must be provided".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn list(
        &self,
        full_name: &ManagementClusterFullName,
    ) -> Result<ManagementClusterListResponse, ClientError> {
        let mut url = self.client.url().path(MANAGEMENT_CLUSTERS_PATH);

        if !full_name.name.is_empty() {
            url = url.query(NAME_PARAM, &full_name.name);
        }

        self.client.get(url.build()?).await
    }

    pub async fn get(
        &self,
        full_name: &ManagementClusterFullName,
    ) -> Result<ManagementClusterResponse, ClientError> {
        Self::require_identity(full_name)?;

        let url = self
            .client
            .url()
            .path(MANAGEMENT_CLUSTERS_PATH)
            .segment(&full_name.name)
            .build()?;

        self.client.get(url).await
    }

    pub async fn create(
        &self,
        request: &ManagementClusterRequest,
    ) -> Result<ManagementClusterResponse, ClientError> {
        Self::require_identity(&request.management_cluster.full_name)?;

        let url = self.client.url().path(MANAGEMENT_CLUSTERS_PATH).build()?;
        self.client.post(url, request).await
    }

    pub async fn update(
        &self,
        request: &ManagementClusterRequest,
    ) -> Result<ManagementClusterResponse, ClientError> {
        Self::require_identity(&request.management_cluster.full_name)?;

        let url = self
            .client
            .url()
            .path(MANAGEMENT_CLUSTERS_PATH)
            .segment(&request.management_cluster.full_name.name)
            .build()?;

        self.client.put(url, request).await
    }

    pub async fn delete(&self, full_name: &ManagementClusterFullName) -> Result<(), ClientError> {
        Self::require_identity(full_name)?;

        let url = self
            .client
            .url()
            .path(MANAGEMENT_CLUSTERS_PATH)
            .segment(&full_name.name)
            .build()?;

        self.client.delete(url).await
    }
}
