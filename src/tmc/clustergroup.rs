//! Cluster-group resource service.

use crate::model::clustergroup::{
    ClusterGroupFullName, ClusterGroupListResponse, ClusterGroupRequest, ClusterGroupResponse,
};

use super::client::TmcClient;
use super::http::ClientError;

const CLUSTER_GROUPS_PATH: &str = "v1alpha1/clustergroups";

pub struct ClusterGroupService<'a> {
    client: &'a TmcClient,
}

impl<'a> ClusterGroupService<'a> {
    pub(crate) fn new(client: &'a TmcClient) -> Self {
        Self { client }
    }

    fn require_identity(full_name: &ClusterGroupFullName) -> Result<(), ClientError> {
        if full_name.name.is_empty() {
            return Err(ClientError::InvalidRequest(
                "cluster group name must be provided".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn list(&self) -> Result<ClusterGroupListResponse, ClientError> {
        let url = self.client.url().path(CLUSTER_GROUPS_PATH).build()?;
        self.client.get(url).await
    }

    pub async fn get(
        &self,
        full_name: &ClusterGroupFullName,
    ) -> Result<ClusterGroupResponse, ClientError> {
        Self::require_identity(full_name)?;

        let url = self
            .client
            .url()
            .path(CLUSTER_GROUPS_PATH)
            .segment(&full_name.name)
            .build()?;

        self.client.get(url).await
    }

    pub async fn create(
        &self,
        request: &ClusterGroupRequest,
    ) -> Result<ClusterGroupResponse, ClientError> {
        Self::require_identity(&request.cluster_group.full_name)?;

        let url = self.client.url().path(CLUSTER_GROUPS_PATH).build()?;
        self.client.post(url, request).await
    }

    pub async fn update(
        &self,
        request: &ClusterGroupRequest,
    ) -> Result<ClusterGroupResponse, ClientError> {
        Self::require_identity(&request.cluster_group.full_name)?;

        let url = self
            .client
            .url()
            .path(CLUSTER_GROUPS_PATH)
            .segment(&request.cluster_group.full_name.name)
            .build()?;

        self.client.put(url, request).await
    }

    pub async fn delete(&self, full_name: &ClusterGroupFullName) -> Result<(), ClientError> {
        Self::require_identity(full_name)?;

        let url = self
            .client
            .url()
            .path(CLUSTER_GROUPS_PATH)
            .segment(&full_name.name)
            .build()?;

        self.client.delete(url).await
    }
}
