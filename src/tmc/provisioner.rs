//! Provisioner resource service.

use crate::model::provisioner::{
    ProvisionerFullName, ProvisionerListResponse, ProvisionerRequest, ProvisionerResponse,
};

use super::client::TmcClient;
use super::http::ClientError;

// URL Paths.
const MANAGEMENT_CLUSTERS_PATH: &str = "v1alpha1/managementclusters";
const PROVISIONERS_PATH: &str = "provisioners";

// Query Params.
const NAME_PARAM: &str = "searchScope.name";

pub struct ProvisionerService<'a> {
    client: &'a TmcClient,
}

impl<'a> ProvisionerService<'a> {
    pub(crate) fn new(client: &'a TmcClient) -> Self {
        Self { client }
    }

    fn require_scope(full_name: &ProvisionerFullName) -> Result<(), ClientError> {
        if full_name.management_cluster_name.is_empty() {
            return Err(ClientError::InvalidRequest(
                "management cluster name must be provided".to_string(),
            ));
        }
        Ok(())
    }

    fn require_identity(full_name: &ProvisionerFullName) -> Result<(), ClientError> {
        Self::require_scope(full_name)?;
        if full_name.name.is_empty() {
            return Err(ClientError::InvalidRequest(
                "provisioner name must be provided".to_string(),
            ));
        }
        Ok(())
    }

    /// List provisioners under a management cluster. A non-empty `name` on
    /// the full name narrows the search scope.
    pub async fn list(
        &self,
        full_name: &ProvisionerFullName,
    ) -> Result<ProvisionerListResponse, ClientError> {
        Self::require_scope(full_name)?;

        let mut url = self
            .client
            .url()
            .path(MANAGEMENT_CLUSTERS_PATH)
            .segment(&full_name.management_cluster_name)
            .path(PROVISIONERS_PATH);

        if !full_name.name.is_empty() {
            url = url.query(NAME_PARAM, &full_name.name);
        }

        self.client.get(url.build()?).await
    }

    pub async fn get(
        &self,
        full_name: &ProvisionerFullName,
    ) -> Result<ProvisionerResponse, ClientError> {
        Self::require_identity(full_name)?;

        let url = self
            .client
            .url()
            .path(MANAGEMENT_CLUSTERS_PATH)
            .segment(&full_name.management_cluster_name)
            .path(PROVISIONERS_PATH)
            .segment(&full_name.name)
            .build()?;

        self.client.get(url).await
    }

    pub async fn create(
        &self,
        request: &ProvisionerRequest,
    ) -> Result<ProvisionerResponse, ClientError> {
        Self::require_identity(&request.provisioner.full_name)?;

        let url = self
            .client
            .url()
            .path(MANAGEMENT_CLUSTERS_PATH)
            .segment(&request.provisioner.full_name.management_cluster_name)
            .path(PROVISIONERS_PATH)
            .build()?;

        self.client.post(url, request).await
    }

    pub async fn update(
        &self,
        request: &ProvisionerRequest,
    ) -> Result<ProvisionerResponse, ClientError> {
        Self::require_identity(&request.provisioner.full_name)?;

        let url = self
            .client
            .url()
            .path(MANAGEMENT_CLUSTERS_PATH)
            .segment(&request.provisioner.full_name.management_cluster_name)
            .path(PROVISIONERS_PATH)
            .segment(&request.provisioner.full_name.name)
            .build()?;

        self.client.put(url, request).await
    }

    pub async fn delete(&self, full_name: &ProvisionerFullName) -> Result<(), ClientError> {
        Self::require_identity(full_name)?;

        let url = self
            .client
            .url()
            .path(MANAGEMENT_CLUSTERS_PATH)
            .segment(&full_name.management_cluster_name)
            .path(PROVISIONERS_PATH)
            .segment(&full_name.name)
            .build()?;

        self.client.delete(url).await
    }
}
