//! Managed-namespace resource service. Namespaces are addressed beneath
//! their parent cluster.

use crate::model::namespace::{
    NamespaceFullName, NamespaceListResponse, NamespaceRequest, NamespaceResponse,
};

use super::client::TmcClient;
use super::http::ClientError;

const CLUSTERS_PATH: &str = "v1alpha1/clusters";
const NAMESPACES_PATH: &str = "namespaces";

const FULL_NAME_MANAGEMENT_CLUSTER_PARAM: &str = "fullName.managementClusterName";
const FULL_NAME_PROVISIONER_PARAM: &str = "fullName.provisionerName";
const SEARCH_MANAGEMENT_CLUSTER_PARAM: &str = "searchScope.managementClusterName";
const SEARCH_PROVISIONER_PARAM: &str = "searchScope.provisionerName";
const SEARCH_NAME_PARAM: &str = "searchScope.name";

pub struct NamespaceService<'a> {
    client: &'a TmcClient,
}

impl<'a> NamespaceService<'a> {
    pub(crate) fn new(client: &'a TmcClient) -> Self {
        Self { client }
    }

    fn require_cluster(full_name: &NamespaceFullName) -> Result<(), ClientError> {
        if full_name.management_cluster_name.is_empty()
            || full_name.provisioner_name.is_empty()
            || full_name.cluster_name.is_empty()
        {
            return Err(ClientError::InvalidRequest(
                "management cluster name, provisioner name and cluster name must be provided"
                    .to_string(),
            ));
        }
        Ok(())
    }

    fn require_identity(full_name: &NamespaceFullName) -> Result<(), ClientError> {
        Self::require_cluster(full_name)?;
        if full_name.name.is_empty() {
            return Err(ClientError::InvalidRequest(
                "namespace name must be provided".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn list(
        &self,
        full_name: &NamespaceFullName,
    ) -> Result<NamespaceListResponse, ClientError> {
        if full_name.cluster_name.is_empty() {
            return Err(ClientError::InvalidRequest(
                "cluster name must be provided".to_string(),
            ));
        }

        let mut url = self
            .client
            .url()
            .path(CLUSTERS_PATH)
            .segment(&full_name.cluster_name)
            .path(NAMESPACES_PATH);

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

    pub async fn get(
        &self,
        full_name: &NamespaceFullName,
    ) -> Result<NamespaceResponse, ClientError> {
        Self::require_identity(full_name)?;

        let url = self
            .client
            .url()
            .path(CLUSTERS_PATH)
            .segment(&full_name.cluster_name)
            .path(NAMESPACES_PATH)
            .segment(&full_name.name)
            .query(
                FULL_NAME_MANAGEMENT_CLUSTER_PARAM,
                &full_name.management_cluster_name,
            )
            .query(FULL_NAME_PROVISIONER_PARAM, &full_name.provisioner_name)
            .build()?;

        self.client.get(url).await
    }

    pub async fn create(&self, request: &NamespaceRequest) -> Result<NamespaceResponse, ClientError> {
        Self::require_identity(&request.namespace.full_name)?;

        let url = self
            .client
            .url()
            .path(CLUSTERS_PATH)
            .segment(&request.namespace.full_name.cluster_name)
            .path(NAMESPACES_PATH)
            .build()?;

        self.client.post(url, request).await
    }

    pub async fn update(&self, request: &NamespaceRequest) -> Result<NamespaceResponse, ClientError> {
        Self::require_identity(&request.namespace.full_name)?;

        let url = self
            .client
            .url()
            .path(CLUSTERS_PATH)
            .segment(&request.namespace.full_name.cluster_name)
            .path(NAMESPACES_PATH)
            .segment(&request.namespace.full_name.name)
            .query(
                FULL_NAME_MANAGEMENT_CLUSTER_PARAM,
                &request.namespace.full_name.management_cluster_name,
            )
            .query(
                FULL_NAME_PROVISIONER_PARAM,
                &request.namespace.full_name.provisioner_name,
            )
            .build()?;

        self.client.put(url, request).await
    }

    pub async fn delete(&self, full_name: &NamespaceFullName) -> Result<(), ClientError> {
        Self::require_identity(full_name)?;

        let url = self
            .client
            .url()
            .path(CLUSTERS_PATH)
            .segment(&full_name.cluster_name)
            .path(NAMESPACES_PATH)
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
