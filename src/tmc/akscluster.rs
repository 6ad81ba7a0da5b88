//! AKS cluster service. Clusters and their nodepool collections are fetched
//! separately and joined by the caller.

use crate::model::akscluster::{AksClusterFullName, AksClusterResponse, NodepoolListResponse};

use super::client::TmcClient;
use super::http::ClientError;

const AKS_CLUSTERS_PATH: &str = "v1alpha1/aksclusters";
const NODEPOOLS_PATH: &str = "nodepools";

const CREDENTIAL_NAME_PARAM: &str = "fullName.credentialName";
const SUBSCRIPTION_ID_PARAM: &str = "fullName.subscriptionId";
const RESOURCE_GROUP_PARAM: &str = "fullName.resourceGroupName";

pub struct AksClusterService<'a> {
    client: &'a TmcClient,
}

impl<'a> AksClusterService<'a> {
    pub(crate) fn new(client: &'a TmcClient) -> Self {
        Self { client }
    }

    fn require_identity(full_name: &AksClusterFullName) -> Result<(), ClientError> {
        if full_name.credential_name.is_empty()
            || full_name.subscription_id.is_empty()
            || full_name.resource_group_name.is_empty()
            || full_name.name.is_empty()
        {
            return Err(ClientError::InvalidRequest(
                "credential name, subscription id, resource group name and cluster name must be provided"
                    .to_string(),
            ));
        }
        Ok(())
    }

    pub async fn get(
        &self,
        full_name: &AksClusterFullName,
    ) -> Result<AksClusterResponse, ClientError> {
        Self::require_identity(full_name)?;

        let url = self
            .client
            .url()
            .path(AKS_CLUSTERS_PATH)
            .segment(&full_name.name)
            .query(CREDENTIAL_NAME_PARAM, &full_name.credential_name)
            .query(SUBSCRIPTION_ID_PARAM, &full_name.subscription_id)
            .query(RESOURCE_GROUP_PARAM, &full_name.resource_group_name)
            .build()?;

        self.client.get(url).await
    }

    /// List the nodepools of one cluster.
    pub async fn list_nodepools(
        &self,
        full_name: &AksClusterFullName,
    ) -> Result<NodepoolListResponse, ClientError> {
        Self::require_identity(full_name)?;

        let url = self
            .client
            .url()
            .path(AKS_CLUSTERS_PATH)
            .segment(&full_name.name)
            .path(NODEPOOLS_PATH)
            .query(CREDENTIAL_NAME_PARAM, &full_name.credential_name)
            .query(SUBSCRIPTION_ID_PARAM, &full_name.subscription_id)
            .query(RESOURCE_GROUP_PARAM, &full_name.resource_group_name)
            .build()?;

        self.client.get(url).await
    }
}
