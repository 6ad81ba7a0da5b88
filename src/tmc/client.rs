//! TMC Client
//!
//! Aggregate connection object: one transport plus credentials, shared by
//! every per-resource service. Services borrow the client, so a single
//! long-lived `TmcClient` serves many independent operations.

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::auth::CspCredentials;
use super::cluster::ClusterService;
use super::clustergroup::ClusterGroupService;
use super::http::{ClientError, HttpClient, UrlBuilder};
use super::inspections::InspectionsService;
use super::managementcluster::ManagementClusterService;
use super::namespace::NamespaceService;
use super::provisioner::ProvisionerService;
use super::workspace::WorkspaceService;
use super::akscluster::AksClusterService;

/// Main TMC client
#[derive(Clone)]
pub struct TmcClient {
    http: HttpClient,
    credentials: CspCredentials,
    endpoint: String,
}

impl TmcClient {
    /// Create a new client against an org endpoint such as
    /// `myorg.tmc.cloud.vmware.com` (scheme optional).
    pub fn new(endpoint: &str, credentials: CspCredentials) -> Result<Self, ClientError> {
        let endpoint = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", endpoint.trim_end_matches('/'))
        };

        Ok(Self {
            http: HttpClient::new()?,
            credentials,
            endpoint,
        })
    }

    /// Start a request URL at the org endpoint.
    pub(crate) fn url(&self) -> UrlBuilder {
        UrlBuilder::new(&self.endpoint)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let token = self.credentials.get_token().await?;
        self.http.get(&url, &token).await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, ClientError> {
        let token = self.credentials.get_token().await?;
        self.http.post(&url, &token, body).await
    }

    pub(crate) async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, ClientError> {
        let token = self.credentials.get_token().await?;
        self.http.put(&url, &token, body).await
    }

    pub(crate) async fn delete(&self, url: Url) -> Result<(), ClientError> {
        let token = self.credentials.get_token().await?;
        self.http.delete(&url, &token).await
    }

    // =========================================================================
    // Resource services
    // =========================================================================

    pub fn clusters(&self) -> ClusterService<'_> {
        ClusterService::new(self)
    }

    pub fn cluster_groups(&self) -> ClusterGroupService<'_> {
        ClusterGroupService::new(self)
    }

    pub fn namespaces(&self) -> NamespaceService<'_> {
        NamespaceService::new(self)
    }

    pub fn workspaces(&self) -> WorkspaceService<'_> {
        WorkspaceService::new(self)
    }

    pub fn provisioners(&self) -> ProvisionerService<'_> {
        ProvisionerService::new(self)
    }

    pub fn management_clusters(&self) -> ManagementClusterService<'_> {
        ManagementClusterService::new(self)
    }

    pub fn inspections(&self) -> InspectionsService<'_> {
        InspectionsService::new(self)
    }

    pub fn aks_clusters(&self) -> AksClusterService<'_> {
        AksClusterService::new(self)
    }
}
