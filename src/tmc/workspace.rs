//! Workspace resource service.

use crate::model::workspace::{
    WorkspaceFullName, WorkspaceListResponse, WorkspaceRequest, WorkspaceResponse,
};

use super::client::TmcClient;
use super::http::ClientError;

const WORKSPACES_PATH: &str = "v1alpha1/workspaces";

pub struct WorkspaceService<'a> {
    client: &'a TmcClient,
}

impl<'a> WorkspaceService<'a> {
    pub(crate) fn new(client: &'a TmcClient) -> Self {
        Self { client }
    }

    fn require_identity(full_name: &WorkspaceFullName) -> Result<(), ClientError> {
        if full_name.name.is_empty() {
            return Err(ClientError::InvalidRequest(
                "workspace name must be provided".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn list(&self) -> Result<WorkspaceListResponse, ClientError> {
        let url = self.client.url().path(WORKSPACES_PATH).build()?;
        self.client.get(url).await
    }

    pub async fn get(
        &self,
        full_name: &WorkspaceFullName,
    ) -> Result<WorkspaceResponse, ClientError> {
        Self::require_identity(full_name)?;

        let url = self
            .client
            .url()
            .path(WORKSPACES_PATH)
            .segment(&full_name.name)
            .build()?;

        self.client.get(url).await
    }

    pub async fn create(&self, request: &WorkspaceRequest) -> Result<WorkspaceResponse, ClientError> {
        Self::require_identity(&request.workspace.full_name)?;

        let url = self.client.url().path(WORKSPACES_PATH).build()?;
        self.client.post(url, request).await
    }

    pub async fn update(&self, request: &WorkspaceRequest) -> Result<WorkspaceResponse, ClientError> {
        Self::require_identity(&request.workspace.full_name)?;

        let url = self
            .client
            .url()
            .path(WORKSPACES_PATH)
            .segment(&request.workspace.full_name.name)
            .build()?;

        self.client.put(url, request).await
    }

    pub async fn delete(&self, full_name: &WorkspaceFullName) -> Result<(), ClientError> {
        Self::require_identity(full_name)?;

        let url = self
            .client
            .url()
            .path(WORKSPACES_PATH)
            .segment(&full_name.name)
            .build()?;

        self.client.delete(url).await
    }
}
