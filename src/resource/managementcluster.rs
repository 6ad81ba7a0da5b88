//! Management-cluster registration resource and data source.

use serde_json::json;
use std::path::Path;

use crate::model::managementcluster::{
    ManagementCluster, ManagementClusterFullName, ManagementClusterRequest, ManagementClusterSpec,
};
use crate::tmc::TmcClient;

use super::common::{construct_meta, flatten_meta, meta_schema, META_KEY};
use super::data::{OperationContext, ResourceData};
use super::error::{ProviderError, ProviderResult};
use super::schema::{FieldSchema, SchemaMap};

pub const RESOURCE_NAME: &str = "tanzu-mission-control_management_cluster";

pub const NAME_KEY: &str = "name";
pub const CLUSTER_GROUP_KEY: &str = "cluster_group";
pub const KUBERNETES_PROVIDER_TYPE_KEY: &str = "kubernetes_provider_type";
pub const KUBECONFIG_FILE_KEY: &str = "tkgm_kubeconfig_file";
pub const REGISTRATION_URL_KEY: &str = "registration_url";

const RESOURCE: &str = "management cluster";

pub fn schema() -> SchemaMap {
    SchemaMap::from([
        (
            NAME_KEY,
            FieldSchema::required_string("Name of the management cluster registration").force_new(),
        ),
        (
            CLUSTER_GROUP_KEY,
            FieldSchema::required_string("Cluster group that workload clusters default into"),
        ),
        (
            KUBERNETES_PROVIDER_TYPE_KEY,
            FieldSchema::required_string("Kubernetes distribution backing the management cluster")
                .force_new(),
        ),
        (
            KUBECONFIG_FILE_KEY,
            FieldSchema::optional_string(
                "Path of a kubeconfig used to finalize registration of a TKGm cluster",
            ),
        ),
        (
            REGISTRATION_URL_KEY,
            FieldSchema::computed_string("One-time URL the cluster-side agent installer is fetched from"),
        ),
        (META_KEY, meta_schema()),
    ])
}

struct ManagementClusterFields {
    name: String,
    cluster_group: String,
    kubernetes_provider_type: String,
    kubeconfig_file: String,
}

impl ManagementClusterFields {
    fn from_data(data: &ResourceData) -> ProviderResult<Self> {
        Ok(Self {
            name: data.string(NAME_KEY)?,
            cluster_group: data.string(CLUSTER_GROUP_KEY)?,
            kubernetes_provider_type: data.string(KUBERNETES_PROVIDER_TYPE_KEY)?,
            kubeconfig_file: data.opt_string(KUBECONFIG_FILE_KEY)?,
        })
    }

    fn full_name(&self) -> ManagementClusterFullName {
        ManagementClusterFullName { name: self.name.clone() }
    }
}

/// Reject a kubeconfig path that does not point at well-formed YAML before
/// any network call is made.
fn validate_kubeconfig(path: &str) -> ProviderResult<()> {
    let content = std::fs::read_to_string(Path::new(path)).map_err(|err| {
        ProviderError::Validation(format!("unable to read kubeconfig file {path}: {err}"))
    })?;

    let parsed: serde_yaml::Value = serde_yaml::from_str(&content).map_err(|err| {
        ProviderError::Validation(format!("kubeconfig file {path} is not valid YAML: {err}"))
    })?;

    if parsed.get("clusters").is_none() {
        return Err(ProviderError::Validation(format!(
            "kubeconfig file {path} has no clusters entry"
        )));
    }

    Ok(())
}

fn flatten_management_cluster(data: &mut ResourceData, management_cluster: &ManagementCluster) {
    data.set_id(&management_cluster.meta.uid);
    data.set(META_KEY, flatten_meta(&management_cluster.meta));
    data.set(
        CLUSTER_GROUP_KEY,
        json!(management_cluster.spec.default_cluster_group),
    );
    data.set(
        KUBERNETES_PROVIDER_TYPE_KEY,
        json!(management_cluster.spec.kubernetes_provider_type),
    );
    if let Some(status) = &management_cluster.status {
        data.set(REGISTRATION_URL_KEY, json!(status.registration_url));
    }
}

pub async fn create(client: &TmcClient, data: &mut ResourceData) -> ProviderResult<()> {
    let fields = ManagementClusterFields::from_data(data)?;

    if !fields.kubeconfig_file.is_empty() {
        validate_kubeconfig(&fields.kubeconfig_file)?;
    }

    let request = ManagementClusterRequest {
        management_cluster: ManagementCluster {
            full_name: fields.full_name(),
            meta: construct_meta(data)?,
            spec: ManagementClusterSpec {
                default_cluster_group: fields.cluster_group.clone(),
                kubernetes_provider_type: fields.kubernetes_provider_type.clone(),
            },
            status: None,
        },
    };

    let response = client
        .management_clusters()
        .create(&request)
        .await
        .map_err(ProviderError::api(RESOURCE, "create", &fields.name))?;

    data.set_id(&response.management_cluster.meta.uid);

    read(client, data, OperationContext::DataRead).await
}

pub async fn read(
    client: &TmcClient,
    data: &mut ResourceData,
    ctx: OperationContext,
) -> ProviderResult<()> {
    let name = data.string(NAME_KEY)?;
    let full_name = ManagementClusterFullName { name: name.clone() };

    let response = match client.management_clusters().get(&full_name).await {
        Ok(response) => response,
        Err(err) if err.is_not_found() && !ctx.is_data_read() => {
            data.remove_from_state();
            return Ok(());
        }
        Err(err) => return Err(ProviderError::api(RESOURCE, "get", &name)(err)),
    };

    flatten_management_cluster(data, &response.management_cluster);

    Ok(())
}

pub async fn update(client: &TmcClient, data: &mut ResourceData) -> ProviderResult<()> {
    let fields = ManagementClusterFields::from_data(data)?;
    let desired = construct_meta(data)?;

    let mut current = client
        .management_clusters()
        .get(&fields.full_name())
        .await
        .map_err(ProviderError::api(RESOURCE, "get", &fields.name))?;

    let meta_changed = current
        .management_cluster
        .meta
        .mutable_fields_differ(&desired);
    let group_changed =
        current.management_cluster.spec.default_cluster_group != fields.cluster_group;

    if !meta_changed && !group_changed {
        return Ok(());
    }

    current.management_cluster.meta.labels = desired.labels;
    current.management_cluster.meta.description = desired.description;
    current.management_cluster.spec.default_cluster_group = fields.cluster_group.clone();

    client
        .management_clusters()
        .update(&ManagementClusterRequest {
            management_cluster: current.management_cluster,
        })
        .await
        .map_err(ProviderError::api(RESOURCE, "update", &fields.name))?;

    read(client, data, OperationContext::Refresh).await
}

pub async fn delete(client: &TmcClient, data: &mut ResourceData) -> ProviderResult<()> {
    let name = data.string(NAME_KEY)?;
    let full_name = ManagementClusterFullName { name: name.clone() };

    match client.management_clusters().delete(&full_name).await {
        Ok(()) => {}
        Err(err) if err.is_not_found() => {}
        Err(err) => return Err(ProviderError::api(RESOURCE, "delete", &name)(err)),
    }

    data.remove_from_state();

    Ok(())
}

pub async fn data_source_read(client: &TmcClient, data: &mut ResourceData) -> ProviderResult<()> {
    read(client, data, OperationContext::DataRead).await
}
