//! Workload-cluster resource: CRUD handlers and data source.

use crate::model::cluster::{Cluster, ClusterFullName, ClusterRequest, ClusterSpec};
use crate::tmc::TmcClient;
use serde_json::json;

use super::common::{construct_meta, flatten_meta, meta_schema, META_KEY};
use super::data::{OperationContext, ResourceData};
use super::error::{ProviderError, ProviderResult};
use super::schema::{FieldSchema, SchemaMap};

pub const RESOURCE_NAME: &str = "tanzu-mission-control_cluster";

pub const NAME_KEY: &str = "name";
pub const MANAGEMENT_CLUSTER_NAME_KEY: &str = "management_cluster";
pub const PROVISIONER_NAME_KEY: &str = "provisioner_name";
pub const CLUSTER_GROUP_KEY: &str = "cluster_group";
pub const PROXY_NAME_KEY: &str = "proxy";
pub const PHASE_KEY: &str = "phase";

const RESOURCE: &str = "cluster";

pub fn schema() -> SchemaMap {
    SchemaMap::from([
        (NAME_KEY, FieldSchema::required_string("Name of this cluster").force_new()),
        (
            MANAGEMENT_CLUSTER_NAME_KEY,
            FieldSchema::required_string("Name of the management cluster").force_new(),
        ),
        (
            PROVISIONER_NAME_KEY,
            FieldSchema::required_string("Provisioner of the cluster").force_new(),
        ),
        (
            CLUSTER_GROUP_KEY,
            FieldSchema::optional_string("Name of the cluster group to which this cluster belongs"),
        ),
        (PROXY_NAME_KEY, FieldSchema::optional_string("Optional proxy name")),
        (PHASE_KEY, FieldSchema::computed_string("Lifecycle phase reported by the server")),
        (META_KEY, meta_schema()),
    ])
}

struct ClusterFields {
    name: String,
    management_cluster: String,
    provisioner: String,
    cluster_group: String,
    proxy: String,
}

impl ClusterFields {
    fn from_data(data: &ResourceData) -> ProviderResult<Self> {
        Ok(Self {
            name: data.string(NAME_KEY)?,
            management_cluster: data.string(MANAGEMENT_CLUSTER_NAME_KEY)?,
            provisioner: data.string(PROVISIONER_NAME_KEY)?,
            cluster_group: data.opt_string(CLUSTER_GROUP_KEY)?,
            proxy: data.opt_string(PROXY_NAME_KEY)?,
        })
    }

    fn full_name(&self) -> ClusterFullName {
        ClusterFullName {
            management_cluster_name: self.management_cluster.clone(),
            provisioner_name: self.provisioner.clone(),
            name: self.name.clone(),
        }
    }

    fn spec(&self) -> ClusterSpec {
        ClusterSpec {
            cluster_group: self.cluster_group.clone(),
            proxy_name: self.proxy.clone(),
        }
    }
}

fn flatten_cluster(data: &mut ResourceData, cluster: &Cluster) {
    data.set_id(&cluster.meta.uid);
    data.set(META_KEY, flatten_meta(&cluster.meta));
    data.set(CLUSTER_GROUP_KEY, json!(cluster.spec.cluster_group));
    if let Some(status) = &cluster.status {
        data.set(PHASE_KEY, json!(status.phase));
    }
}

pub async fn create(client: &TmcClient, data: &mut ResourceData) -> ProviderResult<()> {
    let fields = ClusterFields::from_data(data)?;

    let request = ClusterRequest {
        cluster: Cluster {
            full_name: fields.full_name(),
            meta: construct_meta(data)?,
            spec: fields.spec(),
            status: None,
        },
    };

    let response = client
        .clusters()
        .create(&request)
        .await
        .map_err(ProviderError::api(RESOURCE, "create", &fields.name))?;

    data.set_id(&response.cluster.meta.uid);

    read(client, data, OperationContext::DataRead).await
}

pub async fn read(
    client: &TmcClient,
    data: &mut ResourceData,
    ctx: OperationContext,
) -> ProviderResult<()> {
    let fields = ClusterFields::from_data(data)?;

    let response = match client.clusters().get(&fields.full_name()).await {
        Ok(response) => response,
        Err(err) if err.is_not_found() && !ctx.is_data_read() => {
            data.remove_from_state();
            return Ok(());
        }
        Err(err) => return Err(ProviderError::api(RESOURCE, "get", &fields.name)(err)),
    };

    flatten_cluster(data, &response.cluster);

    Ok(())
}

/// In-place update of the mutable fields: metadata and cluster group. The
/// remote copy is fetched first; when neither differs from the desired
/// state, no update request is issued.
pub async fn update(client: &TmcClient, data: &mut ResourceData) -> ProviderResult<()> {
    let fields = ClusterFields::from_data(data)?;
    let desired_meta = construct_meta(data)?;

    let mut current = client
        .clusters()
        .get(&fields.full_name())
        .await
        .map_err(ProviderError::api(RESOURCE, "get", &fields.name))?;

    let meta_changed = current.cluster.meta.mutable_fields_differ(&desired_meta);
    let group_changed = !fields.cluster_group.is_empty()
        && current.cluster.spec.cluster_group != fields.cluster_group;

    if !meta_changed && !group_changed {
        return Ok(());
    }

    current.cluster.meta.labels = desired_meta.labels;
    current.cluster.meta.description = desired_meta.description;
    if group_changed {
        current.cluster.spec.cluster_group = fields.cluster_group.clone();
    }

    client
        .clusters()
        .update(&ClusterRequest { cluster: current.cluster })
        .await
        .map_err(ProviderError::api(RESOURCE, "update", &fields.name))?;

    read(client, data, OperationContext::Refresh).await
}

pub async fn delete(client: &TmcClient, data: &mut ResourceData) -> ProviderResult<()> {
    let fields = ClusterFields::from_data(data)?;

    match client.clusters().delete(&fields.full_name()).await {
        Ok(()) => {}
        Err(err) if err.is_not_found() => {}
        Err(err) => return Err(ProviderError::api(RESOURCE, "delete", &fields.name)(err)),
    }

    data.remove_from_state();

    Ok(())
}

pub async fn data_source_read(client: &TmcClient, data: &mut ResourceData) -> ProviderResult<()> {
    read(client, data, OperationContext::DataRead).await
}
