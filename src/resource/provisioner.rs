//! Provisioner resource: CRUD handlers and the list-oriented data source.

use serde_json::json;

use crate::model::provisioner::{Provisioner, ProvisionerFullName, ProvisionerRequest};
use crate::tmc::TmcClient;

use super::common::{construct_meta, flatten_meta, meta_schema, META_KEY};
use super::data::{OperationContext, ResourceData};
use super::error::{ProviderError, ProviderResult};
use super::schema::{FieldSchema, SchemaMap};

pub const RESOURCE_NAME: &str = "tanzu-mission-control_provisioner";

pub const NAME_KEY: &str = "name";
pub const MANAGEMENT_CLUSTER_NAME_KEY: &str = "management_cluster";
pub const ORG_ID_KEY: &str = "org_id";

const RESOURCE: &str = "provisioner";

pub fn schema() -> SchemaMap {
    SchemaMap::from([
        (
            NAME_KEY,
            FieldSchema::required_string("Name of the provisioner").force_new(),
        ),
        (
            MANAGEMENT_CLUSTER_NAME_KEY,
            FieldSchema::required_string("Name of the management cluster").force_new(),
        ),
        (ORG_ID_KEY, FieldSchema::optional_string("ID of the organization")),
        (META_KEY, meta_schema()),
    ])
}

pub fn list_schema() -> SchemaMap {
    SchemaMap::from([
        (NAME_KEY, FieldSchema::optional_string("Name of the provisioner")),
        (
            MANAGEMENT_CLUSTER_NAME_KEY,
            FieldSchema::required_string("Name of the management cluster").force_new(),
        ),
        (ORG_ID_KEY, FieldSchema::optional_string("ID of the organization")),
        (META_KEY, meta_schema()),
    ])
}

/// Typed view of the provisioner's identifying fields, extracted and
/// validated once per request.
struct ProvisionerFields {
    name: String,
    management_cluster: String,
    org_id: String,
}

impl ProvisionerFields {
    fn from_data(data: &ResourceData) -> ProviderResult<Self> {
        Ok(Self {
            name: data.string(NAME_KEY)?,
            management_cluster: data.string(MANAGEMENT_CLUSTER_NAME_KEY)?,
            org_id: data.opt_string(ORG_ID_KEY)?,
        })
    }

    fn full_name(&self) -> ProvisionerFullName {
        ProvisionerFullName {
            management_cluster_name: self.management_cluster.clone(),
            name: self.name.clone(),
            org_id: self.org_id.clone(),
        }
    }
}

pub async fn create(client: &TmcClient, data: &mut ResourceData) -> ProviderResult<()> {
    let fields = ProvisionerFields::from_data(data)?;

    let request = ProvisionerRequest {
        provisioner: Provisioner {
            full_name: fields.full_name(),
            meta: construct_meta(data)?,
        },
    };

    let response = client
        .provisioners()
        .create(&request)
        .await
        .map_err(ProviderError::api(RESOURCE, "create", &fields.name))?;

    data.set_id(&response.provisioner.meta.uid);

    // Populate computed fields from the authoritative copy.
    read(client, data, OperationContext::DataRead).await
}

pub async fn read(
    client: &TmcClient,
    data: &mut ResourceData,
    ctx: OperationContext,
) -> ProviderResult<()> {
    let fields = ProvisionerFields::from_data(data)?;

    let response = match client.provisioners().get(&fields.full_name()).await {
        Ok(response) => response,
        Err(err) if err.is_not_found() && !ctx.is_data_read() => {
            data.remove_from_state();
            return Ok(());
        }
        Err(err) => return Err(ProviderError::api(RESOURCE, "get", &fields.name)(err)),
    };

    data.set_id(&response.provisioner.meta.uid);
    data.set(META_KEY, flatten_meta(&response.provisioner.meta));

    Ok(())
}

/// In-place update. Only metadata (labels, description) is mutable; the
/// desired metadata is compared against a fresh copy of the remote resource
/// and no update request is issued when nothing differs.
pub async fn update(client: &TmcClient, data: &mut ResourceData) -> ProviderResult<()> {
    let fields = ProvisionerFields::from_data(data)?;
    let desired = construct_meta(data)?;

    let mut current = client
        .provisioners()
        .get(&fields.full_name())
        .await
        .map_err(ProviderError::api(RESOURCE, "get", &fields.name))?;

    if !current.provisioner.meta.mutable_fields_differ(&desired) {
        return Ok(());
    }

    current.provisioner.meta.labels = desired.labels;
    current.provisioner.meta.description = desired.description;

    client
        .provisioners()
        .update(&ProvisionerRequest { provisioner: current.provisioner })
        .await
        .map_err(ProviderError::api(RESOURCE, "update", &fields.name))?;

    read(client, data, OperationContext::Refresh).await
}

/// Delete is idempotent: a not-found response counts as success, and state
/// is removed unconditionally on success or not-found.
pub async fn delete(client: &TmcClient, data: &mut ResourceData) -> ProviderResult<()> {
    let fields = ProvisionerFields::from_data(data)?;

    match client.provisioners().delete(&fields.full_name()).await {
        Ok(()) => {}
        Err(err) if err.is_not_found() => {}
        Err(err) => return Err(ProviderError::api(RESOURCE, "delete", &fields.name)(err)),
    }

    data.remove_from_state();

    Ok(())
}

/// Data-source read: a non-empty name reads one provisioner, otherwise all
/// provisioners under the management cluster are flattened.
pub async fn data_source_read(client: &TmcClient, data: &mut ResourceData) -> ProviderResult<()> {
    let management_cluster = data.string(MANAGEMENT_CLUSTER_NAME_KEY)?;
    let name = data.opt_string(NAME_KEY)?;

    if !name.is_empty() {
        return read(client, data, OperationContext::DataRead).await;
    }

    let full_name = ProvisionerFullName {
        management_cluster_name: management_cluster.clone(),
        ..Default::default()
    };

    let response = client
        .provisioners()
        .list(&full_name)
        .await
        .map_err(ProviderError::api(RESOURCE, "list", &management_cluster))?;

    let mut flattened = Vec::with_capacity(response.provisioners.len());
    for provisioner in &response.provisioners {
        data.set_id(&provisioner.meta.uid);
        flattened.push(json!({
            NAME_KEY: provisioner.full_name.name,
            META_KEY: flatten_meta(&provisioner.meta),
        }));
    }
    data.set("provisioners", json!(flattened));

    Ok(())
}
