//! Meta block mapping shared by every resource: construct the API metadata
//! from schema state and flatten server metadata back into it.

use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::model::common::Meta;

use super::data::ResourceData;
use super::error::{ProviderError, ProviderResult};
use super::schema::FieldSchema;

pub const META_KEY: &str = "meta";

const DESCRIPTION_KEY: &str = "description";
const LABELS_KEY: &str = "labels";
const UID_KEY: &str = "uid";
const RESOURCE_VERSION_KEY: &str = "resource_version";

pub fn meta_schema() -> FieldSchema {
    FieldSchema::optional_block("Metadata for the resource: description and labels")
}

/// Build API metadata from the state's meta block. An absent block yields
/// default metadata; a present block must be an object with string-valued
/// description and string-to-string labels.
pub fn construct_meta(data: &ResourceData) -> ProviderResult<Meta> {
    let Some(block) = data.opt_object(META_KEY)? else {
        return Ok(Meta::default());
    };

    let description = match block.get(DESCRIPTION_KEY) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(ProviderError::field("meta.description", "string")),
    };

    let mut labels = BTreeMap::new();
    match block.get(LABELS_KEY) {
        None | Some(Value::Null) => {}
        Some(Value::Object(map)) => {
            for (key, value) in map {
                let Value::String(value) = value else {
                    return Err(ProviderError::field("meta.labels", "map of strings"));
                };
                labels.insert(key.clone(), value.clone());
            }
        }
        Some(_) => return Err(ProviderError::field("meta.labels", "map of strings")),
    }

    Ok(Meta {
        description,
        labels,
        ..Default::default()
    })
}

/// Flatten server metadata into the state's meta block.
pub fn flatten_meta(meta: &Meta) -> Value {
    json!({
        UID_KEY: meta.uid,
        RESOURCE_VERSION_KEY: meta.resource_version,
        DESCRIPTION_KEY: meta.description,
        LABELS_KEY: meta.labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct_meta_defaults_when_block_absent() {
        let data = ResourceData::new();
        assert_eq!(construct_meta(&data).unwrap(), Meta::default());
    }

    #[test]
    fn construct_meta_reads_description_and_labels() {
        let mut data = ResourceData::new();
        data.set(
            META_KEY,
            json!({"description": "test", "labels": {"env": "dev"}}),
        );

        let meta = construct_meta(&data).unwrap();
        assert_eq!(meta.description, "test");
        assert_eq!(meta.labels.get("env").map(String::as_str), Some("dev"));
    }

    #[test]
    fn construct_meta_rejects_non_string_labels() {
        let mut data = ResourceData::new();
        data.set(META_KEY, json!({"labels": {"env": 3}}));
        assert!(construct_meta(&data).is_err());
    }

    #[test]
    fn flatten_then_construct_keeps_mutable_fields() {
        let meta = Meta {
            uid: "uid-1".into(),
            resource_version: "4".into(),
            description: "described".into(),
            labels: [("team".to_string(), "infra".to_string())].into(),
            creation_time: None,
        };

        let mut data = ResourceData::new();
        data.set(META_KEY, flatten_meta(&meta));

        let rebuilt = construct_meta(&data).unwrap();
        assert_eq!(rebuilt.description, meta.description);
        assert_eq!(rebuilt.labels, meta.labels);
    }
}
