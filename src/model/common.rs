//! Shared model pieces: resource metadata common to every TMC resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata block attached to every TMC resource.
///
/// `uid` and `resource_version` are server-owned; `description` and `labels`
/// are the only fields a caller may mutate after creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Meta {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uid: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub resource_version: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
}

impl Meta {
    /// True when the caller-mutable fields differ from `other`.
    pub fn mutable_fields_differ(&self, other: &Meta) -> bool {
        self.description != other.description || self.labels != other.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutable_fields_ignore_server_owned_data() {
        let mut a = Meta {
            uid: "uid-1".into(),
            resource_version: "1".into(),
            description: "d".into(),
            ..Default::default()
        };
        let mut b = a.clone();
        b.uid = "uid-2".into();
        b.resource_version = "7".into();
        assert!(!a.mutable_fields_differ(&b));

        a.labels.insert("env".into(), "prod".into());
        assert!(a.mutable_fields_differ(&b));
    }

    #[test]
    fn empty_fields_are_omitted_from_json() {
        let json = serde_json::to_value(Meta::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
