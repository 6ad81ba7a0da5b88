//! Per-instance schema state
//!
//! `ResourceData` is the persisted record of one declared resource: a field
//! map, an opaque ID assigned from server metadata, and a removal flag set
//! when the remote resource is confirmed absent. Handlers read typed fields
//! through the accessors here, which fail with a descriptive error on a
//! missing or mis-shaped field instead of panicking.

use serde_json::Value;
use std::collections::BTreeMap;

use super::error::{ProviderError, ProviderResult};

/// Distinguishes a state-refresh read from an explicit data-source lookup.
///
/// On refresh, a not-found response prunes the resource from state; on a
/// data-source lookup (or the read that follows a create) it is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationContext {
    Refresh,
    DataRead,
}

impl OperationContext {
    pub fn is_data_read(&self) -> bool {
        matches!(self, OperationContext::DataRead)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceData {
    id: Option<String>,
    fields: BTreeMap<String, Value>,
    removed: bool,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build state from declared configuration fields.
    pub fn from_fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            id: None,
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            removed: false,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    /// Remove this instance from state entirely. Used when the remote
    /// resource is confirmed absent.
    pub fn remove_from_state(&mut self) {
        self.id = None;
        self.fields.clear();
        self.removed = true;
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    /// Read a required string field.
    pub fn string(&self, key: &str) -> ProviderResult<String> {
        match self.fields.get(key) {
            Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
            _ => Err(ProviderError::field(key, "non-empty string")),
        }
    }

    /// Read an optional string field; absent means empty.
    pub fn opt_string(&self, key: &str) -> ProviderResult<String> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(ProviderError::field(key, "string")),
        }
    }

    /// Read an optional bool field; absent means false.
    pub fn opt_bool(&self, key: &str) -> ProviderResult<bool> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(ProviderError::field(key, "bool")),
        }
    }

    /// Read an optional integer field; absent means zero.
    pub fn opt_int(&self, key: &str) -> ProviderResult<i64> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(0),
            Some(Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| ProviderError::field(key, "integer")),
            Some(_) => Err(ProviderError::field(key, "integer")),
        }
    }

    /// Read an optional nested object field.
    pub fn opt_object(&self, key: &str) -> ProviderResult<Option<&serde_json::Map<String, Value>>> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(_) => Err(ProviderError::field(key, "object")),
        }
    }

    /// Read an optional array field; absent means empty.
    pub fn opt_array(&self, key: &str) -> ProviderResult<&[Value]> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(&[]),
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(ProviderError::field(key, "array")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_string_rejects_missing_and_mistyped() {
        let data = ResourceData::from_fields([("name", json!("prov-1")), ("count", json!(3))]);

        assert_eq!(data.string("name").unwrap(), "prov-1");
        assert!(data.string("absent").is_err());
        assert!(data.string("count").is_err());
    }

    #[test]
    fn optional_accessors_default_when_absent() {
        let data = ResourceData::new();

        assert_eq!(data.opt_string("x").unwrap(), "");
        assert!(!data.opt_bool("x").unwrap());
        assert_eq!(data.opt_int("x").unwrap(), 0);
        assert!(data.opt_array("x").unwrap().is_empty());
    }

    #[test]
    fn remove_from_state_clears_everything() {
        let mut data = ResourceData::from_fields([("name", json!("n"))]);
        data.set_id("uid-1");

        data.remove_from_state();

        assert!(data.is_removed());
        assert!(data.id().is_none());
        assert!(data.get("name").is_none());
    }
}
