//! Object data passed by mutable reference into every store operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A domain object as seen by data stores.
///
/// Callers own the value and hand a `&mut ObjectData` to the resolver; the
/// bound store reads from it and writes results back into it in place.
///
/// # Example
///
/// ```
/// use dsk::store::ObjectData;
/// use serde_json::json;
///
/// let mut bookmark = ObjectData::new("bookmark");
/// bookmark.set_prop("url", json!("https://example.com"));
/// assert_eq!(bookmark.prop_str("url"), Some("https://example.com"));
/// assert!(bookmark.id().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectData {
    /// Backend-assigned id, `None` until created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Object type this data belongs to.
    pub object_type: String,

    /// Arbitrary properties.
    #[serde(default)]
    pub props: Map<String, Value>,

    /// When the backend first stored the object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,

    /// When the backend last updated the object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<DateTime<Utc>>,
}

impl ObjectData {
    /// Create empty data for an object type.
    pub fn new(object_type: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            ..Self::default()
        }
    }

    /// Create data that refers to an existing object by id.
    pub fn with_id(object_type: impl Into<String>, id: u64) -> Self {
        Self {
            id: Some(id),
            ..Self::new(object_type)
        }
    }

    /// Backend-assigned id.
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Set the id.
    pub fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }

    /// Get a property.
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// Get a string property.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }

    /// Get an unsigned integer property.
    pub fn prop_u64(&self, key: &str) -> Option<u64> {
        self.props.get(key).and_then(Value::as_u64)
    }

    /// Set a property, returning the previous value.
    pub fn set_prop(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.props.insert(key.into(), value)
    }

    /// Remove a property.
    pub fn remove_prop(&mut self, key: &str) -> Option<Value> {
        self.props.remove(key)
    }
}
