//! Snapshot and restore of resolver handles.
//!
//! A [`DataStore`] serializes to its object type only. Restoring re-runs
//! resolution against the registry as it is at restore time, so the bound
//! instance is always rebuilt and revalidated.

use serde::de::{DeserializeSeed, Deserializer, Error as _};
use serde::{Deserialize, Serialize, Serializer};

use super::DataStore;
use crate::registry::StoreRegistry;
use crate::store::DsResult;

/// Serialized form of a [`DataStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStoreSnapshot {
    /// Object type the store was loaded for.
    pub object_type: String,
}

impl DataStore {
    /// Capture the object type of this store.
    pub fn snapshot(&self) -> DataStoreSnapshot {
        DataStoreSnapshot {
            object_type: self.object_type().to_string(),
        }
    }

    /// Rebuild a store from a snapshot by resolving it again.
    pub fn restore(registry: &StoreRegistry, snapshot: &DataStoreSnapshot) -> DsResult<Self> {
        Self::load(registry, &snapshot.object_type)
    }

    /// Serialize the snapshot as JSON.
    pub fn to_json(&self) -> DsResult<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Restore a store from a JSON snapshot.
    pub fn from_json(registry: &StoreRegistry, json: &str) -> DsResult<Self> {
        let snapshot: DataStoreSnapshot = serde_json::from_str(json)?;
        Self::restore(registry, &snapshot)
    }
}

impl Serialize for DataStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.snapshot().serialize(serializer)
    }
}

/// Deserializes a [`DataStore`] by resolving its snapshot against a registry.
///
/// # Example
///
/// ```
/// use dsk::registry::{RegistryConfig, StoreRegistry};
/// use dsk::resolver::{DataStore, RestoreSeed};
/// use serde::de::DeserializeSeed;
///
/// let registry = StoreRegistry::init(&RegistryConfig::default()).unwrap();
/// let store = DataStore::load(&registry, "bookmark").unwrap();
/// let json = serde_json::to_string(&store).unwrap();
///
/// let mut de = serde_json::Deserializer::from_str(&json);
/// let restored = RestoreSeed::new(&registry).deserialize(&mut de).unwrap();
/// assert_eq!(restored.get_current_class_name(), store.get_current_class_name());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RestoreSeed<'a> {
    registry: &'a StoreRegistry,
}

impl<'a> RestoreSeed<'a> {
    /// Seed resolving against `registry`.
    pub fn new(registry: &'a StoreRegistry) -> Self {
        Self { registry }
    }
}

impl<'de, 'a> DeserializeSeed<'de> for RestoreSeed<'a> {
    type Value = DataStore;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        let snapshot = DataStoreSnapshot::deserialize(deserializer)?;
        DataStore::restore(self.registry, &snapshot).map_err(D::Error::custom)
    }
}
