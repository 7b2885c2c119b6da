//! Data Store Traits
//!
//! Defines the capability contract every data store implements and the
//! class trait used to register constructible store types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::any::Any;

use super::data::ObjectData;
use super::error::DsResult;
use super::methods::MethodTable;

/// Options passed to [`ObjectDataStore::delete`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteArgs {
    /// Delete permanently even when the store would otherwise refuse.
    #[serde(default)]
    pub force: bool,

    /// Store-specific options.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl DeleteArgs {
    /// Arguments for a forced delete.
    pub fn force() -> Self {
        Self {
            force: true,
            ..Self::default()
        }
    }

    /// Add a store-specific option.
    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Core trait for data stores
///
/// All data stores must implement this trait. Every operation receives the
/// caller's object by mutable reference; how (and whether) it is changed is
/// entirely up to the store.
pub trait ObjectDataStore: Send + Sync {
    /// Load the object identified by `data` into `data`.
    fn read(&self, data: &mut ObjectData) -> DsResult<()>;

    /// Persist a new object, writing the assigned id back into `data`.
    fn create(&self, data: &mut ObjectData) -> DsResult<()>;

    /// Persist changes to an existing object.
    fn update(&self, data: &mut ObjectData) -> DsResult<()>;

    /// Remove an object.
    fn delete(&self, data: &mut ObjectData, args: &DeleteArgs) -> DsResult<()>;
}

/// A data store type that can be registered in a [`StoreCatalog`].
///
/// `CLASS_NAME` is the identifier registry entries use to refer to the
/// type. `methods` declares the extra methods callers may reach through
/// [`DataStore::call`]; it runs once, when the class is registered.
///
/// [`StoreCatalog`]: crate::registry::StoreCatalog
/// [`DataStore::call`]: crate::resolver::DataStore::call
///
/// # Example
///
/// ```
/// use dsk::store::{DeleteArgs, DsResult, MethodTable, ObjectData, ObjectDataStore, StoreClass};
/// use serde_json::json;
///
/// #[derive(Default)]
/// struct NullStore;
///
/// impl ObjectDataStore for NullStore {
///     fn read(&self, _data: &mut ObjectData) -> DsResult<()> { Ok(()) }
///     fn create(&self, data: &mut ObjectData) -> DsResult<()> { data.set_id(1); Ok(()) }
///     fn update(&self, _data: &mut ObjectData) -> DsResult<()> { Ok(()) }
///     fn delete(&self, _data: &mut ObjectData, _args: &DeleteArgs) -> DsResult<()> { Ok(()) }
/// }
///
/// impl StoreClass for NullStore {
///     const CLASS_NAME: &'static str = "NullStore";
///
///     fn methods() -> MethodTable<Self> {
///         MethodTable::new().with("ping", |_store, _data, _args| Ok(json!("pong")))
///     }
/// }
///
/// assert!(NullStore::methods().contains("ping"));
/// ```
pub trait StoreClass: ObjectDataStore + Any + Sized {
    /// Identifier registry entries use for this class.
    const CLASS_NAME: &'static str;

    /// Extra methods exposed beyond the capability contract.
    fn methods() -> MethodTable<Self> {
        MethodTable::new()
    }
}
