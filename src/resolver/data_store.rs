//! Resolver handle bound to one object type.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::registry::{BoundStore, StoreRef, StoreRegistry};
use crate::store::{
    DataStoreError, DeleteArgs, DsResult, InvalidReason, ObjectData, ObjectDataStore,
};

/// A data store resolved for one object type.
///
/// Built by [`DataStore::load`], which either returns a fully bound handle
/// or fails with [`DataStoreError::InvalidDataStore`]. The four core
/// operations and any extra method declared by the store class are
/// forwarded to the bound instance, with the caller's object passed by
/// mutable reference.
///
/// # Example
///
/// ```
/// use dsk::registry::{RegistryConfig, StoreRegistry};
/// use dsk::resolver::DataStore;
/// use dsk::store::ObjectData;
/// use serde_json::json;
///
/// let registry = StoreRegistry::init(&RegistryConfig::default()).unwrap();
/// let store = DataStore::load(&registry, "bookmark").unwrap();
/// assert_eq!(store.get_current_class_name(), "BookmarkDataStore");
///
/// let mut bookmark = ObjectData::new("bookmark");
/// bookmark.set_prop("url", json!("https://example.com"));
/// store.create(&mut bookmark).unwrap();
/// assert!(bookmark.id().is_some());
/// ```
pub struct DataStore {
    object_type: String,
    bound: BoundStore,
}

impl DataStore {
    /// Resolve the data store for an object type.
    ///
    /// Looks the type up in the filtered mapping, falling back to the part
    /// before the first separator (`product-variable` → `product`), applies
    /// the per-type hook and validates the result.
    pub fn load(registry: &StoreRegistry, object_type: &str) -> DsResult<Self> {
        let bound = resolve(registry, object_type)?;
        debug!(
            object_type,
            class = bound.class_name,
            "Resolved data store"
        );
        Ok(Self {
            object_type: object_type.to_string(),
            bound,
        })
    }

    /// Object type this store was loaded for.
    pub fn object_type(&self) -> &str {
        &self.object_type
    }

    /// Class name of the bound store.
    pub fn get_current_class_name(&self) -> &str {
        self.bound.class_name
    }

    /// The bound store instance.
    pub fn instance(&self) -> &Arc<dyn ObjectDataStore> {
        &self.bound.store
    }

    /// Reads an object from the data store.
    pub fn read(&self, data: &mut ObjectData) -> DsResult<()> {
        self.bound.store.read(data)
    }

    /// Create an object in the data store.
    pub fn create(&self, data: &mut ObjectData) -> DsResult<()> {
        self.bound.store.create(data)
    }

    /// Update an object in the data store.
    pub fn update(&self, data: &mut ObjectData) -> DsResult<()> {
        self.bound.store.update(data)
    }

    /// Delete an object from the data store.
    pub fn delete(&self, data: &mut ObjectData, args: &DeleteArgs) -> DsResult<()> {
        self.bound.store.delete(data, args)
    }

    /// Delete an object with default arguments.
    pub fn delete_default(&self, data: &mut ObjectData) -> DsResult<()> {
        self.delete(data, &DeleteArgs::default())
    }

    /// Call an extra method declared by the bound store class.
    ///
    /// Fails with [`DataStoreError::MethodNotFound`] if the class does not
    /// declare `method`.
    pub fn call(&self, method: &str, data: &mut ObjectData, args: &[Value]) -> DsResult<Value> {
        self.bound
            .methods
            .call(&*self.bound.target, method, data, args)
    }

    /// Whether the bound store class declares an extra method.
    pub fn has_method(&self, method: &str) -> bool {
        self.bound.methods.contains(method)
    }

    /// Sorted names of the extra methods of the bound store class.
    pub fn method_names(&self) -> Vec<&'static str> {
        self.bound.methods.names()
    }
}

impl std::fmt::Debug for DataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataStore")
            .field("object_type", &self.object_type)
            .field("current_class_name", &self.bound.class_name)
            .finish()
    }
}

// Filters and constructors are user code that may resolve other stores, so
// they run on state copied out of the registry, never under its lock.
fn resolve(registry: &StoreRegistry, object_type: &str) -> DsResult<BoundStore> {
    let (entries, separator, mapping_filters) = {
        let inner = registry.read();
        (
            inner.entries.clone(),
            inner.separator,
            inner.hooks.mapping_chain(),
        )
    };
    let mut stores = mapping_filters.apply(entries);

    let matched_type = if stores.contains_key(object_type) {
        object_type
    } else {
        let parent = object_type.split(separator).next().unwrap_or(object_type);
        debug!(object_type, parent, "No exact data store, trying parent type");
        parent
    };

    let Some(store) = stores.remove(matched_type) else {
        warn!(object_type, "No data store registered");
        return Err(DataStoreError::invalid(
            object_type,
            InvalidReason::UnknownObjectType,
        ));
    };

    let type_filters = registry.read().hooks.type_chain(matched_type);
    match type_filters.apply(store) {
        StoreRef::Instance(instance) => {
            let bound = registry.read().catalog.bind_instance(&instance);
            bound.ok_or_else(|| {
                warn!(
                    object_type,
                    type_name = instance.type_name(),
                    "Live instance is not a data store"
                );
                DataStoreError::invalid(
                    object_type,
                    InvalidReason::NotADataStore(instance.type_name().to_string()),
                )
            })
        }
        StoreRef::Class(class_name) => {
            let entry = registry.read().catalog.class_entry(&class_name);
            entry.and_then(|entry| entry.construct()).ok_or_else(|| {
                warn!(object_type, class = %class_name, "Data store class not registered");
                DataStoreError::invalid(object_type, InvalidReason::UnknownClass(class_name.clone()))
            })
        }
    }
}
