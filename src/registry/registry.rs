//! Thread-safe registry of object types, store classes and hooks.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, trace};

use super::catalog::StoreCatalog;
use super::config::{RegistryConfig, DEFAULT_SEPARATOR};
use super::hooks::{Hooks, DEFAULT_PRIORITY};
use super::{RegistryError, RegistryResult, StoreRef};
use crate::store::StoreClass;

/// Mapping of object type to registry entry.
pub type StoreMap = HashMap<String, StoreRef>;

/// Validate an object type or class name.
///
/// Names must be non-empty and contain only alphanumeric characters,
/// underscores, or hyphens.
pub(crate) fn validate_name(name: &str) -> RegistryResult<()> {
    if name.is_empty() {
        return Err(RegistryError::InvalidName(name.to_string()));
    }

    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(RegistryError::InvalidName(name.to_string()));
    }

    Ok(())
}

/// Internal state of the registry.
pub(crate) struct RegistryInner {
    /// Character splitting a child type from its parent type.
    pub(crate) separator: char,

    /// Registered object types.
    pub(crate) entries: StoreMap,

    /// Constructible store classes.
    pub(crate) catalog: StoreCatalog,

    /// Mapping and per-type filters.
    pub(crate) hooks: Hooks,
}

/// Registry resolving object types to data stores.
///
/// Holds the default mapping of object types to [`StoreRef`]s, the
/// [`StoreCatalog`] of constructible classes, and the [`Hooks`] that rewrite
/// the mapping during resolution. Hooks never change the registered entries;
/// they only shape the working copy of one resolution.
///
/// # Thread Safety
///
/// The registry is wrapped in `Arc<RwLock<...>>` internally, making it safe
/// to clone and use across threads. Filters and class constructors run
/// after the lock is released, so they may resolve stores or update the
/// registry themselves.
///
/// # Example
///
/// ```rust
/// use dsk::registry::{StoreRef, StoreRegistry};
///
/// let registry = StoreRegistry::new("shop");
/// registry.register("product", StoreRef::class("ProductDataStore")).unwrap();
///
/// registry.add_mapping_filter(|mut stores| {
///     stores.insert("coupon".to_string(), StoreRef::class("CouponDataStore"));
///     stores
/// });
///
/// assert!(registry.effective_mapping().contains_key("coupon"));
/// assert!(!registry.contains("coupon"));
/// assert_eq!(registry.mapping_hook_name(), "shop_data_stores");
/// ```
#[derive(Clone)]
pub struct StoreRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

impl StoreRegistry {
    /// Create an empty registry for a namespace.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                separator: DEFAULT_SEPARATOR,
                entries: StoreMap::new(),
                catalog: StoreCatalog::new(),
                hooks: Hooks::new(namespace),
            })),
        }
    }

    /// Use a different fallback separator.
    pub fn with_separator(self, separator: char) -> Self {
        self.write().separator = separator;
        self
    }

    /// Build a registry from configuration.
    ///
    /// Registers the configured default mapping and, with the
    /// `memory-stores` feature, the built-in in-memory store classes.
    ///
    /// Without that feature the default mapping still names
    /// `BookmarkDataStore` and `BookmarkListDataStore`, and loading those
    /// types fails with `UnknownClass` until classes of those names are
    /// registered.
    pub fn init(config: &RegistryConfig) -> RegistryResult<Self> {
        config.validate()?;

        let registry = Self::new(config.namespace.clone()).with_separator(config.separator()?);
        for (object_type, class_name) in &config.stores {
            registry.register(object_type, StoreRef::class(class_name.clone()))?;
        }

        #[cfg(feature = "memory-stores")]
        crate::stores::register_builtin(&registry)?;

        debug!(
            namespace = %config.namespace,
            object_types = config.stores.len(),
            "Initialized store registry"
        );
        Ok(registry)
    }

    /// Register an entry for an object type, replacing any previous one.
    pub fn register(
        &self,
        object_type: &str,
        store: impl Into<StoreRef>,
    ) -> RegistryResult<Option<StoreRef>> {
        validate_name(object_type)?;
        let store = store.into();
        trace!(object_type, store = store.name(), "Registering data store");
        Ok(self.write().entries.insert(object_type.to_string(), store))
    }

    /// Remove the entry for an object type.
    pub fn unregister(&self, object_type: &str) -> Option<StoreRef> {
        self.write().entries.remove(object_type)
    }

    /// Get the registered entry for an object type.
    pub fn get(&self, object_type: &str) -> Option<StoreRef> {
        self.read().entries.get(object_type).cloned()
    }

    /// Check if an object type is registered.
    pub fn contains(&self, object_type: &str) -> bool {
        self.read().entries.contains_key(object_type)
    }

    /// Sorted list of registered object types.
    pub fn object_types(&self) -> Vec<String> {
        let mut types: Vec<_> = self.read().entries.keys().cloned().collect();
        types.sort();
        types
    }

    /// Number of registered object types.
    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    /// Check if no object type is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register a store class constructed with `Default`.
    pub fn register_class<S: StoreClass + Default>(&self) -> RegistryResult<()> {
        self.write().catalog.register::<S>()?;
        debug!(class = S::CLASS_NAME, "Registered store class");
        Ok(())
    }

    /// Register a store class with a custom constructor.
    pub fn register_class_with<S, F>(&self, constructor: F) -> RegistryResult<()>
    where
        S: StoreClass,
        F: Fn() -> S + Send + Sync + 'static,
    {
        self.write().catalog.register_with(constructor)?;
        debug!(class = S::CLASS_NAME, "Registered store class");
        Ok(())
    }

    /// Remove a store class. Returns true if it was registered.
    pub fn unregister_class(&self, class_name: &str) -> bool {
        self.write().catalog.remove(class_name)
    }

    /// Check if a store class is registered.
    pub fn has_class(&self, class_name: &str) -> bool {
        self.read().catalog.contains(class_name)
    }

    /// Sorted list of registered store class names.
    pub fn class_names(&self) -> Vec<&'static str> {
        self.read().catalog.class_names()
    }

    /// Add a filter to the mapping hook at the default priority.
    pub fn add_mapping_filter<F>(&self, filter: F)
    where
        F: Fn(StoreMap) -> StoreMap + Send + Sync + 'static,
    {
        self.add_mapping_filter_with_priority(DEFAULT_PRIORITY, filter);
    }

    /// Add a filter to the mapping hook.
    pub fn add_mapping_filter_with_priority<F>(&self, priority: i32, filter: F)
    where
        F: Fn(StoreMap) -> StoreMap + Send + Sync + 'static,
    {
        self.write().hooks.add_mapping_filter(priority, filter);
    }

    /// Override the entry resolved for one object type at the default priority.
    pub fn override_type<F>(&self, object_type: &str, filter: F)
    where
        F: Fn(StoreRef) -> StoreRef + Send + Sync + 'static,
    {
        self.override_type_with_priority(object_type, DEFAULT_PRIORITY, filter);
    }

    /// Override the entry resolved for one object type.
    pub fn override_type_with_priority<F>(&self, object_type: &str, priority: i32, filter: F)
    where
        F: Fn(StoreRef) -> StoreRef + Send + Sync + 'static,
    {
        self.write()
            .hooks
            .add_type_filter(object_type, priority, filter);
    }

    /// Whether any filter is attached to a hook.
    pub fn has_filters(&self, hook_name: &str) -> bool {
        self.read().hooks.has_filters(hook_name)
    }

    /// Detach every filter from a hook, returning how many were removed.
    pub fn remove_filters(&self, hook_name: &str) -> usize {
        self.write().hooks.remove_filters(hook_name)
    }

    /// Name of the mapping hook.
    pub fn mapping_hook_name(&self) -> String {
        self.read().hooks.mapping_hook_name()
    }

    /// Name of the hook for one object type.
    pub fn type_hook_name(&self, object_type: &str) -> String {
        self.read().hooks.type_hook_name(object_type)
    }

    /// Namespace of the registry.
    pub fn namespace(&self) -> String {
        self.read().hooks.namespace().to_string()
    }

    /// Fallback separator.
    pub fn separator(&self) -> char {
        self.read().separator
    }

    /// Copy of the registered entries, before any filter.
    pub fn default_mapping(&self) -> StoreMap {
        self.read().entries.clone()
    }

    /// Mapping as the next resolution would see it.
    pub fn effective_mapping(&self) -> StoreMap {
        let (entries, filters) = {
            let inner = self.read();
            (inner.entries.clone(), inner.hooks.mapping_chain())
        };
        filters.apply(entries)
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, RegistryInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new(super::config::DEFAULT_NAMESPACE)
    }
}

impl std::fmt::Debug for StoreRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.read();
        f.debug_struct("StoreRegistry")
            .field("separator", &inner.separator)
            .field("entries", &inner.entries)
            .field("catalog", &inner.catalog)
            .field("hooks", &inner.hooks)
            .finish()
    }
}
