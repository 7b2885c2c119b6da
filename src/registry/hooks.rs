//! Named extension points applied during resolution.
//!
//! Two kinds of hooks exist, both named after the registry namespace:
//!
//! - `"<namespace>_data_stores"` receives the whole mapping and returns the
//!   mapping to use for one resolution.
//! - `"<namespace>_<type>_data_store"` receives the entry matched for
//!   `<type>` and returns the entry to bind.
//!
//! Filters on a hook run in ascending priority; filters sharing a priority
//! run in the order they were added.

use std::collections::HashMap;
use std::sync::Arc;

use super::{StoreMap, StoreRef};

/// Priority used when none is given.
pub const DEFAULT_PRIORITY: i32 = 10;

/// A filter taking the current value and returning its replacement.
pub type Filter<T> = Arc<dyn Fn(T) -> T + Send + Sync>;

/// Ordered filters of one hook.
///
/// Cloning shares the filters, so a chain can be taken out of the registry
/// and run after its lock is released.
pub(crate) struct FilterChain<T> {
    filters: Vec<(i32, Filter<T>)>,
}

impl<T> Clone for FilterChain<T> {
    fn clone(&self) -> Self {
        Self {
            filters: self.filters.clone(),
        }
    }
}

impl<T> FilterChain<T> {
    fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    fn add(&mut self, priority: i32, filter: Filter<T>) {
        let pos = self.filters.partition_point(|(p, _)| *p <= priority);
        self.filters.insert(pos, (priority, filter));
    }

    pub(crate) fn apply(&self, value: T) -> T {
        self.filters.iter().fold(value, |acc, (_, filter)| filter(acc))
    }

    fn len(&self) -> usize {
        self.filters.len()
    }
}

/// Filter lists for the mapping hook and the per-type hooks of one namespace.
pub struct Hooks {
    namespace: String,
    mapping: FilterChain<StoreMap>,
    types: HashMap<String, FilterChain<StoreRef>>,
}

impl Hooks {
    /// Create hooks for a namespace.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            mapping: FilterChain::new(),
            types: HashMap::new(),
        }
    }

    /// Namespace hook names are derived from.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Name of the mapping hook.
    pub fn mapping_hook_name(&self) -> String {
        format!("{}_data_stores", self.namespace)
    }

    /// Name of the hook for one object type.
    pub fn type_hook_name(&self, object_type: &str) -> String {
        format!("{}_{}_data_store", self.namespace, object_type)
    }

    /// Add a filter to the mapping hook.
    pub fn add_mapping_filter<F>(&mut self, priority: i32, filter: F)
    where
        F: Fn(StoreMap) -> StoreMap + Send + Sync + 'static,
    {
        self.mapping.add(priority, Arc::new(filter));
    }

    /// Add a filter to the hook of one object type.
    pub fn add_type_filter<F>(&mut self, object_type: &str, priority: i32, filter: F)
    where
        F: Fn(StoreRef) -> StoreRef + Send + Sync + 'static,
    {
        let hook_name = self.type_hook_name(object_type);
        self.types
            .entry(hook_name)
            .or_insert_with(FilterChain::new)
            .add(priority, Arc::new(filter));
    }

    /// Run the mapping hook.
    pub fn apply_mapping(&self, stores: StoreMap) -> StoreMap {
        self.mapping.apply(stores)
    }

    /// Run the hook of one object type.
    pub fn apply_type(&self, object_type: &str, store: StoreRef) -> StoreRef {
        match self.types.get(&self.type_hook_name(object_type)) {
            Some(filters) => filters.apply(store),
            None => store,
        }
    }

    pub(crate) fn mapping_chain(&self) -> FilterChain<StoreMap> {
        self.mapping.clone()
    }

    pub(crate) fn type_chain(&self, object_type: &str) -> FilterChain<StoreRef> {
        self.types
            .get(&self.type_hook_name(object_type))
            .cloned()
            .unwrap_or_else(FilterChain::new)
    }

    /// Number of filters attached to a hook.
    pub fn filter_count(&self, hook_name: &str) -> usize {
        if hook_name == self.mapping_hook_name() {
            return self.mapping.len();
        }
        self.types.get(hook_name).map(FilterChain::len).unwrap_or(0)
    }

    /// Whether any filter is attached to a hook.
    pub fn has_filters(&self, hook_name: &str) -> bool {
        self.filter_count(hook_name) > 0
    }

    /// Detach every filter from a hook, returning how many were removed.
    pub fn remove_filters(&mut self, hook_name: &str) -> usize {
        if hook_name == self.mapping_hook_name() {
            let removed = self.mapping.len();
            self.mapping = FilterChain::new();
            return removed;
        }
        self.types
            .remove(hook_name)
            .map(|filters| filters.len())
            .unwrap_or(0)
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut type_hooks: Vec<_> = self.types.keys().collect();
        type_hooks.sort();
        f.debug_struct("Hooks")
            .field("namespace", &self.namespace)
            .field("mapping_filters", &self.mapping.len())
            .field("type_hooks", &type_hooks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping_with(entries: &[(&str, &str)]) -> StoreMap {
        entries
            .iter()
            .map(|(ty, class)| (ty.to_string(), StoreRef::class(*class)))
            .collect()
    }

    #[test]
    fn test_hook_names() {
        let hooks = Hooks::new("dsk");
        assert_eq!(hooks.mapping_hook_name(), "dsk_data_stores");
        assert_eq!(hooks.type_hook_name("bookmark"), "dsk_bookmark_data_store");
    }

    #[test]
    fn test_mapping_filters_run_in_priority_then_registration_order() {
        let mut hooks = Hooks::new("dsk");
        let tag = |label: &'static str| {
            move |mut stores: StoreMap| {
                let trail = stores
                    .get("trail")
                    .map(|s| s.name().to_string())
                    .unwrap_or_default();
                stores.insert("trail".into(), StoreRef::class(format!("{}{}", trail, label)));
                stores
            }
        };

        hooks.add_mapping_filter(DEFAULT_PRIORITY, tag("b"));
        hooks.add_mapping_filter(5, tag("a"));
        hooks.add_mapping_filter(DEFAULT_PRIORITY, tag("c"));
        hooks.add_mapping_filter(20, tag("d"));

        let result = hooks.apply_mapping(StoreMap::new());
        assert_eq!(result.get("trail").map(StoreRef::name), Some("abcd"));
    }

    #[test]
    fn test_type_filter_only_applies_to_its_type() {
        let mut hooks = Hooks::new("dsk");
        hooks.add_type_filter("bookmark", DEFAULT_PRIORITY, |_| StoreRef::class("Override"));

        let bookmark = hooks.apply_type("bookmark", StoreRef::class("Original"));
        assert_eq!(bookmark.name(), "Override");

        let list = hooks.apply_type("bookmark_list", StoreRef::class("Original"));
        assert_eq!(list.name(), "Original");
    }

    #[test]
    fn test_apply_mapping_without_filters_is_identity() {
        let hooks = Hooks::new("dsk");
        let stores = mapping_with(&[("bookmark", "BookmarkDataStore")]);
        let result = hooks.apply_mapping(stores);
        assert_eq!(result.len(), 1);
        assert_eq!(result["bookmark"].name(), "BookmarkDataStore");
    }

    #[test]
    fn test_chain_outlives_removal() {
        let mut hooks = Hooks::new("dsk");
        hooks.add_type_filter("bookmark", DEFAULT_PRIORITY, |_| StoreRef::class("Override"));

        let chain = hooks.type_chain("bookmark");
        hooks.remove_filters("dsk_bookmark_data_store");

        assert_eq!(chain.apply(StoreRef::class("Original")).name(), "Override");
        let empty = hooks.type_chain("bookmark");
        assert_eq!(empty.apply(StoreRef::class("Original")).name(), "Original");
    }

    #[test]
    fn test_remove_filters() {
        let mut hooks = Hooks::new("dsk");
        hooks.add_mapping_filter(DEFAULT_PRIORITY, |stores| stores);
        hooks.add_mapping_filter(DEFAULT_PRIORITY, |stores| stores);
        hooks.add_type_filter("bookmark", DEFAULT_PRIORITY, |store| store);

        assert!(hooks.has_filters("dsk_data_stores"));
        assert_eq!(hooks.filter_count("dsk_bookmark_data_store"), 1);

        assert_eq!(hooks.remove_filters("dsk_data_stores"), 2);
        assert_eq!(hooks.remove_filters("dsk_bookmark_data_store"), 1);
        assert_eq!(hooks.remove_filters("dsk_unknown_data_store"), 0);
        assert!(!hooks.has_filters("dsk_data_stores"));
    }
}
