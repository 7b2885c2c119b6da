//! Extra-method tables for data store classes.
//!
//! A store class declares its extra methods once in a [`MethodTable`].
//! When the class is registered the table is type-erased into a
//! [`MethodDispatch`], which the resolver uses to forward calls by name.

use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;

use super::data::ObjectData;
use super::error::{DataStoreError, DsResult};
use super::traits::StoreClass;

/// Signature of an extra method on store type `S`.
///
/// The first argument after the store is always the caller's object, by
/// mutable reference. The remaining arguments are passed through unchanged.
pub type StoreMethod<S> = fn(&S, &mut ObjectData, &[Value]) -> DsResult<Value>;

/// Name-indexed extra methods of one store class.
pub struct MethodTable<S> {
    methods: HashMap<&'static str, StoreMethod<S>>,
}

impl<S> MethodTable<S> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            methods: HashMap::new(),
        }
    }

    /// Add a method, builder style.
    pub fn with(mut self, name: &'static str, method: StoreMethod<S>) -> Self {
        self.insert(name, method);
        self
    }

    /// Add a method, replacing any previous one with the same name.
    pub fn insert(&mut self, name: &'static str, method: StoreMethod<S>) -> Option<StoreMethod<S>> {
        self.methods.insert(name, method)
    }

    /// Look up a method.
    pub fn get(&self, name: &str) -> Option<StoreMethod<S>> {
        self.methods.get(name).copied()
    }

    /// Check if a method exists.
    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Number of methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<S> Default for MethodTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Debug for MethodTable<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.methods.keys().collect();
        names.sort();
        f.debug_struct("MethodTable").field("methods", &names).finish()
    }
}

type ErasedMethod =
    Box<dyn Fn(&(dyn Any + Send + Sync), &mut ObjectData, &[Value]) -> DsResult<Value> + Send + Sync>;

/// Type-erased method table of a registered store class.
pub struct MethodDispatch {
    class_name: &'static str,
    methods: HashMap<&'static str, ErasedMethod>,
}

impl MethodDispatch {
    /// Build the dispatch table for a store class.
    pub fn for_class<S: StoreClass>() -> Self {
        Self::from_table(S::methods())
    }

    /// Erase a method table of store class `S`.
    pub fn from_table<S: StoreClass>(table: MethodTable<S>) -> Self {
        let methods = table
            .methods
            .into_iter()
            .map(|(name, method)| {
                let erased: ErasedMethod = Box::new(
                    move |target: &(dyn Any + Send + Sync), data: &mut ObjectData, args: &[Value]| {
                        let store = target.downcast_ref::<S>().ok_or_else(|| {
                            DataStoreError::Backend(format!(
                                "method '{}' invoked on an instance that is not {}",
                                name,
                                S::CLASS_NAME
                            ))
                        })?;
                        method(store, data, args)
                    },
                );
                (name, erased)
            })
            .collect();

        Self {
            class_name: S::CLASS_NAME,
            methods,
        }
    }

    /// Class the table belongs to.
    pub fn class_name(&self) -> &'static str {
        self.class_name
    }

    /// Check if a method exists.
    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Sorted method names.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.methods.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Invoke `method` on `target`.
    ///
    /// Fails with [`DataStoreError::MethodNotFound`] when the class does not
    /// declare the method.
    pub fn call(
        &self,
        target: &(dyn Any + Send + Sync),
        method: &str,
        data: &mut ObjectData,
        args: &[Value],
    ) -> DsResult<Value> {
        let f = self
            .methods
            .get(method)
            .ok_or_else(|| DataStoreError::method_not_found(self.class_name, method))?;
        f(target, data, args)
    }
}

impl std::fmt::Debug for MethodDispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodDispatch")
            .field("class_name", &self.class_name)
            .field("methods", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DeleteArgs, ObjectDataStore};
    use serde_json::json;

    #[derive(Default)]
    struct CounterStore {
        step: u64,
    }

    impl ObjectDataStore for CounterStore {
        fn read(&self, _data: &mut ObjectData) -> DsResult<()> {
            Ok(())
        }

        fn create(&self, _data: &mut ObjectData) -> DsResult<()> {
            Ok(())
        }

        fn update(&self, _data: &mut ObjectData) -> DsResult<()> {
            Ok(())
        }

        fn delete(&self, _data: &mut ObjectData, _args: &DeleteArgs) -> DsResult<()> {
            Ok(())
        }
    }

    impl StoreClass for CounterStore {
        const CLASS_NAME: &'static str = "CounterStore";

        fn methods() -> MethodTable<Self> {
            MethodTable::new().with("increment", |store, data, args| {
                let by = args.first().and_then(Value::as_u64).unwrap_or(store.step);
                let next = data.prop_u64("count").unwrap_or(0) + by;
                data.set_prop("count", json!(next));
                Ok(json!(next))
            })
        }
    }

    #[test]
    fn test_method_table_lookup() {
        let table = CounterStore::methods();
        assert_eq!(table.len(), 1);
        assert!(table.contains("increment"));
        assert!(table.get("decrement").is_none());
    }

    #[test]
    fn test_dispatch_mutates_object_in_place() {
        let dispatch = MethodDispatch::for_class::<CounterStore>();
        let store = CounterStore { step: 2 };
        let mut data = ObjectData::new("counter");

        let result = dispatch.call(&store, "increment", &mut data, &[]).unwrap();
        assert_eq!(result, json!(2));

        let result = dispatch
            .call(&store, "increment", &mut data, &[json!(5)])
            .unwrap();
        assert_eq!(result, json!(7));
        assert_eq!(data.prop_u64("count"), Some(7));
    }

    #[test]
    fn test_dispatch_missing_method() {
        let dispatch = MethodDispatch::for_class::<CounterStore>();
        let store = CounterStore::default();
        let mut data = ObjectData::new("counter");

        let err = dispatch
            .call(&store, "reset", &mut data, &[])
            .unwrap_err();
        match err {
            DataStoreError::MethodNotFound { class_name, method } => {
                assert_eq!(class_name, "CounterStore");
                assert_eq!(method, "reset");
            }
            other => panic!("Expected MethodNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_rejects_foreign_target() {
        let dispatch = MethodDispatch::for_class::<CounterStore>();
        let not_a_store = String::from("counter");
        let mut data = ObjectData::new("counter");

        let err = dispatch
            .call(&not_a_store, "increment", &mut data, &[])
            .unwrap_err();
        assert!(matches!(err, DataStoreError::Backend(_)));
    }
}
