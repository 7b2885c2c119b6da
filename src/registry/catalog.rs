//! Catalog of constructible store classes.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use super::entry::{BoundStore, LiveInstance};
use super::{RegistryError, RegistryResult};
use crate::store::{MethodDispatch, StoreClass};

type Constructor = Box<dyn Fn() -> Arc<dyn Any + Send + Sync> + Send + Sync>;
type Binder = fn(Arc<dyn Any + Send + Sync>, Arc<MethodDispatch>) -> Option<BoundStore>;

/// Constructor, binder and dispatch table of one class.
pub(crate) struct ClassEntry {
    construct: Constructor,
    bind: Binder,
    methods: Arc<MethodDispatch>,
}

impl ClassEntry {
    /// Construct and bind a fresh instance.
    pub(crate) fn construct(&self) -> Option<BoundStore> {
        (self.bind)((self.construct)(), self.methods.clone())
    }

    /// Bind an existing value of this class.
    pub(crate) fn bind(&self, value: Arc<dyn Any + Send + Sync>) -> Option<BoundStore> {
        (self.bind)(value, self.methods.clone())
    }
}

fn bind_as<S: StoreClass>(
    value: Arc<dyn Any + Send + Sync>,
    methods: Arc<MethodDispatch>,
) -> Option<BoundStore> {
    let store = value.downcast::<S>().ok()?;
    Some(BoundStore::bind(store, methods))
}

/// Store classes known by name, each with a constructor and method table.
///
/// A class identifier in the registry is only valid if it names an entry
/// here. Opaque live instances are validated against the catalog's types.
#[derive(Default)]
pub struct StoreCatalog {
    classes: HashMap<&'static str, Arc<ClassEntry>>,
    by_type: HashMap<TypeId, &'static str>,
}

impl StoreCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class constructed with `Default`.
    pub fn register<S: StoreClass + Default>(&mut self) -> RegistryResult<()> {
        self.register_with(S::default)
    }

    /// Register a class with a custom constructor.
    ///
    /// The constructor runs once per resolution of an entry naming this class.
    pub fn register_with<S, F>(&mut self, constructor: F) -> RegistryResult<()>
    where
        S: StoreClass,
        F: Fn() -> S + Send + Sync + 'static,
    {
        let name = S::CLASS_NAME;
        super::registry::validate_name(name)?;

        if self.classes.contains_key(name) {
            return Err(RegistryError::DuplicateClass(name.to_string()));
        }

        let entry = ClassEntry {
            construct: Box::new(move || Arc::new(constructor()) as Arc<dyn Any + Send + Sync>),
            bind: bind_as::<S>,
            methods: Arc::new(MethodDispatch::for_class::<S>()),
        };

        self.classes.insert(name, Arc::new(entry));
        self.by_type.insert(TypeId::of::<S>(), name);
        Ok(())
    }

    /// Remove a class. Returns true if it was registered.
    pub fn remove(&mut self, class_name: &str) -> bool {
        match self.classes.remove_entry(class_name) {
            Some((name, _)) => {
                self.by_type.retain(|_, n| *n != name);
                true
            }
            None => false,
        }
    }

    /// Check if a class is registered.
    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    /// Check if a concrete type is registered as a class.
    pub fn contains_type(&self, type_id: TypeId) -> bool {
        self.by_type.contains_key(&type_id)
    }

    /// Sorted class names.
    pub fn class_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.classes.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Extra method names declared by a class.
    pub fn method_names(&self, class_name: &str) -> Option<Vec<&'static str>> {
        self.classes.get(class_name).map(|entry| entry.methods.names())
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Entry of a class, shared so its constructor can run without holding
    /// the catalog.
    pub(crate) fn class_entry(&self, class_name: &str) -> Option<Arc<ClassEntry>> {
        self.classes.get(class_name).cloned()
    }

    /// Entry of the class whose concrete type is `type_id`.
    pub(crate) fn entry_for_type(&self, type_id: TypeId) -> Option<Arc<ClassEntry>> {
        let name = self.by_type.get(&type_id)?;
        self.class_entry(name)
    }

    /// Bind a live instance, sharing its value.
    pub(crate) fn bind_instance(&self, instance: &LiveInstance) -> Option<BoundStore> {
        if let Some(bound) = instance.bound() {
            return Some(bound.clone());
        }
        self.entry_for_type(instance.type_id())?
            .bind(instance.value().clone())
    }
}

impl std::fmt::Debug for StoreCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreCatalog")
            .field("classes", &self.class_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DeleteArgs, DsResult, MethodTable, ObjectData, ObjectDataStore};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct PlainStore;

    impl ObjectDataStore for PlainStore {
        fn read(&self, _data: &mut ObjectData) -> DsResult<()> {
            Ok(())
        }

        fn create(&self, data: &mut ObjectData) -> DsResult<()> {
            data.set_id(1);
            Ok(())
        }

        fn update(&self, _data: &mut ObjectData) -> DsResult<()> {
            Ok(())
        }

        fn delete(&self, _data: &mut ObjectData, _args: &DeleteArgs) -> DsResult<()> {
            Ok(())
        }
    }

    impl StoreClass for PlainStore {
        const CLASS_NAME: &'static str = "PlainStore";

        fn methods() -> MethodTable<Self> {
            MethodTable::new().with("ping", |_, _, _| Ok(json!("pong")))
        }
    }

    #[test]
    fn test_register_and_construct() {
        let mut catalog = StoreCatalog::new();
        catalog.register::<PlainStore>().unwrap();

        assert!(catalog.contains("PlainStore"));
        assert!(catalog.contains_type(TypeId::of::<PlainStore>()));
        assert_eq!(catalog.method_names("PlainStore"), Some(vec!["ping"]));

        let bound = catalog.class_entry("PlainStore").unwrap().construct().unwrap();
        assert_eq!(bound.class_name, "PlainStore");

        let mut data = ObjectData::new("plain");
        bound.store.create(&mut data).unwrap();
        assert_eq!(data.id(), Some(1));
    }

    #[test]
    fn test_construct_unknown_class() {
        let catalog = StoreCatalog::new();
        assert!(catalog.class_entry("Missing").is_none());
    }

    #[test]
    fn test_duplicate_class() {
        let mut catalog = StoreCatalog::new();
        catalog.register::<PlainStore>().unwrap();

        let err = catalog.register::<PlainStore>().unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateClass(name) if name == "PlainStore"));
    }

    #[test]
    fn test_constructor_runs_per_construction() {
        static BUILT: AtomicUsize = AtomicUsize::new(0);

        let mut catalog = StoreCatalog::new();
        catalog
            .register_with(|| {
                BUILT.fetch_add(1, Ordering::SeqCst);
                PlainStore
            })
            .unwrap();
        assert_eq!(BUILT.load(Ordering::SeqCst), 0);

        let first = catalog.class_entry("PlainStore").unwrap().construct().unwrap();
        let second = catalog.class_entry("PlainStore").unwrap().construct().unwrap();
        assert_eq!(BUILT.load(Ordering::SeqCst), 2);
        assert!(!Arc::ptr_eq(&first.target, &second.target));
    }

    #[test]
    fn test_bind_opaque_instance_of_registered_type() {
        let mut catalog = StoreCatalog::new();
        catalog.register::<PlainStore>().unwrap();

        let instance = LiveInstance::opaque(PlainStore);
        let bound = catalog.bind_instance(&instance).unwrap();
        assert_eq!(bound.class_name, "PlainStore");
        assert!(Arc::ptr_eq(&bound.target, instance.value()));
    }

    #[test]
    fn test_class_entry_survives_removal() {
        let mut catalog = StoreCatalog::new();
        catalog.register::<PlainStore>().unwrap();

        let entry = catalog.class_entry("PlainStore").unwrap();
        assert!(catalog.remove("PlainStore"));

        let bound = entry.construct().unwrap();
        assert_eq!(bound.class_name, "PlainStore");
        assert!(catalog.entry_for_type(TypeId::of::<PlainStore>()).is_none());
    }

    #[test]
    fn test_bind_opaque_instance_of_unknown_type() {
        let catalog = StoreCatalog::new();
        let instance = LiveInstance::opaque(String::from("nope"));
        assert!(catalog.bind_instance(&instance).is_none());
    }

    #[test]
    fn test_bind_store_instance_without_registration() {
        let catalog = StoreCatalog::new();
        let instance = LiveInstance::new(PlainStore);
        assert!(catalog.bind_instance(&instance).is_some());
    }

    #[test]
    fn test_remove() {
        let mut catalog = StoreCatalog::new();
        catalog.register::<PlainStore>().unwrap();

        assert!(catalog.remove("PlainStore"));
        assert!(!catalog.remove("PlainStore"));
        assert!(catalog.is_empty());
        assert!(!catalog.contains_type(TypeId::of::<PlainStore>()));
    }
}
