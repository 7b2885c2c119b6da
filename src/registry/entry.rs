//! Registry entries: class identifiers or live instances.

use std::any::{Any, TypeId};
use std::sync::Arc;

use crate::store::{MethodDispatch, ObjectDataStore, StoreClass};

/// Value side of a registry entry.
///
/// A `Class` entry is constructed fresh for every resolution and owned by
/// the resulting resolver. An `Instance` entry is shared: every resolver it
/// is bound to holds a clone of the same `Arc`.
#[derive(Clone)]
pub enum StoreRef {
    /// Name of a store class registered in the catalog.
    Class(String),

    /// An already constructed value.
    Instance(LiveInstance),
}

impl StoreRef {
    /// Refer to a store class by name.
    pub fn class(name: impl Into<String>) -> Self {
        StoreRef::Class(name.into())
    }

    /// Wrap a constructed store.
    pub fn instance<S: StoreClass>(store: S) -> Self {
        StoreRef::Instance(LiveInstance::new(store))
    }

    /// Check if this entry names a class.
    pub fn is_class(&self) -> bool {
        matches!(self, StoreRef::Class(_))
    }

    /// Check if this entry holds a live instance.
    pub fn is_instance(&self) -> bool {
        matches!(self, StoreRef::Instance(_))
    }

    /// Class name or instance type name.
    pub fn name(&self) -> &str {
        match self {
            StoreRef::Class(name) => name,
            StoreRef::Instance(instance) => instance.type_name(),
        }
    }
}

impl From<&str> for StoreRef {
    fn from(name: &str) -> Self {
        StoreRef::class(name)
    }
}

impl From<String> for StoreRef {
    fn from(name: String) -> Self {
        StoreRef::Class(name)
    }
}

impl From<LiveInstance> for StoreRef {
    fn from(instance: LiveInstance) -> Self {
        StoreRef::Instance(instance)
    }
}

impl std::fmt::Debug for StoreRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreRef::Class(name) => f.debug_tuple("Class").field(name).finish(),
            StoreRef::Instance(instance) => f.debug_tuple("Instance").field(instance).finish(),
        }
    }
}

/// A store instance ready to receive forwarded calls.
#[derive(Clone)]
pub(crate) struct BoundStore {
    pub(crate) class_name: &'static str,
    pub(crate) store: Arc<dyn ObjectDataStore>,
    pub(crate) target: Arc<dyn Any + Send + Sync>,
    pub(crate) methods: Arc<MethodDispatch>,
}

impl BoundStore {
    pub(crate) fn bind<S: StoreClass>(store: Arc<S>, methods: Arc<MethodDispatch>) -> Self {
        Self {
            class_name: S::CLASS_NAME,
            store: store.clone(),
            target: store,
            methods,
        }
    }
}

/// A value supplied in place of a class identifier.
///
/// Built with [`LiveInstance::new`] from a store, the instance carries its
/// own binding. Built with [`LiveInstance::opaque`], it is only accepted at
/// resolution time if its concrete type is a registered store class.
///
/// # Example
///
/// ```
/// use dsk::registry::LiveInstance;
///
/// let instance = LiveInstance::opaque(String::from("not a store"));
/// assert!(!instance.is_bound());
/// assert!(instance.type_name().contains("String"));
/// ```
#[derive(Clone)]
pub struct LiveInstance {
    type_name: &'static str,
    type_id: TypeId,
    value: Arc<dyn Any + Send + Sync>,
    bound: Option<BoundStore>,
}

impl LiveInstance {
    /// Wrap a store.
    pub fn new<S: StoreClass>(store: S) -> Self {
        Self::from_arc(Arc::new(store))
    }

    /// Wrap a shared store.
    pub fn from_arc<S: StoreClass>(store: Arc<S>) -> Self {
        let bound = BoundStore::bind(store.clone(), Arc::new(MethodDispatch::for_class::<S>()));
        Self {
            type_name: S::CLASS_NAME,
            type_id: TypeId::of::<S>(),
            value: store,
            bound: Some(bound),
        }
    }

    /// Wrap an arbitrary value whose store-ness is checked on resolution.
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Self::opaque_arc(Arc::new(value))
    }

    /// Wrap an arbitrary shared value.
    pub fn opaque_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            value,
            bound: None,
        }
    }

    /// Concrete type name.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Concrete type id.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Whether the instance was built from a store and carries its binding.
    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// Whether both handles share the same value.
    pub fn ptr_eq(&self, other: &LiveInstance) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }

    pub(crate) fn value(&self) -> &Arc<dyn Any + Send + Sync> {
        &self.value
    }

    pub(crate) fn bound(&self) -> Option<&BoundStore> {
        self.bound.as_ref()
    }
}

impl std::fmt::Debug for LiveInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveInstance")
            .field("type_name", &self.type_name)
            .field("bound", &self.is_bound())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DeleteArgs, DsResult, ObjectData};

    struct EchoStore;

    impl ObjectDataStore for EchoStore {
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

    impl StoreClass for EchoStore {
        const CLASS_NAME: &'static str = "EchoStore";
    }

    #[test]
    fn test_store_ref_kinds() {
        let class = StoreRef::from("EchoStore");
        assert!(class.is_class());
        assert_eq!(class.name(), "EchoStore");

        let instance = StoreRef::instance(EchoStore);
        assert!(instance.is_instance());
        assert_eq!(instance.name(), "EchoStore");
    }

    #[test]
    fn test_live_instance_from_store_is_bound() {
        let instance = LiveInstance::new(EchoStore);
        assert!(instance.is_bound());
        assert_eq!(instance.type_id(), TypeId::of::<EchoStore>());
        assert_eq!(instance.bound().map(|b| b.class_name), Some("EchoStore"));
    }

    #[test]
    fn test_live_instance_clone_shares_value() {
        let instance = LiveInstance::new(EchoStore);
        let clone = instance.clone();
        assert!(instance.ptr_eq(&clone));

        let other = LiveInstance::new(EchoStore);
        assert!(!instance.ptr_eq(&other));
    }

    #[test]
    fn test_opaque_instance_is_unbound() {
        let instance = LiveInstance::opaque(42u32);
        assert!(!instance.is_bound());
        assert_eq!(instance.type_name(), "u32");
        assert_eq!(format!("{:?}", StoreRef::from(instance)), "Instance(LiveInstance { type_name: \"u32\", bound: false })");
    }
}
