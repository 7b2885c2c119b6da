//! Store Registry Module
//!
//! Maps object types to data stores. Each entry is either the name of a
//! store class registered in the [`StoreCatalog`] or a [`LiveInstance`].
//! The [`Hooks`] let external code rewrite the mapping, or the entry of a
//! single type, every time a resolver is built.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dsk::registry::{RegistryConfig, StoreRef, StoreRegistry};
//!
//! // Registry with the configured default mapping
//! let registry = StoreRegistry::init(&RegistryConfig::default())?;
//!
//! // Add a store class and map an object type to it
//! registry.register_class::<ProductDataStore>()?;
//! registry.register("product", StoreRef::class("ProductDataStore"))?;
//!
//! // Swap the store used for one type without touching the mapping
//! registry.override_type("product", |_| StoreRef::class("CachedProductDataStore"));
//! ```

mod catalog;
mod config;
mod entry;
mod error;
mod hooks;
mod registry;

pub use catalog::StoreCatalog;
pub use config::{RegistryConfig, DEFAULT_NAMESPACE, DEFAULT_SEPARATOR, DEFAULT_STORES};
pub(crate) use entry::BoundStore;
pub use entry::{LiveInstance, StoreRef};
pub use error::{RegistryError, RegistryResult};
pub use hooks::{Filter, Hooks, DEFAULT_PRIORITY};
pub use registry::{StoreMap, StoreRegistry};
