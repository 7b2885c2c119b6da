//! Data Store Kit (DSK) - Pluggable persistence backends per object type
//!
//! DSK maps object types to data store backends and hands out a resolver
//! handle that forwards operations to the backend it picked:
//!
//! - **`store`** - Object data, the capability contract and store classes
//! - **`registry`** - Type-to-store mapping, store class catalog and hooks
//! - **`resolver`** - Resolution, validation, forwarding and snapshots
//! - **`stores`** - In-memory reference backends
//! - **`config`** - Configuration and environment loading
//!
//! # Features
//!
//! Enable the features you need in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! dsk = { version = "0.1", default-features = false }
//! # Or enable everything:
//! dsk = { version = "0.1", features = ["all"] }
//! ```
//!
//! # Example: Resolving a store
//!
//! ```ignore
//! use dsk::prelude::*;
//!
//! let registry = StoreRegistry::init(&RegistryConfig::default())?;
//!
//! // "bookmark-archived" has no entry of its own and falls back to "bookmark"
//! let store = DataStore::load(&registry, "bookmark-archived")?;
//! assert_eq!(store.get_current_class_name(), "BookmarkDataStore");
//!
//! let mut bookmark = ObjectData::new("bookmark");
//! store.create(&mut bookmark)?;
//! let total = store.call("count", &mut bookmark, &[])?;
//! ```
//!
//! # Example: Swapping a backend
//!
//! ```ignore
//! use dsk::prelude::*;
//!
//! registry.register_class::<CachedBookmarkStore>()?;
//! registry.override_type("bookmark", |_| StoreRef::class("CachedBookmarkStore"));
//! ```

#![warn(missing_docs)]

/// Object data and the data store contract
pub mod store;

/// Store registry and extension hooks
pub mod registry;

/// Data store resolution and operation forwarding
pub mod resolver;

/// In-memory reference stores (enabled with the `memory-stores` feature)
#[cfg(feature = "memory-stores")]
pub mod stores;

/// Configuration management (enabled with the `config` feature)
#[cfg(feature = "config")]
pub mod config;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::store::{
        DataStoreError, DeleteArgs, DsResult, MethodTable, ObjectData, ObjectDataStore,
        StoreClass,
    };

    pub use crate::registry::{
        LiveInstance, RegistryConfig, RegistryError, RegistryResult, StoreRef, StoreRegistry,
    };

    pub use crate::resolver::{DataStore, DataStoreSnapshot, RestoreSeed};

    #[cfg(feature = "memory-stores")]
    pub use crate::stores::{BookmarkDataStore, BookmarkListDataStore, MemoryDatabase};

    #[cfg(feature = "config")]
    pub use crate::config::{ConfigurationLoader, EnvironmentLoader};
}
