//! Data Store Resolver
//!
//! Turns an object type into a validated, bound [`DataStore`] and forwards
//! operations to it.
//!
//! ```text
//! DataStore::load(registry, "product-variable")
//!     │
//!     ├─ "<namespace>_data_stores" filters  → effective mapping
//!     ├─ lookup "product-variable", else "product"
//!     ├─ "<namespace>_product_data_store" filters
//!     ├─ Class(name)      → construct from catalog (owned)
//!     └─ Instance(value)  → validate and share
//! ```
//!
//! A handle serializes to its object type only; see [`RestoreSeed`] for
//! rebuilding one against a registry.

mod data_store;
mod snapshot;

pub use data_store::DataStore;
pub use snapshot::{DataStoreSnapshot, RestoreSeed};
