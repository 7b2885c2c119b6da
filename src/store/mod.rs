//! Data Store Contract
//!
//! This module defines what a data store is: the [`ObjectDataStore`]
//! capability contract (read, create, update, delete), the [`ObjectData`]
//! every operation works on, the [`StoreClass`] trait that makes a store
//! type registrable, and the error taxonomy shared by resolution and stores.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │      DataStore      │
//! │  (resolver handle)  │
//! └──────────┬──────────┘
//!            │
//! ┌──────────▼──────────┐      ┌────────────────┐
//! │   ObjectDataStore   │ ◄─── │ MethodDispatch │  extra methods
//! │       (trait)       │      └────────────────┘
//! └──────────┬──────────┘
//!            │
//!     ┌──────┴──────┐
//!     │             │
//! ┌───▼────┐   ┌────▼─────┐
//! │Bookmark│   │ Bookmark │
//! │ Store  │   │List Store│
//! └────────┘   └──────────┘
//! ```

mod data;
mod error;
mod methods;
mod traits;

pub use data::ObjectData;
pub use error::{DataStoreError, DsResult, InvalidReason};
pub use methods::{MethodDispatch, MethodTable, StoreMethod};
pub use traits::{DeleteArgs, ObjectDataStore, StoreClass};
