//! Built-in Stores
//!
//! In-memory store classes backing the default `bookmark` and
//! `bookmark_list` object types. They are useful for tests and as a
//! reference for writing real backends.

mod bookmark;
mod bookmark_list;
mod memory;

pub use bookmark::{BookmarkDataStore, BOOKMARK_TABLE};
pub use bookmark_list::{BookmarkListDataStore, BOOKMARK_LIST_TABLE, ITEMS_PROP};
pub use memory::{MemoryDatabase, StoredObject};

use tracing::debug;

use crate::registry::{RegistryResult, StoreRegistry};

/// Register the built-in store classes with `registry`.
///
/// Both classes construct their stores over one shared database, which is
/// returned so callers can inspect or seed it.
pub fn register_builtin(registry: &StoreRegistry) -> RegistryResult<MemoryDatabase> {
    register_builtin_with(registry, MemoryDatabase::new())
}

/// Register the built-in store classes over an existing database.
pub fn register_builtin_with(
    registry: &StoreRegistry,
    db: MemoryDatabase,
) -> RegistryResult<MemoryDatabase> {
    let bookmarks = db.clone();
    registry.register_class_with(move || BookmarkDataStore::new(bookmarks.clone()))?;

    let lists = db.clone();
    registry.register_class_with(move || BookmarkListDataStore::new(lists.clone()))?;

    debug!(namespace = %registry.namespace(), "Registered built-in store classes");
    Ok(db)
}
