//! Bookmark list store.
//!
//! A list keeps the ids of its bookmarks in the `items` prop. Adding a
//! bookmark checks that it exists in the bookmark table of the same
//! database, so both stores must share one [`MemoryDatabase`].

use serde_json::{json, Value};

use super::bookmark::BOOKMARK_TABLE;
use super::memory::{MemoryDatabase, TableStore};
use crate::store::{
    DataStoreError, DeleteArgs, DsResult, MethodTable, ObjectData, ObjectDataStore, StoreClass,
};

/// Table holding bookmark lists.
pub const BOOKMARK_LIST_TABLE: &str = "bookmark_list";

/// Prop holding the bookmark ids of a list.
pub const ITEMS_PROP: &str = "items";

/// Stores bookmark lists in a [`MemoryDatabase`].
#[derive(Debug, Clone)]
pub struct BookmarkListDataStore {
    table: TableStore,
}

impl BookmarkListDataStore {
    /// Store over the bookmark list table of `db`.
    pub fn new(db: MemoryDatabase) -> Self {
        Self {
            table: TableStore::new(db, BOOKMARK_LIST_TABLE),
        }
    }

    /// Number of stored lists.
    pub fn count(&self) -> usize {
        self.table.db().count(self.table.table())
    }

    /// Add a bookmark to the list in `data`.
    ///
    /// Persists the change when the list has already been created.
    /// Returns the resulting items.
    pub fn add_bookmark(&self, data: &mut ObjectData, bookmark_id: u64) -> DsResult<Vec<u64>> {
        if self.table.db().get(BOOKMARK_TABLE, bookmark_id).is_none() {
            return Err(DataStoreError::not_found(BOOKMARK_TABLE, bookmark_id));
        }

        let mut items = items(data);
        if !items.contains(&bookmark_id) {
            items.push(bookmark_id);
        }
        self.store_items(data, items)
    }

    /// Remove a bookmark from the list in `data`.
    pub fn remove_bookmark(&self, data: &mut ObjectData, bookmark_id: u64) -> DsResult<Vec<u64>> {
        let mut items = items(data);
        items.retain(|id| *id != bookmark_id);
        self.store_items(data, items)
    }

    fn store_items(&self, data: &mut ObjectData, items: Vec<u64>) -> DsResult<Vec<u64>> {
        data.set_prop(ITEMS_PROP, json!(items));
        if data.id().is_some() {
            self.table.update(data)?;
        }
        Ok(items)
    }
}

impl Default for BookmarkListDataStore {
    fn default() -> Self {
        Self::new(MemoryDatabase::new())
    }
}

fn items(data: &ObjectData) -> Vec<u64> {
    data.prop(ITEMS_PROP)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_u64).collect())
        .unwrap_or_default()
}

impl ObjectDataStore for BookmarkListDataStore {
    fn read(&self, data: &mut ObjectData) -> DsResult<()> {
        self.table.read(data)
    }

    fn create(&self, data: &mut ObjectData) -> DsResult<()> {
        self.table.create(data)
    }

    fn update(&self, data: &mut ObjectData) -> DsResult<()> {
        self.table.update(data)
    }

    fn delete(&self, data: &mut ObjectData, args: &DeleteArgs) -> DsResult<()> {
        if !args.force {
            let stored = self.table.stored(data, "delete")?;
            let has_items = stored
                .props
                .get(ITEMS_PROP)
                .and_then(Value::as_array)
                .is_some_and(|items| !items.is_empty());
            if has_items {
                return Err(DataStoreError::invalid_arguments(
                    "delete",
                    "bookmark list is not empty; pass force to delete it",
                ));
            }
        }
        self.table.delete(data)
    }
}

impl StoreClass for BookmarkListDataStore {
    const CLASS_NAME: &'static str = "BookmarkListDataStore";

    fn methods() -> MethodTable<Self> {
        MethodTable::new()
            .with("count", count)
            .with("add_bookmark", add_bookmark)
            .with("remove_bookmark", remove_bookmark)
    }
}

fn bookmark_id_arg(method: &str, args: &[Value]) -> DsResult<u64> {
    args.first()
        .and_then(Value::as_u64)
        .ok_or_else(|| DataStoreError::invalid_arguments(method, "expected a bookmark id"))
}

fn count(
    store: &BookmarkListDataStore,
    _data: &mut ObjectData,
    _args: &[Value],
) -> DsResult<Value> {
    Ok(json!(store.count()))
}

fn add_bookmark(
    store: &BookmarkListDataStore,
    data: &mut ObjectData,
    args: &[Value],
) -> DsResult<Value> {
    let bookmark_id = bookmark_id_arg("add_bookmark", args)?;
    Ok(json!(store.add_bookmark(data, bookmark_id)?))
}

fn remove_bookmark(
    store: &BookmarkListDataStore,
    data: &mut ObjectData,
    args: &[Value],
) -> DsResult<Value> {
    let bookmark_id = bookmark_id_arg("remove_bookmark", args)?;
    Ok(json!(store.remove_bookmark(data, bookmark_id)?))
}
