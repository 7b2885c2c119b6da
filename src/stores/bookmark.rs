//! Bookmark store.

use serde_json::{json, Value};

use super::memory::{MemoryDatabase, TableStore};
use crate::store::{
    DataStoreError, DeleteArgs, DsResult, MethodTable, ObjectData, ObjectDataStore, StoreClass,
};

/// Table holding bookmarks.
pub const BOOKMARK_TABLE: &str = "bookmark";

/// Stores bookmarks in a [`MemoryDatabase`].
///
/// Bookmarks carry a `user_id` prop used by `find_by_user`.
#[derive(Debug, Clone)]
pub struct BookmarkDataStore {
    table: TableStore,
}

impl BookmarkDataStore {
    /// Store over the bookmark table of `db`.
    pub fn new(db: MemoryDatabase) -> Self {
        Self {
            table: TableStore::new(db, BOOKMARK_TABLE),
        }
    }

    /// Number of stored bookmarks.
    pub fn count(&self) -> usize {
        self.table.db().count(self.table.table())
    }

    /// Ids of the bookmarks owned by `user_id`.
    pub fn find_by_user(&self, user_id: u64) -> Vec<u64> {
        self.table.db().find_ids(self.table.table(), |row| {
            row.props.get("user_id").and_then(Value::as_u64) == Some(user_id)
        })
    }
}

impl Default for BookmarkDataStore {
    fn default() -> Self {
        Self::new(MemoryDatabase::new())
    }
}

impl ObjectDataStore for BookmarkDataStore {
    fn read(&self, data: &mut ObjectData) -> DsResult<()> {
        self.table.read(data)
    }

    fn create(&self, data: &mut ObjectData) -> DsResult<()> {
        self.table.create(data)
    }

    fn update(&self, data: &mut ObjectData) -> DsResult<()> {
        self.table.update(data)
    }

    fn delete(&self, data: &mut ObjectData, _args: &DeleteArgs) -> DsResult<()> {
        self.table.delete(data)
    }
}

impl StoreClass for BookmarkDataStore {
    const CLASS_NAME: &'static str = "BookmarkDataStore";

    fn methods() -> MethodTable<Self> {
        MethodTable::new()
            .with("count", count)
            .with("find_by_user", find_by_user)
    }
}

fn count(store: &BookmarkDataStore, _data: &mut ObjectData, _args: &[Value]) -> DsResult<Value> {
    Ok(json!(store.count()))
}

fn find_by_user(
    store: &BookmarkDataStore,
    _data: &mut ObjectData,
    args: &[Value],
) -> DsResult<Value> {
    let user_id = args
        .first()
        .and_then(Value::as_u64)
        .ok_or_else(|| DataStoreError::invalid_arguments("find_by_user", "expected a user id"))?;
    Ok(json!(store.find_by_user(user_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MethodDispatch;

    fn bookmark(user_id: u64, url: &str) -> ObjectData {
        let mut data = ObjectData::new("bookmark");
        data.set_prop("user_id", json!(user_id));
        data.set_prop("url", json!(url));
        data
    }

    #[test]
    fn test_create_and_read() {
        let store = BookmarkDataStore::default();
        let mut data = bookmark(7, "https://example.com");
        store.create(&mut data).unwrap();

        let mut loaded = ObjectData::with_id("bookmark", data.id().unwrap());
        store.read(&mut loaded).unwrap();
        assert_eq!(loaded.prop_str("url"), Some("https://example.com"));
        assert_eq!(loaded.prop_u64("user_id"), Some(7));
    }

    #[test]
    fn test_update_bumps_modified_date() {
        let store = BookmarkDataStore::default();
        let mut data = bookmark(7, "https://example.com");
        store.create(&mut data).unwrap();
        let created = data.date_modified.unwrap();

        data.set_prop("title", json!("Example"));
        store.update(&mut data).unwrap();
        assert!(data.date_modified.unwrap() >= created);
        assert_eq!(data.date_created.unwrap(), created);
    }

    #[test]
    fn test_delete_clears_id() {
        let store = BookmarkDataStore::default();
        let mut data = bookmark(7, "https://example.com");
        store.create(&mut data).unwrap();

        store.delete(&mut data, &DeleteArgs::default()).unwrap();
        assert!(data.id().is_none());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_find_by_user() {
        let store = BookmarkDataStore::default();
        for (user, url) in [(1, "a"), (2, "b"), (1, "c")] {
            store.create(&mut bookmark(user, url)).unwrap();
        }

        assert_eq!(store.find_by_user(1), vec![1, 3]);
        assert!(store.find_by_user(9).is_empty());
    }

    #[test]
    fn test_extra_methods() {
        let store = BookmarkDataStore::default();
        store.create(&mut bookmark(1, "a")).unwrap();
        let dispatch = MethodDispatch::for_class::<BookmarkDataStore>();
        let mut data = ObjectData::new("bookmark");

        assert_eq!(dispatch.names(), vec!["count", "find_by_user"]);
        assert_eq!(dispatch.call(&store, "count", &mut data, &[]).unwrap(), json!(1));
        assert_eq!(
            dispatch.call(&store, "find_by_user", &mut data, &[json!(1)]).unwrap(),
            json!([1])
        );

        let err = dispatch.call(&store, "find_by_user", &mut data, &[]).unwrap_err();
        assert!(matches!(err, DataStoreError::InvalidArguments { .. }));
    }
}
