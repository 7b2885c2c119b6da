//! In-memory tables shared by the built-in stores.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use crate::store::{DataStoreError, DsResult, ObjectData};

/// A stored row.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    /// Row id.
    pub id: u64,
    /// Stored properties.
    pub props: Map<String, Value>,
    /// Insert time.
    pub date_created: DateTime<Utc>,
    /// Last update time.
    pub date_modified: DateTime<Utc>,
}

impl StoredObject {
    fn write_into(&self, data: &mut ObjectData) {
        data.id = Some(self.id);
        data.props = self.props.clone();
        data.date_created = Some(self.date_created);
        data.date_modified = Some(self.date_modified);
    }
}

#[derive(Debug, Default)]
struct MemoryTable {
    last_id: u64,
    rows: BTreeMap<u64, StoredObject>,
}

/// Named tables of objects keyed by auto-increment id.
///
/// Cloning shares the tables, so every store constructed over the same
/// database sees the same rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<RwLock<HashMap<String, MemoryTable>>>,
}

impl MemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row, returning it with its new id.
    pub fn insert(&self, table: &str, props: Map<String, Value>) -> StoredObject {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let table = tables.entry(table.to_string()).or_default();
        table.last_id += 1;

        let now = Utc::now();
        let row = StoredObject {
            id: table.last_id,
            props,
            date_created: now,
            date_modified: now,
        };
        table.rows.insert(row.id, row.clone());
        row
    }

    /// Get a row.
    pub fn get(&self, table: &str, id: u64) -> Option<StoredObject> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables.get(table)?.rows.get(&id).cloned()
    }

    /// Replace the properties of a row, returning the updated row.
    pub fn update(&self, table: &str, id: u64, props: Map<String, Value>) -> Option<StoredObject> {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let row = tables.get_mut(table)?.rows.get_mut(&id)?;
        row.props = props;
        row.date_modified = Utc::now();
        Some(row.clone())
    }

    /// Remove a row.
    pub fn remove(&self, table: &str, id: u64) -> Option<StoredObject> {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        tables.get_mut(table)?.rows.remove(&id)
    }

    /// Number of rows in a table.
    pub fn count(&self, table: &str) -> usize {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables.get(table).map(|t| t.rows.len()).unwrap_or(0)
    }

    /// Ids of rows matching a predicate, ascending.
    pub fn find_ids<P>(&self, table: &str, predicate: P) -> Vec<u64>
    where
        P: Fn(&StoredObject) -> bool,
    {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables
            .get(table)
            .map(|t| t.rows.values().filter(|row| predicate(row)).map(|row| row.id).collect())
            .unwrap_or_default()
    }
}

/// CRUD over one table of a [`MemoryDatabase`].
#[derive(Debug, Clone)]
pub(crate) struct TableStore {
    db: MemoryDatabase,
    table: &'static str,
}

impl TableStore {
    pub(crate) fn new(db: MemoryDatabase, table: &'static str) -> Self {
        Self { db, table }
    }

    pub(crate) fn db(&self) -> &MemoryDatabase {
        &self.db
    }

    pub(crate) fn table(&self) -> &'static str {
        self.table
    }

    fn require_id(&self, data: &ObjectData, operation: &str) -> DsResult<u64> {
        data.id().ok_or_else(|| {
            DataStoreError::InvalidData(format!("{} {} requires an id", self.table, operation))
        })
    }

    pub(crate) fn stored(&self, data: &ObjectData, operation: &str) -> DsResult<StoredObject> {
        let id = self.require_id(data, operation)?;
        self.db
            .get(self.table, id)
            .ok_or_else(|| DataStoreError::not_found(self.table, id))
    }

    pub(crate) fn read(&self, data: &mut ObjectData) -> DsResult<()> {
        self.stored(data, "read")?.write_into(data);
        Ok(())
    }

    pub(crate) fn create(&self, data: &mut ObjectData) -> DsResult<()> {
        if let Some(id) = data.id() {
            return Err(DataStoreError::InvalidData(format!(
                "{} {} already exists",
                self.table, id
            )));
        }
        self.db.insert(self.table, data.props.clone()).write_into(data);
        Ok(())
    }

    pub(crate) fn update(&self, data: &mut ObjectData) -> DsResult<()> {
        let id = self.require_id(data, "update")?;
        let row = self
            .db
            .update(self.table, id, data.props.clone())
            .ok_or_else(|| DataStoreError::not_found(self.table, id))?;
        row.write_into(data);
        Ok(())
    }

    pub(crate) fn delete(&self, data: &mut ObjectData) -> DsResult<()> {
        let id = self.require_id(data, "delete")?;
        self.db
            .remove(self.table, id)
            .ok_or_else(|| DataStoreError::not_found(self.table, id))?;
        data.id = None;
        Ok(())
    }
}
