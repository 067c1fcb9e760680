use redb::{Database, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

// One flat key-value table; every preference object is a JSON blob under a
// well-known key. No schema versioning, no migrations.
const PREFERENCES_TABLE: TableDefinition<&str, Vec<u8>> = TableDefinition::new("preferences");

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Redb error: {0}")]
    Redb(#[from] redb::Error),
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),
    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = Database::create(path)?;
        info!("📦 Preference database opened");
        Ok(Self { db: Arc::new(db) })
    }

    pub fn put_json(&self, key: &str, value: &serde_json::Value) -> Result<(), StoreError> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(PREFERENCES_TABLE)?;
            let data = serde_json::to_vec(value)?;
            table.insert(key, data)?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn get_json(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(PREFERENCES_TABLE) {
            Ok(table) => table,
            // Nothing has ever been written.
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut result = None;
        if let Some(v) = table.get(key)? {
            let value: serde_json::Value = serde_json::from_slice(&v.value())?;
            result = Some(value);
        }
        Ok(result)
    }
}
