//! Sled-backed record store.

use super::{validate_path, PhotoRecord, RecordStore, StatusUpdate, StatusUpdateReport};
use crate::error::StorageError;
use sled::transaction::{ConflictableTransactionError, TransactionError};
use std::path::Path;
use tracing::debug;

/// Default tree name inside the sled database
pub const DEFAULT_TABLE: &str = "photos";

/// Records keyed by path bytes, values bincode-encoded
pub struct SledRecordStore {
    db: sled::Db,
    tree: sled::Tree,
}

impl SledRecordStore {
    /// Open (or create) the store at `path` using `table` as the sled tree
    pub fn open(path: &Path, table: &str) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = sled::open(path).map_err(|e| {
            StorageError::Unavailable(format!("failed to open {}: {}", path.display(), e))
        })?;
        let tree = db.open_tree(table)?;
        debug!(path = %path.display(), table, "Opened record store");
        Ok(Self { db, tree })
    }

    /// Throwaway store that is removed when dropped
    pub fn temporary() -> Result<Self, StorageError> {
        let db = sled::Config::new().temporary(true).open()?;
        let tree = db.open_tree(DEFAULT_TABLE)?;
        Ok(Self { db, tree })
    }
}

fn encode(record: &PhotoRecord) -> Result<Vec<u8>, StorageError> {
    bincode::serialize(record).map_err(|e| StorageError::Corrupt {
        path: record.path.clone(),
        reason: e.to_string(),
    })
}

fn decode(path: &str, bytes: &[u8]) -> Result<PhotoRecord, StorageError> {
    bincode::deserialize(bytes).map_err(|e| StorageError::Corrupt {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

impl RecordStore for SledRecordStore {
    fn list_all(&self) -> Result<Vec<PhotoRecord>, StorageError> {
        let mut records = Vec::with_capacity(self.tree.len());
        for item in self.tree.iter() {
            let (key, value) = item?;
            let path = String::from_utf8_lossy(&key);
            records.push(decode(&path, &value)?);
        }
        Ok(records)
    }

    fn get(&self, path: &str) -> Result<Option<PhotoRecord>, StorageError> {
        match self.tree.get(path.as_bytes())? {
            Some(bytes) => Ok(Some(decode(path, &bytes)?)),
            None => Ok(None),
        }
    }

    fn upsert(&self, record: &PhotoRecord) -> Result<(), StorageError> {
        validate_path(&record.path)?;
        self.tree.insert(record.path.as_bytes(), encode(record)?)?;
        Ok(())
    }

    fn apply_status_updates(
        &self,
        updates: &[StatusUpdate],
    ) -> Result<StatusUpdateReport, StorageError> {
        for update in updates {
            validate_path(&update.path)?;
        }

        let result = self.tree.transaction(|tx| {
            let mut report = StatusUpdateReport::default();
            for update in updates {
                let record = match tx.get(update.path.as_bytes())? {
                    Some(bytes) => {
                        let mut record = decode(&update.path, &bytes)
                            .map_err(ConflictableTransactionError::Abort)?;
                        record.status = Some(update.status.clone());
                        report.updated += 1;
                        record
                    }
                    None => {
                        report.inserted += 1;
                        PhotoRecord::new(update.path.clone()).with_status(update.status.clone())
                    }
                };
                let bytes = encode(&record).map_err(ConflictableTransactionError::Abort)?;
                tx.insert(update.path.as_bytes(), bytes)?;
                report.saved.push(update.clone());
            }
            Ok::<_, ConflictableTransactionError<StorageError>>(report)
        });

        match result {
            Ok(report) => {
                self.tree.flush()?;
                Ok(report)
            }
            Err(TransactionError::Abort(err)) => Err(err),
            Err(TransactionError::Storage(err)) => Err(err.into()),
        }
    }

    fn len(&self) -> Result<usize, StorageError> {
        Ok(self.tree.len())
    }

    fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }
}
