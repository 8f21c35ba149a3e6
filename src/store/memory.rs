//! In-memory record store preserving insertion order.

use super::{validate_path, PhotoRecord, RecordStore, StatusUpdate, StatusUpdateReport};
use crate::error::StorageError;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Default)]
struct Records {
    rows: Vec<PhotoRecord>,
    index: HashMap<String, usize>,
}

impl Records {
    fn upsert(&mut self, record: PhotoRecord) -> bool {
        match self.index.get(&record.path) {
            Some(&i) => {
                self.rows[i] = record;
                false
            }
            None => {
                self.index.insert(record.path.clone(), self.rows.len());
                self.rows.push(record);
                true
            }
        }
    }
}

/// Record store held entirely in memory
#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<Records>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with `records`; later duplicates replace earlier ones
    pub fn with_records<I: IntoIterator<Item = PhotoRecord>>(records: I) -> Self {
        let store = Self::new();
        {
            let mut guard = store.records.write();
            for record in records {
                guard.upsert(record);
            }
        }
        store
    }
}

impl RecordStore for MemoryRecordStore {
    fn list_all(&self) -> Result<Vec<PhotoRecord>, StorageError> {
        Ok(self.records.read().rows.clone())
    }

    fn get(&self, path: &str) -> Result<Option<PhotoRecord>, StorageError> {
        let records = self.records.read();
        Ok(records.index.get(path).map(|&i| records.rows[i].clone()))
    }

    fn upsert(&self, record: &PhotoRecord) -> Result<(), StorageError> {
        validate_path(&record.path)?;
        self.records.write().upsert(record.clone());
        Ok(())
    }

    fn apply_status_updates(
        &self,
        updates: &[StatusUpdate],
    ) -> Result<StatusUpdateReport, StorageError> {
        for update in updates {
            validate_path(&update.path)?;
        }

        let mut records = self.records.write();
        let mut report = StatusUpdateReport::default();
        for update in updates {
            let record = match records.index.get(&update.path) {
                Some(&i) => {
                    let mut record = records.rows[i].clone();
                    record.status = Some(update.status.clone());
                    record
                }
                None => PhotoRecord::new(update.path.clone()).with_status(update.status.clone()),
            };
            if records.upsert(record) {
                report.inserted += 1;
            } else {
                report.updated += 1;
            }
            report.saved.push(update.clone());
        }
        Ok(report)
    }

    fn len(&self) -> Result<usize, StorageError> {
        Ok(self.records.read().rows.len())
    }
}
