//! Record store
//!
//! Holds every activity record, most recent first, and writes the whole
//! collection back to local storage after each mutation.

use chrono::TimeZone;
use tracing::{info, instrument, warn};

use super::LocalStorage;
use crate::archive::{group_by_date, DateGroup};
use crate::error::{Error, Result};
use crate::models::ActivityRecord;

pub const RECORDS_KEY: &str = "edulog_records";

/// Key holding a stored collection that could not be parsed at load time
pub const CORRUPT_RECORDS_KEY: &str = "edulog_records.corrupt";

pub struct RecordStore<S: LocalStorage> {
    storage: S,
    records: Vec<ActivityRecord>,
}

impl<S: LocalStorage> RecordStore<S> {
    /// Load the stored collection.
    ///
    /// An unparseable payload is moved to [`CORRUPT_RECORDS_KEY`] and the
    /// store starts empty.
    #[instrument(skip_all)]
    pub fn load(storage: S) -> Result<Self> {
        let records = match storage.get_item(RECORDS_KEY)? {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<ActivityRecord>>(&raw) {
                Ok(records) => records,
                Err(e) => {
                    warn!(error = %e, "Stored records unreadable, starting empty");
                    storage.set_item(CORRUPT_RECORDS_KEY, &raw)?;
                    storage.remove_item(RECORDS_KEY)?;
                    Vec::new()
                }
            },
        };

        info!(count = records.len(), "Loaded records");
        Ok(Self { storage, records })
    }

    /// All records, most recent first
    pub fn list(&self) -> &[ActivityRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&ActivityRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Prepend a record and persist. Content is trimmed and must not be empty.
    #[instrument(skip_all, fields(record_id = %record.id))]
    pub fn add(&mut self, mut record: ActivityRecord) -> Result<()> {
        record.content = non_empty(&record.content)?;

        let mut next = Vec::with_capacity(self.records.len() + 1);
        next.push(record);
        next.extend(self.records.iter().cloned());
        self.commit(next)
    }

    /// Replace a record's content in place.
    ///
    /// Returns `false` without touching storage when no record has `id`.
    #[instrument(skip(self, content))]
    pub fn update(&mut self, id: &str, content: &str) -> Result<bool> {
        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            return Ok(false);
        };
        let content = non_empty(content)?;

        let mut next = self.records.clone();
        next[index].content = content;
        self.commit(next)?;
        Ok(true)
    }

    /// Records partitioned by calendar day in `tz`, newest day first
    pub fn grouped<Tz: TimeZone>(&self, tz: &Tz) -> Vec<DateGroup> {
        group_by_date(&self.records, tz)
    }

    /// Persist `next`, then swap it in so a failed write leaves memory unchanged
    fn commit(&mut self, next: Vec<ActivityRecord>) -> Result<()> {
        let json = serde_json::to_string(&next)?;
        self.storage.set_item(RECORDS_KEY, &json)?;
        self.records = next;
        Ok(())
    }
}

fn non_empty(content: &str) -> Result<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidOperation("record content is empty".into()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Student, StudentNumber};
    use crate::storage::{Database, MemoryStorage};

    fn student(n: i64) -> Student {
        Student {
            id: format!("1A_{}", n),
            number: StudentNumber::Int(n),
            name: format!("Student {}", n),
        }
    }

    fn record(n: i64, content: &str) -> ActivityRecord {
        ActivityRecord::new(&student(n), "1A".into(), "1학년 A반".into(), content.into())
    }

    #[test]
    fn test_add_prepends_and_persists() {
        let storage = MemoryStorage::new();
        let mut store = RecordStore::load(&storage).unwrap();

        store.add(record(1, "first")).unwrap();
        store.add(record(2, "second")).unwrap();

        let contents: Vec<_> = store.list().iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["second", "first"]);
        assert_eq!(storage.write_count(), 2);
    }

    #[test]
    fn test_add_trims_and_rejects_empty() {
        let storage = MemoryStorage::new();
        let mut store = RecordStore::load(&storage).unwrap();

        store.add(record(1, "  padded  ")).unwrap();
        assert_eq!(store.list()[0].content, "padded");

        let err = store.add(record(1, "   \n")).unwrap_err();
        assert!(matches!(err, Error::InvalidOperation(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_in_place() {
        let storage = MemoryStorage::new();
        let mut store = RecordStore::load(&storage).unwrap();
        let first = record(1, "draft");
        let id = first.id.clone();
        store.add(first).unwrap();
        store.add(record(2, "other")).unwrap();

        assert!(store.update(&id, "final").unwrap());
        assert_eq!(store.get(&id).unwrap().content, "final");
        // Position is unchanged
        assert_eq!(store.list()[1].id, id);
    }

    #[test]
    fn test_update_missing_is_noop() {
        let storage = MemoryStorage::new();
        let mut store = RecordStore::load(&storage).unwrap();
        store.add(record(1, "x")).unwrap();
        let writes = storage.write_count();

        assert!(!store.update("nope", "y").unwrap());
        // Blank content for an unknown id is still a no-op, not an error
        assert!(!store.update("nope", "   ").unwrap());
        assert_eq!(storage.write_count(), writes);
    }

    #[test]
    fn test_update_rejects_blank_content() {
        let storage = MemoryStorage::new();
        let mut store = RecordStore::load(&storage).unwrap();
        let first = record(1, "keep");
        let id = first.id.clone();
        store.add(first).unwrap();

        let err = store.update(&id, "  ").unwrap_err();
        assert!(matches!(err, Error::InvalidOperation(_)));
        assert_eq!(store.get(&id).unwrap().content, "keep");
    }

    #[test]
    fn test_reload_reproduces_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edulog.db");

        let expected = {
            let db = Database::open(&path).unwrap();
            let mut store = RecordStore::load(&db).unwrap();
            let a = record(1, "a");
            let a_id = a.id.clone();
            store.add(a).unwrap();
            store.add(record(2, "b")).unwrap();
            store.update(&a_id, "a edited").unwrap();
            store.add(record(3, "c")).unwrap();
            let snapshot = store.list().to_vec();
            snapshot
        };

        let db = Database::open(&path).unwrap();
        let reloaded = RecordStore::load(&db).unwrap();
        assert_eq!(reloaded.list(), expected.as_slice());
    }

    #[test]
    fn test_malformed_payload_starts_empty_and_is_kept() {
        let storage = MemoryStorage::new();
        storage.set_item(RECORDS_KEY, "{not json").unwrap();

        let store = RecordStore::load(&storage).unwrap();

        assert!(store.is_empty());
        assert_eq!(storage.get_item(RECORDS_KEY).unwrap(), None);
        assert_eq!(
            storage.get_item(CORRUPT_RECORDS_KEY).unwrap().as_deref(),
            Some("{not json")
        );
    }
}
