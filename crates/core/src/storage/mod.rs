//! Durable local storage for EduLog
//!
//! A small SQLite database emulates keyed string storage. Settings and the
//! record collection live under independent keys on top of it.

mod local;
mod memory;
mod migrations;
mod records;
mod settings;
mod traits;

use std::path::Path;

use rusqlite::Connection;
use tracing::instrument;

use crate::error::Result;

pub use local::KeyValueStore;
pub use memory::MemoryStorage;
pub use records::{RecordStore, CORRUPT_RECORDS_KEY, RECORDS_KEY};
pub use settings::{SettingsStore, API_KEY_KEY, ENDPOINT_URL_KEY};
pub use traits::LocalStorage;

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(mut conn: Connection) -> Result<Self> {
        migrations::run_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    /// Get current schema version
    pub fn schema_version(&self) -> u32 {
        migrations::current_version(&self.conn).unwrap_or(0)
    }

    /// Get the keyed string store
    pub fn local_storage(&self) -> KeyValueStore<'_> {
        KeyValueStore::new(&self.conn)
    }
}

impl LocalStorage for Database {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.local_storage().get(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.local_storage().set(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.local_storage().remove(key)
    }
}
