//! Storage traits
//!
//! Keyed string storage shared by settings and the record collection,
//! allowing different implementations (SQLite, in-memory for tests).

use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};

/// Durable keyed string storage
pub trait LocalStorage {
    /// Read the value stored under `key`
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` if present
    fn remove_item(&self, key: &str) -> Result<()>;
}

impl<T: LocalStorage + ?Sized> LocalStorage for Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

impl<T: LocalStorage + ?Sized> LocalStorage for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

impl<T: LocalStorage> LocalStorage for Mutex<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.lock()
            .map_err(|_| Error::Storage("storage lock poisoned".into()))?
            .get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.lock()
            .map_err(|_| Error::Storage("storage lock poisoned".into()))?
            .set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.lock()
            .map_err(|_| Error::Storage("storage lock poisoned".into()))?
            .remove_item(key)
    }
}
