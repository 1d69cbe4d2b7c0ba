//! Settings persistence
//!
//! The endpoint URL and relay key are stored as plain strings under their
//! own keys, independent of the record collection.

use tracing::instrument;

use super::LocalStorage;
use crate::error::Result;
use crate::models::Settings;

pub const ENDPOINT_URL_KEY: &str = "edulog_sheet_url";
pub const API_KEY_KEY: &str = "edulog_api_key";

/// Settings store
pub struct SettingsStore<'a, S: LocalStorage + ?Sized> {
    storage: &'a S,
}

impl<'a, S: LocalStorage + ?Sized> SettingsStore<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// Load settings; missing keys read as empty strings
    pub fn load(&self) -> Result<Settings> {
        Ok(Settings {
            endpoint_url: self.storage.get_item(ENDPOINT_URL_KEY)?.unwrap_or_default(),
            api_key: self.storage.get_item(API_KEY_KEY)?.unwrap_or_default(),
        })
    }

    /// Save both settings
    #[instrument(skip_all, fields(endpoint = %settings.endpoint_url))]
    pub fn save(&self, settings: &Settings) -> Result<()> {
        self.storage.set_item(ENDPOINT_URL_KEY, &settings.endpoint_url)?;
        self.storage.set_item(API_KEY_KEY, &settings.api_key)?;
        Ok(())
    }

    /// Remember an endpoint that just served a valid roster
    pub fn set_endpoint_url(&self, url: &str) -> Result<()> {
        self.storage.set_item(ENDPOINT_URL_KEY, url)
    }
}
