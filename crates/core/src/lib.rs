//! EduLog Core Library
//!
//! Roster and record models, durable local storage, the record store and
//! archive grouping for the EduLog teacher note-taking tool.

pub mod archive;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;

pub use archive::{group_by_date, DateGroup};
pub use config::{AppConfig, RelaySection, UiSection};
pub use error::{Error, Result};
pub use models::*;
pub use storage::{
    Database, KeyValueStore, LocalStorage, MemoryStorage, RecordStore, SettingsStore,
    API_KEY_KEY, CORRUPT_RECORDS_KEY, ENDPOINT_URL_KEY, RECORDS_KEY,
};
