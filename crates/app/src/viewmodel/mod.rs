//! View model for the EduLog screens
//!
//! [`Controller`] owns the roster, the record store and all UI state, and
//! exposes one method per user action. Screens are derived from three
//! independent axes: the top-level [`View`], the selected class, and the
//! [`Overlay`] on top.

mod archive;
mod editor;
mod roster;
mod settings;

use std::time::Duration;

use edulog_core::{AppConfig, ClassGroup, LocalStorage, RecordStore, Result, Settings, SettingsStore};
use edulog_net::{RelayClient, RelayConfig, RosterClient, SyncClient};
use tracing::info;

use crate::toast::{Severity, Toasts};

pub use editor::{EditorMode, EditorState, PolishTicket};
pub use settings::SettingsDraft;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Class list, or the student grid when a class is selected
    Main,
    /// Record archive grouped by date
    Recent,
}

/// Modal layer above the current view
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    None,
    Settings(SettingsDraft),
    Editor(EditorState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

pub struct Controller<S: LocalStorage + Clone> {
    storage: S,
    records: RecordStore<S>,
    settings: Settings,
    roster_client: RosterClient,
    sync_client: SyncClient,
    relay: RelayClient,

    classes: Vec<ClassGroup>,
    connection: ConnectionState,
    loading: bool,
    syncing: bool,

    view: View,
    selected_class: Option<String>,
    search_query: String,
    overlay: Overlay,
    /// Bumped on every editor open so late relay results can be recognised
    editor_session: u64,
    toasts: Toasts,
}

impl<S: LocalStorage + Clone> Controller<S> {
    /// Load settings and records from `storage`. No network call is made.
    pub fn new(storage: S, config: &AppConfig) -> Result<Self> {
        let settings = SettingsStore::new(&storage).load()?;
        let records = RecordStore::load(storage.clone())?;

        Ok(Self {
            storage,
            records,
            settings,
            roster_client: RosterClient::new(),
            sync_client: SyncClient::new(),
            relay: RelayClient::new(RelayConfig::from(&config.relay)),
            classes: Vec::new(),
            connection: ConnectionState::Disconnected,
            loading: false,
            syncing: false,
            view: View::Main,
            selected_class: None,
            search_query: String::new(),
            overlay: Overlay::None,
            editor_session: 0,
            toasts: Toasts::new(Duration::from_millis(config.ui.toast_ms)),
        })
    }

    /// Startup: fetch the roster when an endpoint is already configured
    pub async fn start(&mut self) {
        info!(
            records = self.records.len(),
            connected = self.settings.endpoint().is_some(),
            "Starting controller"
        );
        if self.settings.endpoint().is_some() {
            self.refresh_roster().await;
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn records(&self) -> &RecordStore<S> {
        &self.records
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_syncing(&self) -> bool {
        self.syncing
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut Toasts {
        &mut self.toasts
    }

    /// Header title for the current screen
    pub fn title(&self) -> String {
        if self.selected_class.is_some() {
            return self
                .active_class()
                .map(|c| c.name.clone())
                .unwrap_or_default();
        }
        match self.view {
            View::Recent => "기록 보관소".to_string(),
            View::Main => "에듀로그 (EduLog)".to_string(),
        }
    }

    pub fn connection_label(&self) -> &'static str {
        match self.connection {
            ConnectionState::Connected => "연결됨",
            ConnectionState::Disconnected => "연결 안 됨",
        }
    }

    /// Whether the back control is shown
    pub fn can_go_back(&self) -> bool {
        self.selected_class.is_some() || self.view == View::Recent
    }

    /// Clear the selected class and return to the class list
    pub fn back(&mut self) {
        self.selected_class = None;
        self.view = View::Main;
    }

    fn notify(&mut self, text: &str, severity: Severity) {
        self.toasts.show(text, severity);
    }
}
