//! Settings overlay

use edulog_core::{LocalStorage, Settings, SettingsStore};
use tracing::error;

use super::{Controller, Overlay};
use crate::toast::Severity;

/// Values being edited in the settings overlay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsDraft {
    pub endpoint_url: String,
    pub api_key: String,
}

impl<S: LocalStorage + Clone> Controller<S> {
    pub fn open_settings(&mut self) {
        self.overlay = Overlay::Settings(SettingsDraft {
            endpoint_url: self.settings.endpoint_url.clone(),
            api_key: self.settings.api_key.clone(),
        });
    }

    pub fn settings_draft_mut(&mut self) -> Option<&mut SettingsDraft> {
        match &mut self.overlay {
            Overlay::Settings(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn close_settings(&mut self) {
        if matches!(self.overlay, Overlay::Settings(_)) {
            self.overlay = Overlay::None;
        }
    }

    /// Persist the draft, close the overlay and reload the roster
    pub async fn save_settings(&mut self) {
        let Overlay::Settings(draft) = &self.overlay else {
            return;
        };
        let settings = Settings::new(draft.endpoint_url.trim(), draft.api_key.trim());

        if let Err(e) = SettingsStore::new(&self.storage).save(&settings) {
            error!(error = %e, "Failed to save settings");
            self.notify("설정 저장 실패", Severity::Error);
            return;
        }
        self.settings = settings;
        self.overlay = Overlay::None;
        self.notify("설정이 저장되었습니다.", Severity::Success);

        self.refresh_roster().await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::routing::get;
    use axum::{Json, Router};
    use edulog_core::{MemoryStorage, API_KEY_KEY, ENDPOINT_URL_KEY};
    use serde_json::json;

    use super::*;
    use crate::viewmodel::test_support::{controller, spawn};
    use crate::viewmodel::ConnectionState;

    #[tokio::test]
    async fn test_save_persists_and_connects() {
        let app = Router::new().route("/exec", get(|| async { Json(json!([])) }));
        let url = format!("{}/exec", spawn(app).await);
        let storage = Arc::new(MemoryStorage::new());
        let mut ctl = controller(&storage);

        ctl.open_settings();
        let draft = ctl.settings_draft_mut().unwrap();
        draft.endpoint_url = format!(" {} ", url);
        draft.api_key = "sk-or-v1-abc".into();
        ctl.save_settings().await;

        assert_eq!(ctl.overlay(), &Overlay::None);
        assert_eq!(ctl.connection(), ConnectionState::Connected);
        assert_eq!(storage.get_item(ENDPOINT_URL_KEY).unwrap(), Some(url));
        assert_eq!(
            storage.get_item(API_KEY_KEY).unwrap().as_deref(),
            Some("sk-or-v1-abc")
        );
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let storage = Arc::new(MemoryStorage::new());
        let mut ctl = controller(&storage);

        ctl.open_settings();
        ctl.settings_draft_mut().unwrap().api_key = "typed".into();
        ctl.close_settings();

        assert_eq!(ctl.overlay(), &Overlay::None);
        assert!(!ctl.settings().has_api_key());
        assert_eq!(storage.get_item(API_KEY_KEY).unwrap(), None);
    }
}
