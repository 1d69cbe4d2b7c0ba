//! Class list and student grid actions

use edulog_core::{ClassGroup, LocalStorage, SettingsStore};
use tracing::{info, warn};

use super::{ConnectionState, Controller, View};
use crate::toast::Severity;

impl<S: LocalStorage + Clone> Controller<S> {
    pub fn classes(&self) -> &[ClassGroup] {
        &self.classes
    }

    /// Classes whose name contains the search query, case-insensitively
    pub fn filtered_classes(&self) -> Vec<&ClassGroup> {
        self.classes
            .iter()
            .filter(|c| c.matches_query(&self.search_query))
            .collect()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn selected_class_id(&self) -> Option<&str> {
        self.selected_class.as_deref()
    }

    pub fn active_class(&self) -> Option<&ClassGroup> {
        let id = self.selected_class.as_deref()?;
        self.classes.iter().find(|c| c.id == id)
    }

    /// Open a class's student grid
    pub fn select_class(&mut self, class_id: &str) {
        if !self.classes.iter().any(|c| c.id == class_id) {
            return;
        }
        self.selected_class = Some(class_id.to_string());
        self.view = View::Main;
    }

    /// Fetch the roster from the configured endpoint
    pub async fn refresh_roster(&mut self) {
        let url = self.settings.endpoint_url.clone();
        self.fetch_roster(&url).await;
    }

    /// Fetch the roster from `url`.
    ///
    /// Success replaces the class list and remembers `url` as the endpoint;
    /// failure only flips the connection state. Records are never touched.
    pub async fn fetch_roster(&mut self, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            return;
        }

        self.loading = true;
        let result = self.roster_client.fetch(url).await;
        self.loading = false;

        match result {
            Ok(classes) => {
                info!(classes = classes.len(), "Roster loaded");
                self.classes = classes;
                self.connection = ConnectionState::Connected;
                self.settings.endpoint_url = url.to_string();
                if let Err(e) = SettingsStore::new(&self.storage).set_endpoint_url(url) {
                    warn!(error = %e, "Failed to remember endpoint");
                }
                if self.selected_class.is_some() && self.active_class().is_none() {
                    self.selected_class = None;
                }
                self.notify("학급 데이터를 성공적으로 가져왔습니다.", Severity::Success);
            }
            Err(e) => {
                warn!(error = %e, "Roster fetch failed");
                self.connection = ConnectionState::Disconnected;
                self.notify("명단 불러오기 실패. URL을 확인해 주세요.", Severity::Error);
            }
        }
    }
}
