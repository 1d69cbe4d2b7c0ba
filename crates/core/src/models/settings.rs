//! User settings model

/// Endpoint and relay key entered through the settings overlay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Roster/sync web app URL; empty means not connected
    pub endpoint_url: String,
    /// Relay API key; empty means polishing is disabled
    pub api_key: String,
}

impl Settings {
    pub fn new(endpoint_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn endpoint(&self) -> Option<&str> {
        let url = self.endpoint_url.trim();
        (!url.is_empty()).then_some(url)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
