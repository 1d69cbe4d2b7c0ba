//! Application config file
//!
//! Optional `config.toml` tuning the relay and UI timings. A missing file
//! yields the defaults; a malformed one is a startup error.
//!
//! ```toml
//! [relay]
//! model = "google/gemini-2.0-flash-001"
//! retry_delay_ms = 2000
//!
//! [ui]
//! toast_ms = 3000
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "EDULOG_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub relay: RelaySection,
    pub ui: UiSection,
}

/// Chat-completion relay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaySection {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Input is cut to this many characters before sending
    pub max_input_chars: usize,
    /// Extra attempts after the first failure
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    /// Sent as `X-Title`
    pub app_title: String,
    /// Sent as `HTTP-Referer` when set
    pub referer: Option<String>,
}

impl Default for RelaySection {
    fn default() -> Self {
        Self {
            endpoint: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            model: "google/gemini-2.0-flash-001".to_string(),
            temperature: 0.3,
            max_tokens: 800,
            max_input_chars: 1000,
            max_retries: 3,
            retry_delay_ms: 2000,
            app_title: "EduLog Teacher Assistant".to_string(),
            referer: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// How long a toast stays visible
    pub toast_ms: u64,
}

impl Default for UiSection {
    fn default() -> Self {
        Self { toast_ms: 3000 }
    }
}

impl AppConfig {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load from `path`, falling back to defaults when the file is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)?;
        let config = Self::parse(&text)?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Load from `$EDULOG_CONFIG` or the platform config directory
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("app", "edulog", "edulog").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::parse(
            r#"
            [relay]
            retry_delay_ms = 10
            referer = "https://edulog.local"
            "#,
        )
        .unwrap();

        assert_eq!(config.relay.retry_delay_ms, 10);
        assert_eq!(config.relay.referer.as_deref(), Some("https://edulog.local"));
        assert_eq!(config.relay.max_retries, 3);
        assert_eq!(config.relay.max_input_chars, 1000);
        assert_eq!(config.ui.toast_ms, 3000);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[relay\nmodel = ").unwrap();

        assert!(matches!(AppConfig::load_from(&path), Err(Error::Config(_))));
    }
}
