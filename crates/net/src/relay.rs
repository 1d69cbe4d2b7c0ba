//! Relay client
//!
//! Rewrites a raw activity note into formal record-book register through a
//! chat-completion endpoint. Every outcome, including failure, comes back
//! as display text.

use std::fmt;
use std::time::Duration;

use edulog_core::RelaySection;
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};
use crate::protocol::{ChatMessage, ChatRequest, ChatResponse};
use crate::retry::{retry, RetryPolicy};

const SYSTEM_PROMPT: &str = "당신은 한국의 고등학교 교사입니다. 입력되는 학생의 활동 메모를 학교생활기록부 기재 요령에 맞게 전문적인 '~함' 문체로 다듬어주세요. 결과만 출력하고 부연 설명은 하지 마세요.";

/// Returned without any request when no key is configured
pub const MISSING_KEY_MESSAGE: &str = "설정(⚙️)에서 OpenRouter API 키를 먼저 입력해주세요.";

/// Returned when the final failure points at the key or its credit
pub const INVALID_KEY_MESSAGE: &str =
    "API 키가 유효하지 않거나 크레딧이 부족합니다. 설정을 확인해 주세요.";

#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub max_input_chars: usize,
    pub retry: RetryPolicy,
    pub app_title: String,
    pub referer: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self::from(&RelaySection::default())
    }
}

impl From<&RelaySection> for RelayConfig {
    fn from(section: &RelaySection) -> Self {
        Self {
            endpoint: section.endpoint.clone(),
            model: section.model.clone(),
            temperature: section.temperature,
            max_tokens: section.max_tokens,
            max_input_chars: section.max_input_chars,
            retry: RetryPolicy {
                max_retries: section.max_retries,
                delay: Duration::from_millis(section.retry_delay_ms),
            },
            app_title: section.app_title.clone(),
            referer: section.referer.clone(),
        }
    }
}

/// Progress reported while a polish request is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayProgress {
    Started,
    Retrying { attempt: u32, max: u32 },
}

impl fmt::Display for RelayProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayProgress::Started => write!(f, "AI 분석 시작..."),
            RelayProgress::Retrying { attempt, max } => {
                write!(f, "재시도 중 ({}/{})...", attempt, max)
            }
        }
    }
}

/// Trim and cut the note to at most `max_chars` characters
pub fn truncate_input(raw: &str, max_chars: usize) -> String {
    raw.trim().chars().take(max_chars).collect()
}

/// Map the last error after retries to the text shown to the teacher
pub fn failure_message(error: &Error) -> String {
    if error.is_unauthorized() {
        return INVALID_KEY_MESSAGE.to_string();
    }
    let detail = match error {
        Error::Status { message, .. } | Error::Relay(message) => message.clone(),
        other => other.to_string(),
    };
    format!("AI 변환 오류: {}. 잠시 후 다시 시도해 주세요.", detail)
}

#[derive(Debug, Clone, Default)]
pub struct RelayClient {
    http: reqwest::Client,
    config: RelayConfig,
}

impl RelayClient {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Rewrite `raw` and return the text to put in the editor.
    ///
    /// Without a key this returns [`MISSING_KEY_MESSAGE`] immediately. Failed
    /// attempts are retried per the configured policy; the final failure is
    /// turned into a guidance string rather than an error.
    #[instrument(skip_all, fields(chars = raw.chars().count()))]
    pub async fn polish<P>(&self, raw: &str, api_key: &str, mut on_progress: P) -> String
    where
        P: FnMut(RelayProgress),
    {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return MISSING_KEY_MESSAGE.to_string();
        }

        let text = truncate_input(raw, self.config.max_input_chars);
        let max = self.config.retry.max_retries;

        on_progress(RelayProgress::Started);
        let result = retry(
            self.config.retry,
            |attempt, e: &Error| {
                warn!(attempt, error = %e, "Relay attempt failed, retrying");
                on_progress(RelayProgress::Retrying { attempt, max });
            },
            |_| self.request_once(&text, api_key),
        )
        .await;

        match result {
            Ok(polished) => polished,
            Err(e) => {
                warn!(error = %e, "Relay gave up");
                failure_message(&e)
            }
        }
    }

    /// One chat-completion request, no retry
    pub async fn request_once(&self, text: &str, api_key: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let mut request = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .header("X-Title", &self.config.app_title)
            .json(&body);
        if let Some(referer) = &self.config.referer {
            request = request.header("HTTP-Referer", referer);
        }

        let response = request.send().await?;
        let status = response.status();
        let raw = response.text().await?;
        debug!(status = status.as_u16(), len = raw.len(), "Relay response");

        // Error bodies are not always JSON; fall back to the status line
        let parsed: Option<ChatResponse> = serde_json::from_str(&raw).ok();

        if !status.is_success() {
            let message = parsed
                .as_ref()
                .and_then(ChatResponse::error_message)
                .map(str::to_string)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            return Err(Error::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = match parsed {
            Some(parsed) => parsed,
            None => serde_json::from_str::<ChatResponse>(&raw)?,
        };
        if let Some(message) = parsed.error_message() {
            return Err(Error::Relay(message.to_string()));
        }
        parsed
            .text()
            .map(str::to_string)
            .ok_or(Error::EmptyResponse)
    }
}
