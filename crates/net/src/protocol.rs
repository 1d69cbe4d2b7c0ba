//! Wire formats for the sheet web app and the chat-completion relay

use edulog_core::{ActivityRecord, StudentNumber};
use serde::{Deserialize, Serialize};

/// Row appended to the class sheet by the sync endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRow {
    pub class_name: String,
    pub student_number: StudentNumber,
    pub student_name: String,
    pub content: String,
}

impl From<&ActivityRecord> for SyncRow {
    fn from(record: &ActivityRecord) -> Self {
        Self {
            class_name: record.class_name.clone(),
            student_number: record.student_number.clone(),
            student_name: record.student_name.clone(),
            content: record.content.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Chat-completion response; either `choices` or `error` is populated
#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatResponse {
    /// Trimmed text of the first choice, if non-empty
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().and_then(|e| e.message.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_is_trimmed() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  수업에 참여함.\n"}}]}"#,
        )
        .unwrap();
        assert_eq!(resp.text(), Some("수업에 참여함."));
        assert_eq!(resp.error_message(), None);
    }

    #[test]
    fn test_blank_or_missing_text_is_none() {
        let blank: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"   "}}]}"#).unwrap();
        let missing: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(blank.text(), None);
        assert_eq!(missing.text(), None);
    }

    #[test]
    fn test_error_body_parses() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"error":{"message":"No auth credentials found","code":401}}"#)
                .unwrap();
        assert_eq!(resp.error_message(), Some("No auth credentials found"));
    }

    #[test]
    fn test_sync_row_field_names() {
        let row = SyncRow {
            class_name: "1학년 A반".into(),
            student_number: StudentNumber::Int(1),
            student_name: "Kim".into(),
            content: "열심히 참여함".into(),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["className"], "1학년 A반");
        assert_eq!(value["studentNumber"], 1);
        assert_eq!(value["studentName"], "Kim");
        assert_eq!(value["content"], "열심히 참여함");
    }
}
