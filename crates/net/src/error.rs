//! Network error types

/// Network result type
pub type Result<T> = std::result::Result<T, Error>;

/// Network errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response shape: {0}")]
    Shape(String),

    #[error("Relay error: {0}")]
    Relay(String),

    #[error("EMPTY_RESPONSE")]
    EmptyResponse,

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True when the failure points at a missing, invalid or unfunded key
    pub fn is_unauthorized(&self) -> bool {
        if let Error::Status { status: 401, .. } = self {
            return true;
        }
        let text = self.to_string().to_lowercase();
        ["unauthorized", "key", "401"]
            .iter()
            .any(|marker| text.contains(marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_markers() {
        let status = Error::Status {
            status: 401,
            message: "User not found.".into(),
        };
        assert!(status.is_unauthorized());
        assert!(Error::Relay("Invalid API Key".into()).is_unauthorized());
        assert!(Error::Relay("Unauthorized".into()).is_unauthorized());

        let server = Error::Status {
            status: 502,
            message: "Provider returned error".into(),
        };
        assert!(!server.is_unauthorized());
        assert!(!Error::EmptyResponse.is_unauthorized());
    }
}
