//! Roster client
//!
//! Fetches the class list from the sheet web app.

use edulog_core::ClassGroup;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct RosterClient {
    http: reqwest::Client,
}

impl RosterClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// GET the roster at `url`.
    ///
    /// Anything but a 2xx JSON array of class objects is an error; there is
    /// no retry.
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<Vec<ClassGroup>> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Roster request rejected");
            return Err(Error::Status {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("error").to_string(),
            });
        }

        let body: Value = serde_json::from_str(&response.text().await?)?;
        let classes = parse_roster(body)?;
        info!(classes = classes.len(), "Roster fetched");
        Ok(classes)
    }
}

fn parse_roster(body: Value) -> Result<Vec<ClassGroup>> {
    if !body.is_array() {
        return Err(Error::Shape("roster is not a JSON array".into()));
    }
    serde_json::from_value(body).map_err(|e| Error::Shape(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use edulog_core::StudentNumber;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetches_class_list() {
        let app = Router::new().route(
            "/exec",
            get(|| async {
                Json(json!([{
                    "id": "1A",
                    "name": "1학년 A반",
                    "students": [{"id": "1A_1", "number": 1, "name": "Kim"}]
                }]))
            }),
        );
        let base = test_server::spawn(app).await;

        let classes = RosterClient::new()
            .fetch(&format!("{}/exec", base))
            .await
            .unwrap();

        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].name, "1학년 A반");
        assert_eq!(classes[0].students[0].number, StudentNumber::Int(1));
    }

    #[tokio::test]
    async fn test_fractional_student_number_is_accepted() {
        let app = Router::new().route(
            "/",
            get(|| async {
                Json(json!([{
                    "id": "1A",
                    "name": "1학년 A반",
                    "students": [
                        {"id": "1A_1", "number": 1, "name": "Kim"},
                        {"id": "1A_2", "number": 2.5, "name": "Lee"}
                    ]
                }]))
            }),
        );
        let base = test_server::spawn(app).await;

        let classes = RosterClient::new().fetch(&base).await.unwrap();

        assert_eq!(classes[0].students.len(), 2);
        assert_eq!(classes[0].students[1].label(), "2.5 Lee");
    }

    #[tokio::test]
    async fn test_object_body_is_shape_error() {
        let app = Router::new().route("/", get(|| async { Json(json!({"result": "ok"})) }));
        let base = test_server::spawn(app).await;

        let err = RosterClient::new().fetch(&base).await.unwrap_err();
        assert!(matches!(err, Error::Shape(_)));
    }

    #[tokio::test]
    async fn test_malformed_class_is_shape_error() {
        let app = Router::new().route("/", get(|| async { Json(json!([{"id": 3}])) }));
        let base = test_server::spawn(app).await;

        let err = RosterClient::new().fetch(&base).await.unwrap_err();
        assert!(matches!(err, Error::Shape(_)));
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let app = Router::new().route(
            "/",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!([]))) }),
        );
        let base = test_server::spawn(app).await;

        let err = RosterClient::new().fetch(&base).await.unwrap_err();
        assert!(matches!(err, Error::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_html_body_is_json_error() {
        let app = Router::new().route("/", get(|| async { "<html>login</html>" }));
        let base = test_server::spawn(app).await;

        let err = RosterClient::new().fetch(&base).await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
