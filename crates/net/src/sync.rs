//! Sync client
//!
//! Best-effort mirroring of a newly saved record to the class sheet. The
//! response body is never read; a failure is reported and otherwise ignored.

use edulog_core::{ActivityRecord, ClassGroup, Settings};
use tracing::{info, instrument, warn};

use crate::protocol::SyncRow;

/// Result of a sync attempt. Neither variant affects the local copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Delivered,
    Failed(String),
}

impl SyncOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, SyncOutcome::Delivered)
    }
}

/// A pending POST of one record row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncJob {
    pub url: String,
    pub row: SyncRow,
}

impl SyncJob {
    /// Decide whether a save should be mirrored.
    ///
    /// Only first-time saves sync, and only when an endpoint is configured
    /// and the class is not a demo class.
    pub fn plan(
        settings: &Settings,
        class: Option<&ClassGroup>,
        record: &ActivityRecord,
        is_edit: bool,
    ) -> Option<Self> {
        if is_edit || class.is_some_and(|c| c.demo) {
            return None;
        }
        let url = settings.endpoint()?;
        Some(Self {
            url: url.to_string(),
            row: SyncRow::from(record),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SyncClient {
    http: reqwest::Client,
}

impl SyncClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// POST the row as JSON; never retried
    #[instrument(skip_all, fields(url = %job.url, class = %job.row.class_name))]
    pub async fn push(&self, job: &SyncJob) -> SyncOutcome {
        let result = self
            .http
            .post(&job.url)
            .json(&job.row)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        match result {
            Ok(_) => {
                info!("Record synced");
                SyncOutcome::Delivered
            }
            Err(e) => {
                warn!(error = %e, "Record sync failed");
                SyncOutcome::Failed(e.to_string())
            }
        }
    }
}
