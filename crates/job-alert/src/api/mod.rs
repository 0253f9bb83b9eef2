//! Boundary to the Job Alert REST backend.
//!
//! `JobsBackend` is the seam the job workflows are written against;
//! [`HttpJobsBackend`] is the production implementation.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::jobs::domain::{JobId, JobPage, JobPayload, JobPosting, ListQuery};

pub use http::HttpJobsBackend;

/// Public feeds shown on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    DailyUpdates,
    LatestResults,
    LatestAdmitCards,
    LatestAnswerKeys,
}

impl FeedKind {
    pub const ALL: [FeedKind; 4] = [
        FeedKind::DailyUpdates,
        FeedKind::LatestResults,
        FeedKind::LatestAdmitCards,
        FeedKind::LatestAnswerKeys,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            FeedKind::DailyUpdates => "daily-updates",
            FeedKind::LatestResults => "latest-results",
            FeedKind::LatestAdmitCards => "latest-admit-cards",
            FeedKind::LatestAnswerKeys => "latest-answer-keys",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FeedKind::DailyUpdates => "Daily Updates",
            FeedKind::LatestResults => "Latest Results",
            FeedKind::LatestAdmitCards => "Latest Admit Cards",
            FeedKind::LatestAnswerKeys => "Latest Answer Keys",
        }
    }
}

/// Feed entry (result, admit card, answer key, or daily update).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSummary {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub link: String,
}

/// Every backend call the admin workflows and home page make.
#[async_trait]
pub trait JobsBackend: Send + Sync {
    async fn list_jobs(&self, query: &ListQuery) -> Result<JobPage, ApiError>;
    async fn get_job(&self, id: &JobId) -> Result<JobPosting, ApiError>;
    async fn create_job(&self, payload: &JobPayload) -> Result<Option<JobPosting>, ApiError>;
    async fn update_job(
        &self,
        id: &JobId,
        payload: &JobPayload,
    ) -> Result<Option<JobPosting>, ApiError>;
    async fn delete_job(&self, id: &JobId) -> Result<(), ApiError>;
    async fn feed(&self, kind: FeedKind) -> Result<Vec<ContentSummary>, ApiError>;
}

/// Structured error body returned by the backend on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Decodes a response body, yielding an empty body for any other shape.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend responded with status {status}")]
    Status { status: u16, body: ErrorBody },
    #[error("unexpected response payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Human-readable message: the backend's `message`, then its `error`,
    /// then `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        if let ApiError::Status { body, .. } = self {
            let candidates = [body.message.as_deref(), body.error.as_deref()];
            if let Some(text) = candidates
                .into_iter()
                .flatten()
                .find(|text| !text.trim().is_empty())
            {
                return text.to_string();
            }
        }
        fallback.to_string()
    }
}
