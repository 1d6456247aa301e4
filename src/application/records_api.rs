// API trait for the records service consumed by the dashboard
use crate::domain::dashboard::DashboardSnapshot;
use crate::domain::form::FormSubmission;
use crate::domain::records::{RecordType, ResidentOption, SearchResults};
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub const NEW_RECORD_PATH: &str = "/api/new-record";
pub const RESIDENTS_PATH: &str = "/api/residents";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("invalid upload: {0}")]
    InvalidUpload(String),
}

/// Outcome of a form POST. The status decides success; the JSON body
/// (`{message}` or `{error}`) is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SubmitReply {
    #[serde(skip)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SubmitReply {
    pub fn ok(message: Option<&str>) -> Self {
        Self {
            success: true,
            message: message.map(str::to_string),
            error: None,
        }
    }

    pub fn failed(error: Option<&str>) -> Self {
        Self {
            success: false,
            message: None,
            error: error.map(str::to_string),
        }
    }
}

#[async_trait]
pub trait RecordsApi: Send + Sync {
    /// `GET /api/dashboard-stats`
    async fn dashboard_stats(&self) -> Result<DashboardSnapshot, ApiError>;

    /// `GET /api/search?q=`
    async fn search(&self, query: &str) -> Result<SearchResults, ApiError>;

    /// `GET /api/residents`
    async fn residents(&self) -> Result<Vec<ResidentOption>, ApiError>;

    /// `GET /api/record-types`
    async fn record_types(&self) -> Result<Vec<RecordType>, ApiError>;

    /// Multipart POST of a form to `path`. Non-2xx statuses are returned as
    /// an unsuccessful reply, only transport failures are errors.
    async fn submit_form(&self, path: &str, form: &FormSubmission) -> Result<SubmitReply, ApiError>;
}
