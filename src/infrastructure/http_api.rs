// HTTP implementation of the records API
use crate::application::records_api::{ApiError, RecordsApi, SubmitReply};
use crate::domain::dashboard::DashboardSnapshot;
use crate::domain::form::FormSubmission;
use crate::domain::records::{RecordType, ResidentOption, SearchResults};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct HttpRecordsApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRecordsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn multipart(form: &FormSubmission) -> Result<Form, ApiError> {
        let mut multipart = Form::new();
        for (name, value) in &form.fields {
            multipart = multipart.text(name.clone(), value.clone());
        }
        if let Some((name, file)) = &form.file {
            let part = Part::bytes(file.bytes.to_vec())
                .file_name(file.file_name.clone())
                .mime_str(&file.content_type)
                .map_err(|e| ApiError::InvalidUpload(format!("content type {:?}: {e}", file.content_type)))?;
            multipart = multipart.part(name.clone(), part);
        }
        Ok(multipart)
    }
}

#[async_trait]
impl RecordsApi for HttpRecordsApi {
    async fn dashboard_stats(&self) -> Result<DashboardSnapshot, ApiError> {
        self.get_json("/api/dashboard-stats").await
    }

    async fn search(&self, query: &str) -> Result<SearchResults, ApiError> {
        let path = format!("/api/search?q={}", urlencoding::encode(query));
        self.get_json(&path).await
    }

    async fn residents(&self) -> Result<Vec<ResidentOption>, ApiError> {
        self.get_json("/api/residents").await
    }

    async fn record_types(&self) -> Result<Vec<RecordType>, ApiError> {
        self.get_json("/api/record-types").await
    }

    async fn submit_form(&self, path: &str, form: &FormSubmission) -> Result<SubmitReply, ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .multipart(Self::multipart(form)?)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Could not read response body of POST {}: {}", path, e);
                String::new()
            }
        };
        // Bodies are optional; the status alone decides success.
        let mut reply: SubmitReply = serde_json::from_str(&body).unwrap_or_default();
        reply.success = status.is_success();

        tracing::debug!("POST {} -> {}", path, status);
        Ok(reply)
    }
}
