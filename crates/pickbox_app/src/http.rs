//! HTTP backend
//!
//! Talks to the demo API:
//!
//! - `GET {base}/options/for/select[?mode=empty|null]` returns the catalog
//! - `POST {base}/selected/option` with `{"value": ...}` submits a selection

use std::time::Duration;

use serde_json::Value;

use crate::api::{
    decode_receipt, FetchMode, OptionSource, SelectionSink, SubmitReceipt, SubmitRequest,
};
use crate::config::AppConfig;
use crate::error::ApiError;

const OPTIONS_PATH: &str = "/options/for/select";
const BROKEN_OPTIONS_PATH: &str = "/__broken/options/for/select";
const SUBMIT_PATH: &str = "/selected/option";

/// reqwest-backed option source and selection sink
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: AppConfig,
}

impl HttpBackend {
    /// Create a backend for `config`
    pub fn new(config: AppConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// URL fetched for `mode`
    pub fn options_url(&self, mode: FetchMode) -> String {
        match mode {
            FetchMode::Ok => self.config.url(OPTIONS_PATH),
            FetchMode::Empty | FetchMode::Null => {
                format!("{}?mode={}", self.config.url(OPTIONS_PATH), mode)
            }
            FetchMode::Error => self.config.url(BROKEN_OPTIONS_PATH),
        }
    }

    pub fn submit_url(&self) -> String {
        self.config.url(SUBMIT_PATH)
    }
}

async fn status_error(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    status_error_from(status, response.text().await)
}

/// An unreadable error body is logged and treated as empty
fn status_error_from<E: std::fmt::Display>(status: u16, body: Result<String, E>) -> ApiError {
    let body = body.unwrap_or_else(|err| {
        tracing::debug!(status, error = %err, "failed to read error body");
        String::new()
    });
    ApiError::Status { status, body }
}

impl OptionSource for HttpBackend {
    async fn fetch_options(&self, mode: FetchMode) -> Result<Value, ApiError> {
        let url = self.options_url(mode);
        tracing::debug!(%url, %mode, "fetching options");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::InvalidPayload(format!("malformed data from server: {}", e)))
    }
}

impl SelectionSink for HttpBackend {
    async fn submit_selection(&self, value: &str) -> Result<SubmitReceipt, ApiError> {
        let url = self.submit_url();
        tracing::debug!(%url, value, "submitting selection");

        let response = self
            .client
            .post(&url)
            .json(&SubmitRequest {
                value: value.to_string(),
            })
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(decode_receipt(&body))
    }
}
