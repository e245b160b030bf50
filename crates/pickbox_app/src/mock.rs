//! In-process backend with the same behavior as the demo API
//!
//! Serves a numbered catalog (`"1"` through `"1000"` by default) and accepts
//! submissions of one to four digits. Used by tests and by the CLI's
//! `--mock` flag.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use serde_json::{json, Value};

use crate::api::{FetchMode, OptionSource, SelectionSink, SubmitReceipt};
use crate::error::ApiError;

/// Catalog size served in [`FetchMode::Ok`]
pub const DEFAULT_CATALOG_SIZE: usize = 1000;

fn is_accepted(value: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^\d{1,4}$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}

/// Mock option source and selection sink
#[derive(Debug)]
pub struct MockBackend {
    catalog_size: usize,
    payload: Option<Value>,
    latency: Option<Duration>,
    fetches: AtomicUsize,
    submits: AtomicUsize,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            catalog_size: DEFAULT_CATALOG_SIZE,
            payload: None,
            latency: None,
            fetches: AtomicUsize::new(0),
            submits: AtomicUsize::new(0),
        }
    }

    /// Serve `"1"..="size"` instead of the default catalog
    pub fn with_catalog_size(mut self, size: usize) -> Self {
        self.catalog_size = size;
        self
    }

    /// Serve `payload` verbatim in [`FetchMode::Ok`]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Delay every response
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of fetches served so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }

    /// Number of submissions received so far
    pub fn submit_count(&self) -> usize {
        self.submits.load(Ordering::Relaxed)
    }

    fn catalog(&self) -> Value {
        if let Some(payload) = &self.payload {
            return payload.clone();
        }
        Value::Array(
            (1..=self.catalog_size)
                .map(|i| json!({ "name": i.to_string(), "value": i.to_string() }))
                .collect(),
        )
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl OptionSource for MockBackend {
    async fn fetch_options(&self, mode: FetchMode) -> Result<Value, ApiError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        self.delay().await;
        match mode {
            FetchMode::Ok => Ok(self.catalog()),
            FetchMode::Empty => Ok(json!([])),
            FetchMode::Null => Ok(Value::Null),
            FetchMode::Error => Err(ApiError::Transport("connection refused".into())),
        }
    }
}

impl SelectionSink for MockBackend {
    async fn submit_selection(&self, value: &str) -> Result<SubmitReceipt, ApiError> {
        self.submits.fetch_add(1, Ordering::Relaxed);
        self.delay().await;
        if !is_accepted(value) {
            return Err(ApiError::Status {
                status: 400,
                body: json!({ "message": "Invalid value" }).to_string(),
            });
        }
        Ok(SubmitReceipt {
            message: format!("Selected option {} accepted successfully.", value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::decode_catalog;

    #[tokio::test]
    async fn test_fetch_modes() {
        let mock = MockBackend::new();

        let options = decode_catalog(mock.fetch_options(FetchMode::Ok).await.unwrap()).unwrap();
        assert_eq!(options.len(), 1000);
        assert_eq!(options[0].value, "1");
        assert_eq!(options[999].name, "1000");

        assert_eq!(mock.fetch_options(FetchMode::Empty).await.unwrap(), json!([]));
        assert_eq!(mock.fetch_options(FetchMode::Null).await.unwrap(), Value::Null);
        assert!(matches!(
            mock.fetch_options(FetchMode::Error).await,
            Err(ApiError::Transport(_))
        ));
        assert_eq!(mock.fetch_count(), 4);
    }

    #[tokio::test]
    async fn test_submit_validation() {
        let mock = MockBackend::new();

        let receipt = mock.submit_selection("42").await.unwrap();
        assert_eq!(receipt.message, "Selected option 42 accepted successfully.");

        for bad in ["oops", "", "12345", "4a"] {
            match mock.submit_selection(bad).await {
                Err(ApiError::Status { status, body }) => {
                    assert_eq!(status, 400);
                    assert!(body.contains("Invalid value"));
                }
                other => panic!("expected 400 for {:?}, got {:?}", bad, other),
            }
        }
        assert_eq!(mock.submit_count(), 5);
    }

    #[tokio::test]
    async fn test_custom_payload() {
        let mock = MockBackend::new().with_payload(json!({"oops": true}));
        assert_eq!(
            mock.fetch_options(FetchMode::Ok).await.unwrap(),
            json!({"oops": true})
        );
    }
}
