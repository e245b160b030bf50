//! Collaborator contracts: the option source and the selection sink
//!
//! Sources hand back the raw JSON payload. The host normalizes it with
//! [`decode_catalog`] before anything reaches a widget, so malformed data is
//! rejected in one place regardless of which backend produced it.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use pickbox_select::SelectOption;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpBackend;
use crate::mock::MockBackend;

/// Message used when a catalog payload is not an array
pub const MALFORMED_CATALOG: &str = "malformed data from server";

/// Message used when a submission never got a response
pub const SUBMIT_TRANSPORT_FAILED: &str = "Failed to fetch";

/// Fetch scenario requested from the data source
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FetchMode {
    /// The full catalog
    #[default]
    Ok,
    /// An empty array
    Empty,
    /// A `null` payload
    Null,
    /// An unreachable endpoint
    Error,
}

impl FetchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchMode::Ok => "ok",
            FetchMode::Empty => "empty",
            FetchMode::Null => "null",
            FetchMode::Error => "error",
        }
    }
}

/// Submission scenario
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SubmitMode {
    /// Send the selected value
    #[default]
    Ok,
    /// Send a value the sink rejects
    Error,
}

impl SubmitMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmitMode::Ok => "ok",
            SubmitMode::Error => "error",
        }
    }
}

/// Error parsing a mode name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMode(pub String);

impl fmt::Display for UnknownMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown mode: {}", self.0)
    }
}

impl std::error::Error for UnknownMode {}

impl FromStr for FetchMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ok" => Ok(FetchMode::Ok),
            "empty" => Ok(FetchMode::Empty),
            "null" => Ok(FetchMode::Null),
            "error" => Ok(FetchMode::Error),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

impl FromStr for SubmitMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ok" => Ok(SubmitMode::Ok),
            "error" => Ok(SubmitMode::Error),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SubmitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body of a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub value: String,
}

/// Successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// Human-readable confirmation
    pub message: String,
}

/// Source of the option catalog
pub trait OptionSource {
    /// Fetch the raw catalog payload
    fn fetch_options(
        &self,
        mode: FetchMode,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send;
}

/// Sink accepting the selected value
pub trait SelectionSink {
    /// Submit `value`
    fn submit_selection(
        &self,
        value: &str,
    ) -> impl Future<Output = Result<SubmitReceipt, ApiError>> + Send;
}

/// Normalize a catalog payload
///
/// Anything but an array is rejected. Elements that are not objects with
/// string `name` and `value` fields are dropped; the rest keep their order.
pub fn decode_catalog(payload: Value) -> Result<Vec<SelectOption>, ApiError> {
    let Value::Array(items) = payload else {
        return Err(ApiError::InvalidPayload(MALFORMED_CATALOG.to_string()));
    };

    let total = items.len();
    let options: Vec<SelectOption> = items
        .into_iter()
        .filter_map(|item| {
            let name = item.get("name")?.as_str()?;
            let value = item.get("value")?.as_str()?;
            Some(SelectOption::new(name, value))
        })
        .collect();

    if options.len() < total {
        tracing::warn!(
            dropped = total - options.len(),
            kept = options.len(),
            "dropped malformed catalog entries"
        );
    }
    Ok(options)
}

/// Read a success body; anything without a string `message` reads as "Success"
pub fn decode_receipt(body: &str) -> SubmitReceipt {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| "Success".to_string());
    SubmitReceipt { message }
}

/// User-facing text for a failed submission
pub fn submit_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { status, body } => {
            let detail = serde_json::from_str::<Value>(body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| body.trim().to_string());
            format!("Submit failed ({}). {}", status, detail)
                .trim()
                .to_string()
        }
        ApiError::Transport(_) => SUBMIT_TRANSPORT_FAILED.to_string(),
        ApiError::InvalidPayload(msg) => msg.clone(),
    }
}

/// User-facing text for a failed catalog load
pub fn fetch_error_message(err: &ApiError) -> String {
    err.to_string()
}

/// Either backend, chosen at runtime
#[derive(Debug)]
pub enum AnyBackend {
    Http(HttpBackend),
    Mock(MockBackend),
}

impl OptionSource for AnyBackend {
    async fn fetch_options(&self, mode: FetchMode) -> Result<Value, ApiError> {
        match self {
            AnyBackend::Http(b) => b.fetch_options(mode).await,
            AnyBackend::Mock(b) => b.fetch_options(mode).await,
        }
    }
}

impl SelectionSink for AnyBackend {
    async fn submit_selection(&self, value: &str) -> Result<SubmitReceipt, ApiError> {
        match self {
            AnyBackend::Http(b) => b.submit_selection(value).await,
            AnyBackend::Mock(b) => b.submit_selection(value).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_catalog_array() {
        let options = decode_catalog(json!([
            {"name": "1", "value": "1"},
            {"name": "2", "value": "2"},
        ]))
        .unwrap();
        assert_eq!(
            options,
            vec![SelectOption::new("1", "1"), SelectOption::new("2", "2")]
        );
    }

    #[test]
    fn test_decode_catalog_empty() {
        assert!(decode_catalog(json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_decode_catalog_rejects_non_array() {
        for payload in [json!(null), json!({"items": []}), json!("1,2,3"), json!(42)] {
            assert_eq!(
                decode_catalog(payload),
                Err(ApiError::InvalidPayload(MALFORMED_CATALOG.to_string()))
            );
        }
    }

    #[test]
    fn test_decode_catalog_drops_malformed_elements() {
        let options = decode_catalog(json!([
            {"name": "a", "value": "1"},
            null,
            {"name": "b"},
            {"name": 3, "value": "3"},
            "c",
            {"name": "d", "value": "4", "extra": true},
        ]))
        .unwrap();
        assert_eq!(
            options,
            vec![SelectOption::new("a", "1"), SelectOption::new("d", "4")]
        );
    }

    #[test]
    fn test_decode_receipt() {
        assert_eq!(
            decode_receipt(r#"{"message":"Selected option 7 accepted successfully."}"#).message,
            "Selected option 7 accepted successfully."
        );
        assert_eq!(decode_receipt("not json").message, "Success");
        assert_eq!(decode_receipt(r#"{"message": 1}"#).message, "Success");
    }

    #[test]
    fn test_submit_error_message() {
        let err = ApiError::Status {
            status: 400,
            body: r#"{"message":"Invalid value"}"#.to_string(),
        };
        assert_eq!(submit_error_message(&err), "Submit failed (400). Invalid value");

        let err = ApiError::Status {
            status: 502,
            body: String::new(),
        };
        assert_eq!(submit_error_message(&err), "Submit failed (502).");

        let err = ApiError::Transport("connection refused".into());
        assert_eq!(submit_error_message(&err), SUBMIT_TRANSPORT_FAILED);
    }

    #[test]
    fn test_fetch_error_message() {
        let err = ApiError::Status {
            status: 404,
            body: "Not Found".into(),
        };
        assert_eq!(fetch_error_message(&err), "HTTP 404");
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("empty".parse::<FetchMode>(), Ok(FetchMode::Empty));
        assert_eq!("error".parse::<SubmitMode>(), Ok(SubmitMode::Error));
        assert!("nope".parse::<FetchMode>().is_err());
        assert_eq!(FetchMode::Null.to_string(), "null");
    }
}
