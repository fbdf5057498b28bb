//! HTTP-specific error types for the GoCardless API SDK.
//!
//! This module contains error types for HTTP operations, including remote
//! rejections, retry exhaustion, and request validation failures.
//!
//! # Error Handling
//!
//! The SDK uses specific error types for different failure scenarios:
//!
//! - [`HttpResponseError`]: The API rejected the request (carries the structured error detail)
//! - [`MaxHttpRetriesExceededError`]: Transient failures persisted for every attempt
//! - [`InvalidHttpRequestError`]: A request failed validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use gocardless_api::clients::HttpError;
//!
//! match client.request(&ctx, request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => {
//!         println!("API error {}: {}", e.code, e.message);
//!         for field in e.field_errors() {
//!             println!("  {:?}: {}", field.field, field.message);
//!         }
//!     }
//!     Err(HttpError::MaxRetries(e)) => {
//!         println!("Gave up after {} tries: {}", e.tries, e.last);
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::context::Cancelled;
use crate::clients::envelope::{ApiErrorDetail, ErrorType, FieldError};
use crate::clients::http_response::HttpResponse;
use crate::clients::idempotency::IdempotencyKeyError;

/// Error returned when the API rejects a request.
///
/// When the response carried a structured `error` object its message is
/// used; otherwise the message is a status-derived summary such as
/// `HTTP 503 Service Unavailable`.
///
/// # Example
///
/// ```rust
/// use gocardless_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "HTTP 404 Not Found".to_string(),
///     detail: None,
///     request_id: Some("abc-123".to_string()),
/// };
///
/// assert_eq!(error.to_string(), "HTTP 404 Not Found");
/// assert!(error.field_errors().is_empty());
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Human-readable summary.
    pub message: String,
    /// The structured error object, if the response carried one.
    pub detail: Option<ApiErrorDetail>,
    /// Request ID for error reporting.
    pub request_id: Option<String>,
}

impl HttpResponseError {
    /// Builds an error from a response and its (optional) error object.
    #[must_use]
    pub fn from_response(response: &HttpResponse, detail: Option<ApiErrorDetail>) -> Self {
        let message = detail
            .as_ref()
            .map(|d| d.message.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| status_summary(response.code));
        let request_id = detail
            .as_ref()
            .and_then(|d| d.request_id.clone())
            .or_else(|| response.request_id().map(String::from));

        Self {
            code: response.code,
            message,
            detail,
            request_id,
        }
    }

    /// Returns the field-level validation errors, if any.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        self.detail.as_ref().map_or(&[], |d| d.errors.as_slice())
    }

    /// Returns the error category, [`ErrorType::Unknown`] when unstructured.
    #[must_use]
    pub fn error_type(&self) -> ErrorType {
        self.detail
            .as_ref()
            .map_or(ErrorType::Unknown, |d| d.error_type)
    }
}

/// Returns a generic summary for a status code, e.g. `HTTP 429 Too Many Requests`.
#[must_use]
pub fn status_summary(code: u16) -> String {
    let reason = reqwest::StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason());

    match reason {
        Some(reason) => format!("HTTP {code} {reason}"),
        None => format!("HTTP {code}"),
    }
}

/// Error returned when every attempt failed with a retryable error.
///
/// The last observed error is kept as the source.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last error: {last}")]
pub struct MaxHttpRetriesExceededError {
    /// The number of tries that were attempted.
    pub tries: u32,
    /// The error from the final attempt.
    #[source]
    pub last: Box<HttpError>,
}

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent.
///
/// # Example
///
/// ```rust
/// use gocardless_api::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "post".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use post without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A GET or DELETE request was given a body.
    #[error("Cannot send a body with {method}.")]
    UnexpectedBody {
        /// The HTTP method that does not take a body.
        method: String,
    },

    /// A path parameter or template was unusable.
    #[error("Invalid request path: {reason}")]
    InvalidPath {
        /// Why the path was rejected.
        reason: String,
    },

    /// The parameters could not be serialized.
    #[error("Failed to serialize request parameters: {reason}")]
    InvalidParams {
        /// The serializer's message.
        reason: String,
    },

    /// A header name or value is not valid in HTTP.
    #[error("Invalid header: {name}")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },
}

/// Unified error type for all HTTP-related errors.
///
/// Retryable failures (transport errors, 5xx, rate limiting) only surface
/// once the attempt budget is spent. Everything else surfaces immediately.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request failed validation and was never sent.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// An idempotency key could not be generated; nothing was sent.
    #[error(transparent)]
    IdempotencyKey(#[from] IdempotencyKeyError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API rejected the request.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// A response body did not have the expected shape.
    #[error("Failed to decode {context}: {source}")]
    Decode {
        /// What was being decoded.
        context: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The envelope decoded but the expected payload key was absent.
    #[error("Response envelope is missing the `{key}` payload")]
    MissingResult {
        /// The payload key that was expected.
        key: String,
    },

    /// The caller cancelled the request or its deadline passed.
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

impl HttpError {
    /// Returns the HTTP status of the remote rejection behind this error,
    /// looking through retry exhaustion.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => e.last.status(),
            _ => None,
        }
    }

    /// Returns the structured API error behind this error, if any.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiErrorDetail> {
        match self {
            Self::Response(e) => e.detail.as_ref(),
            Self::MaxRetries(e) => e.last.api_error(),
            _ => None,
        }
    }
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn response(code: u16, body: serde_json::Value) -> HttpResponse {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["hdr-1".to_string()]);
        HttpResponse::new(code, headers, body)
    }

    #[test]
    fn test_generic_error_uses_status_summary() {
        let error = HttpResponseError::from_response(&response(503, json!({})), None);

        assert_eq!(error.message, "HTTP 503 Service Unavailable");
        assert_eq!(error.request_id.as_deref(), Some("hdr-1"));
        assert_eq!(error.error_type(), ErrorType::Unknown);
    }

    #[test]
    fn test_status_summary_without_canonical_reason() {
        assert_eq!(status_summary(498), "HTTP 498");
        assert_eq!(status_summary(429), "HTTP 429 Too Many Requests");
    }

    #[test]
    fn test_structured_error_exposes_message_and_fields() {
        let body = json!({
            "error": {
                "message": "Validation failed",
                "type": "validation_failed",
                "code": 422,
                "request_id": "body-1",
                "errors": [
                    { "field": "amount", "message": "must be greater than 0" },
                    { "field": "currency", "message": "is not supported" }
                ]
            }
        });
        let detail = ApiErrorDetail::from_body(&body);
        let error = HttpResponseError::from_response(&response(422, body), detail);

        assert_eq!(error.to_string(), "Validation failed");
        assert_eq!(error.request_id.as_deref(), Some("body-1"));
        assert_eq!(error.error_type(), ErrorType::ValidationFailed);
        assert_eq!(error.field_errors().len(), 2);
        assert_eq!(error.field_errors()[1].field.as_deref(), Some("currency"));
    }

    #[test]
    fn test_max_retries_wraps_last_error() {
        let last = HttpError::Response(HttpResponseError::from_response(
            &response(500, json!({})),
            None,
        ));
        let error = HttpError::MaxRetries(MaxHttpRetriesExceededError {
            tries: 3,
            last: Box::new(last),
        });

        let message = error.to_string();
        assert!(message.contains("Exceeded maximum retry count of 3"));
        assert!(message.contains("HTTP 500 Internal Server Error"));
        assert_eq!(error.status(), Some(500));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_invalid_request_messages() {
        assert_eq!(
            InvalidHttpRequestError::UnexpectedBody {
                method: "get".to_string()
            }
            .to_string(),
            "Cannot send a body with get."
        );
        assert_eq!(
            InvalidHttpRequestError::InvalidPath {
                reason: "empty id".to_string()
            }
            .to_string(),
            "Invalid request path: empty id"
        );
    }

    #[test]
    fn test_missing_result_and_cancelled_messages() {
        let error = HttpError::MissingResult {
            key: "payments".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Response envelope is missing the `payments` payload"
        );

        let error = HttpError::from(Cancelled::DeadlineExceeded);
        assert_eq!(error.to_string(), "Request deadline exceeded");
        assert_eq!(error.status(), None);
    }
}
