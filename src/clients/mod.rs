//! HTTP client types for GoCardless API communication.
//!
//! This module provides the request-execution core of the SDK: building
//! authenticated requests, classifying failures, retrying within a bounded
//! attempt budget, and decoding response envelopes.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client that runs the attempt loop
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API, with [`RateLimit`] info
//! - [`RetryClassifier`]: Sorts failures into [`RetryDecision`]s
//! - [`RequestContext`]: Caller-supplied cancellation and deadline
//! - [`Envelope`]: Tagged-union decoding of response bodies
//! - [`rest::RestClient`]: Typed create/list/get/update/action operations
//!
//! # Example
//!
//! ```rust,ignore
//! use gocardless_api::clients::{HttpClient, HttpMethod, HttpRequest, RequestContext};
//!
//! let client = HttpClient::new(&config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Post, "customers")
//!     .body(serde_json::json!({"customers": {"email": "tim@example.com"}}))
//!     .build()?;
//!
//! let response = client.request(&RequestContext::background(), request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! Every request gets up to `max_attempts` attempts (default 3):
//!
//! - **Timeouts and connection failures**: retried immediately
//! - **5xx**: retried immediately
//! - **429**: retried immediately if quota remains, otherwise after waiting
//!   until `RateLimit-Reset`
//! - **Other errors**: returned without retry
//!
//! POST, PUT and DELETE requests send the same `Idempotency-Key` on every
//! attempt, so a retried create never produces a duplicate.

mod context;
mod envelope;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod idempotency;
pub mod rest;
mod retry;

pub use context::{Cancelled, RequestContext};
pub use envelope::{
    ApiErrorDetail, Cursors, Envelope, ErrorType, FieldError, ListMeta,
    IDEMPOTENT_CREATION_CONFLICT,
};
pub use errors::{
    status_summary, HttpError, HttpResponseError, InvalidHttpRequestError,
    MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, SDK_NAME, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{parse_http_date, HttpResponse, RateLimit};
pub use idempotency::{
    generate_idempotency_key, generate_idempotency_key_with, IdempotencyKeyError,
    IDEMPOTENCY_KEY_HEADER,
};
pub use retry::{RetryClassifier, RetryDecision};

// Re-export REST client types at the clients module level
pub use rest::{RequestOptions, RestClient};
