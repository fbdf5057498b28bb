//! # GoCardless API Rust SDK
//!
//! A Rust SDK for the GoCardless API, providing type-safe configuration,
//! a retrying HTTP client with idempotent creates, cursor pagination, and
//! webhook verification and dispatch.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`GoCardlessConfig`] and [`GoCardlessConfigBuilder`]
//! - Validated newtypes for credentials and URLs
//! - Async HTTP client with bounded retries and rate limit handling
//! - Idempotency keys reused across every attempt of a mutating request
//! - Generic create / list / get / update / action operations via [`RestClient`]
//! - Cursor pagination via [`rest::Paginator`]
//! - Webhook signature verification and fail-fast event dispatch via [`webhooks`]
//!
//! ## Quick Start
//!
//! ```rust
//! use gocardless_api::{GoCardlessConfig, AccessToken, Environment};
//!
//! // Create configuration using the builder pattern
//! let config = GoCardlessConfig::builder()
//!     .access_token(AccessToken::new("sandbox_token").unwrap())
//!     .environment(Environment::Sandbox)
//!     .max_attempts(5)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url(), "https://api-sandbox.gocardless.com");
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use gocardless_api::{Environment, RestClient};
//! use gocardless_api::clients::{RequestContext, RequestOptions};
//! use gocardless_api::rest::resources::{Payment, PaymentCreateParams, PaymentLinks};
//!
//! let client = RestClient::from_token("sandbox_xxx", Environment::Sandbox)?;
//! let ctx = RequestContext::background().with_timeout(std::time::Duration::from_secs(60));
//!
//! let params = PaymentCreateParams {
//!     amount: 1000,
//!     currency: "GBP".to_string(),
//!     links: PaymentLinks { mandate: Some("MD123".to_string()), ..Default::default() },
//!     ..Default::default()
//! };
//!
//! // Retried up to 3 times with the same Idempotency-Key
//! let payment = client.create::<Payment>(&ctx, &params, RequestOptions::new()).await?;
//! println!("{} {:?}", payment.id, payment.status);
//! ```
//!
//! ## Receiving Webhooks
//!
//! ```rust,ignore
//! use gocardless_api::webhooks::{WebhookProcessor, HEADER_SIGNATURE};
//!
//! let processor = WebhookProcessor::new(WebhookSecret::new(secret)?);
//! let outcome = processor
//!     .process(&ctx, &body, headers.get(HEADER_SIGNATURE), &my_handler)
//!     .await;
//! // Reply with outcome.status(): 204, 400, 498 or 500
//! ```
//!
//! ## Logging
//!
//! The SDK emits [`tracing`] events (retries, rate-limit waits, signature
//! failures) and never installs a subscriber. Access tokens and webhook
//! secrets are masked in `Debug` output.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All client types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Cancellable**: Every network wait and rate-limit sleep honours a
//!   [`clients::RequestContext`]

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;
pub mod webhooks;

// Re-export public types at crate root for convenience
pub use config::{
    AccessToken, BaseUrl, Environment, GoCardlessConfig, GoCardlessConfigBuilder, WebhookSecret,
    API_VERSION,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError, RateLimit,
    RequestContext, RequestOptions, RestClient,
};
