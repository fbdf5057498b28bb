//! REST API client for the GoCardless API.
//!
//! This module provides a typed client built on top of the
//! [`HttpClient`](crate::clients::HttpClient). Every resource shares the same
//! five operations; the resource type only decides the envelope key and paths.
//!
//! # Overview
//!
//! - [`RestClient`]: `create()`, `list()`, `paginate()`, `get()`, `update()` and `action()`
//! - [`RequestOptions`]: Per-call attempt budget, idempotency key and headers
//!
//! # Example
//!
//! ```rust,ignore
//! use gocardless_api::{Environment, RestClient};
//! use gocardless_api::clients::{RequestContext, RequestOptions};
//! use gocardless_api::rest::resources::{Customer, CustomerCreateParams};
//!
//! let client = RestClient::from_token("sandbox_xxx", Environment::Sandbox)?;
//! let ctx = RequestContext::background();
//!
//! let params = CustomerCreateParams {
//!     email: Some("tim@example.com".to_string()),
//!     given_name: Some("Tim".to_string()),
//!     ..Default::default()
//! };
//!
//! let customer = client
//!     .create::<Customer>(&ctx, &params, RequestOptions::new().idempotency_key("signup-42"))
//!     .await?;
//! println!("Created {}", customer.id);
//! ```
//!
//! # Idempotent Creation
//!
//! A `create` that the API rejects with `idempotent_creation_conflict` has
//! already succeeded under the same key. By default the client fetches the
//! existing resource from `links.conflicting_resource_id` and returns it as
//! if the create had just happened.

mod client;
mod options;

pub use client::{RestClient, ACTION_DATA_KEY};
pub use options::RequestOptions;
