//! Webhook ingestion for the GoCardless API SDK.
//!
//! GoCardless delivers events in batches as a signed `POST`. Processing a
//! delivery has three steps, each of which can end it early:
//!
//! 1. **Verify**: check the `Webhook-Signature` HMAC over the raw body
//!    ([`verify_reader`]). Failure replies 498 and no event is processed.
//! 2. **Decode**: parse the `events` array ([`decode_events`]), which only
//!    accepts a [`VerifiedBody`]. Failure replies 400.
//! 3. **Dispatch**: hand events to an [`EventHandler`] in order, stopping at
//!    the first error ([`dispatch`]). Failure replies 500; success 204.
//!
//! [`WebhookProcessor`] runs all three and reports the status to reply with.
//!
//! # Example
//!
//! ```rust
//! use gocardless_api::clients::RequestContext;
//! use gocardless_api::webhooks::{
//!     compute_signature, Event, EventHandler, HandlerError, WebhookProcessor,
//! };
//! use gocardless_api::WebhookSecret;
//!
//! struct Print;
//!
//! #[async_trait::async_trait]
//! impl EventHandler for Print {
//!     async fn handle(&self, _ctx: &RequestContext, event: &Event) -> Result<(), HandlerError> {
//!         println!("{} {}", event.id, event.action);
//!         Ok(())
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let processor = WebhookProcessor::new(WebhookSecret::new("testing").unwrap());
//!
//! let body = br#"{"events":[{"id":"EV1","resource_type":"payments","action":"paid_out","links":{"payment":"PM1"}}]}"#;
//! let signature = compute_signature(body, "testing");
//!
//! let outcome = processor
//!     .process(&RequestContext::background(), body, Some(&signature), &Print)
//!     .await;
//! assert_eq!(outcome.status(), 204);
//!
//! let outcome = processor
//!     .process(&RequestContext::background(), body, Some("00ff"), &Print)
//!     .await;
//! assert_eq!(outcome.status(), 498);
//! # });
//! ```

mod dispatch;
mod errors;
mod types;
mod verification;

pub use dispatch::{dispatch, EventHandler, WebhookOutcome, WebhookProcessor, STATUS_PROCESSED};
pub use errors::{HandlerError, WebhookError};
pub use types::{decode_events, Event, EventDetails, ResourceType};
pub use verification::{
    compute_signature, verify_reader, verify_signature, VerifiedBody, HEADER_SIGNATURE,
    STATUS_INVALID_SIGNATURE,
};
