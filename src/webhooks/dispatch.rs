//! Fail-fast dispatch of webhook events.
//!
//! Events in a delivery are handed to an [`EventHandler`] strictly in order.
//! The first handler error stops the batch: later events are not dispatched,
//! and the endpoint replies 500 so GoCardless resends the whole delivery.
//! Handlers must therefore be idempotent per event ID.
//!
//! # Example
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use gocardless_api::clients::RequestContext;
//! use gocardless_api::webhooks::{Event, EventHandler, HandlerError, WebhookProcessor};
//! use gocardless_api::WebhookSecret;
//!
//! struct Ledger;
//!
//! #[async_trait]
//! impl EventHandler for Ledger {
//!     async fn handle(&self, _ctx: &RequestContext, event: &Event) -> Result<(), HandlerError> {
//!         println!("{} {} {:?}", event.resource_type, event.action, event.resource_id());
//!         Ok(())
//!     }
//! }
//!
//! let processor = WebhookProcessor::new(WebhookSecret::new(secret)?);
//! let outcome = processor
//!     .process(&ctx, &body, signature_header.as_deref(), &Ledger)
//!     .await;
//! reply_with_status(outcome.status());
//! ```

use async_trait::async_trait;

use crate::clients::RequestContext;
use crate::config::WebhookSecret;
use crate::webhooks::{decode_events, verify_reader, Event, HandlerError, WebhookError};

/// Status replied when every event was handled.
pub const STATUS_PROCESSED: u16 = 204;

/// Application code that reacts to webhook events.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handles one event. Returning an error stops the batch.
    ///
    /// `ctx` is the context the delivery is processed under; pass it on to
    /// API calls made while handling the event.
    async fn handle(&self, ctx: &RequestContext, event: &Event) -> Result<(), HandlerError>;
}

/// Dispatches `events` to `handler` in order, stopping at the first failure.
///
/// The context is checked before each event; a handler already running is
/// never interrupted.
///
/// # Errors
///
/// - [`WebhookError::Handler`] with the failing event's ID and the handler's
///   error unchanged
/// - [`WebhookError::Cancelled`] if the context ended between events
pub async fn dispatch<H: EventHandler + ?Sized>(
    ctx: &RequestContext,
    events: &[Event],
    handler: &H,
) -> Result<(), WebhookError> {
    for event in events {
        ctx.check()?;

        tracing::debug!(
            "Dispatching webhook event {} ({} {})",
            event.id,
            event.resource_type,
            event.action
        );

        if let Err(source) = handler.handle(ctx, event).await {
            tracing::warn!("Webhook handler failed on event {}: {}", event.id, source);
            return Err(WebhookError::Handler {
                event_id: event.id.clone(),
                source,
            });
        }
    }
    Ok(())
}

/// The result of processing one webhook delivery.
#[derive(Debug)]
pub struct WebhookOutcome {
    events: usize,
    error: Option<WebhookError>,
}

impl WebhookOutcome {
    /// Returns the HTTP status to reply with: 204, 400, 498 or 500.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.error
            .as_ref()
            .map_or(STATUS_PROCESSED, WebhookError::status_code)
    }

    /// Returns `true` if every event was handled.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Returns the number of events in the delivery (zero if it was not
    /// verified or decoded).
    #[must_use]
    pub const fn event_count(&self) -> usize {
        self.events
    }

    /// Returns the error that ended processing, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&WebhookError> {
        self.error.as_ref()
    }

    /// Consumes the outcome, returning `Ok(())` or the error.
    ///
    /// # Errors
    ///
    /// Returns the [`WebhookError`] that ended processing.
    pub fn into_result(self) -> Result<(), WebhookError> {
        self.error.map_or(Ok(()), Err)
    }
}

/// Verifies, decodes and dispatches webhook deliveries for one endpoint.
///
/// # Example
///
/// ```rust
/// use gocardless_api::webhooks::WebhookProcessor;
/// use gocardless_api::WebhookSecret;
///
/// let processor = WebhookProcessor::new(WebhookSecret::new("testing").unwrap());
/// assert_eq!(format!("{:?}", processor), "WebhookProcessor { secret: WebhookSecret(*****) }");
/// ```
#[derive(Debug, Clone)]
pub struct WebhookProcessor {
    secret: WebhookSecret,
}

impl WebhookProcessor {
    /// Creates a processor for the endpoint signed with `secret`.
    #[must_use]
    pub const fn new(secret: WebhookSecret) -> Self {
        Self { secret }
    }

    /// Processes one delivery.
    ///
    /// `signature` is the `Webhook-Signature` header value, `None` if absent.
    /// No event reaches `handler` unless the signature verifies.
    pub async fn process<H: EventHandler + ?Sized>(
        &self,
        ctx: &RequestContext,
        body: &[u8],
        signature: Option<&str>,
        handler: &H,
    ) -> WebhookOutcome {
        let events = match self.verify_and_decode(body, signature) {
            Ok(events) => events,
            Err(error) => {
                if matches!(error, WebhookError::InvalidSignature) {
                    tracing::warn!("Rejected webhook delivery with an invalid signature");
                } else {
                    tracing::warn!("Rejected webhook delivery: {}", error);
                }
                return WebhookOutcome {
                    events: 0,
                    error: Some(error),
                };
            }
        };

        let error = dispatch(ctx, &events, handler).await.err();
        WebhookOutcome {
            events: events.len(),
            error,
        }
    }

    fn verify_and_decode(
        &self,
        body: &[u8],
        signature: Option<&str>,
    ) -> Result<Vec<Event>, WebhookError> {
        let signature = signature.ok_or(WebhookError::InvalidSignature)?;
        let verified = verify_reader(body, signature, self.secret.as_ref())?;
        decode_events(&verified)
    }
}
