//! Webhook-specific error types for the GoCardless API SDK.
//!
//! Every [`WebhookError`] maps onto the HTTP status the webhook endpoint
//! should reply with, via [`WebhookError::status_code`]:
//!
//! | Variant | Status |
//! |---------|--------|
//! | [`WebhookError::InvalidSignature`] | 498 |
//! | [`WebhookError::Read`], [`WebhookError::Decode`] | 400 |
//! | [`WebhookError::Handler`], [`WebhookError::Cancelled`] | 500 |
//!
//! A 498 or 400 tells GoCardless not to bother retrying the delivery; a 500
//! asks for the whole batch to be sent again later.

use thiserror::Error;

use crate::clients::Cancelled;
use crate::webhooks::verification::STATUS_INVALID_SIGNATURE;

/// Boxed error returned by an [`EventHandler`](crate::webhooks::EventHandler).
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for webhook verification, decoding and dispatch.
///
/// # Example
///
/// ```rust
/// use gocardless_api::webhooks::WebhookError;
///
/// let error = WebhookError::InvalidSignature;
/// assert_eq!(error.status_code(), 498);
/// assert_eq!(error.to_string(), "Webhook signature verification failed");
/// ```
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The `Webhook-Signature` header was missing, malformed or did not match
    /// the body.
    ///
    /// The message is intentionally generic to avoid leaking security details.
    #[error("Webhook signature verification failed")]
    InvalidSignature,

    /// The request body could not be read.
    #[error("Failed to read webhook body: {0}")]
    Read(#[from] std::io::Error),

    /// The body was correctly signed but is not a valid events payload.
    #[error("Failed to decode webhook events: {0}")]
    Decode(#[source] serde_json::Error),

    /// A handler rejected an event. Events after it were not dispatched.
    #[error("Handler failed for event {event_id}: {source}")]
    Handler {
        /// ID of the event the handler failed on.
        event_id: String,
        /// The handler's own error, unchanged.
        #[source]
        source: HandlerError,
    },

    /// Dispatch stopped because the caller's context ended.
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

impl WebhookError {
    /// Returns the HTTP status the webhook endpoint should reply with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidSignature => STATUS_INVALID_SIGNATURE,
            Self::Read(_) | Self::Decode(_) => 400,
            Self::Handler { .. } | Self::Cancelled(_) => 500,
        }
    }

    /// Returns the failing event's ID for handler errors.
    #[must_use]
    pub fn event_id(&self) -> Option<&str> {
        match self {
            Self::Handler { event_id, .. } => Some(event_id),
            _ => None,
        }
    }
}

// Verify WebhookError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebhookError>();
};
