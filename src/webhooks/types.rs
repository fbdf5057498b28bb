//! Webhook event types for the GoCardless API SDK.
//!
//! A delivery body looks like:
//!
//! ```json
//! {
//!   "events": [
//!     {
//!       "id": "EV123",
//!       "created_at": "2026-10-19T12:00:00.000Z",
//!       "resource_type": "payments",
//!       "action": "confirmed",
//!       "links": { "payment": "PM123" },
//!       "details": { "origin": "gocardless", "cause": "payment_confirmed" },
//!       "metadata": {}
//!     }
//!   ],
//!   "meta": { "webhook_id": "WB123" }
//! }
//! ```
//!
//! Events are decoded only from a [`VerifiedBody`].

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::webhooks::{VerifiedBody, WebhookError};

/// The kind of resource an event is about.
///
/// Unrecognized values decode as [`ResourceType::Unknown`] so that new
/// resource types do not break webhook processing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// `billing_requests`
    BillingRequests,
    /// `creditors`
    Creditors,
    /// `customers`
    Customers,
    /// `instalment_schedules`
    InstalmentSchedules,
    /// `mandates`
    Mandates,
    /// `payments`
    Payments,
    /// `payouts`
    Payouts,
    /// `refunds`
    Refunds,
    /// `subscriptions`
    Subscriptions,
    /// A resource type this SDK does not know about.
    #[serde(other)]
    Unknown,
}

impl ResourceType {
    /// Returns the wire name, e.g. `"payments"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BillingRequests => "billing_requests",
            Self::Creditors => "creditors",
            Self::Customers => "customers",
            Self::InstalmentSchedules => "instalment_schedules",
            Self::Mandates => "mandates",
            Self::Payments => "payments",
            Self::Payouts => "payouts",
            Self::Refunds => "refunds",
            Self::Subscriptions => "subscriptions",
            Self::Unknown => "unknown",
        }
    }

    /// Returns the `links` key holding the ID of the event's resource.
    #[must_use]
    pub const fn link_key(&self) -> Option<&'static str> {
        match self {
            Self::BillingRequests => Some("billing_request"),
            Self::Creditors => Some("creditor"),
            Self::Customers => Some("customer"),
            Self::InstalmentSchedules => Some("instalment_schedule"),
            Self::Mandates => Some("mandate"),
            Self::Payments => Some("payment"),
            Self::Payouts => Some("payout"),
            Self::Refunds => Some("refund"),
            Self::Subscriptions => Some("subscription"),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an event happened.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct EventDetails {
    /// Who triggered the event: `bank`, `api`, `gocardless` or `customer`.
    #[serde(default)]
    pub origin: Option<String>,
    /// Machine-readable cause, e.g. `payment_confirmed`.
    #[serde(default)]
    pub cause: Option<String>,
    /// Human-readable description of the cause.
    #[serde(default)]
    pub description: Option<String>,
    /// Payment scheme that reported the event, for bank-originated events.
    #[serde(default)]
    pub scheme: Option<String>,
    /// Scheme-specific reason code.
    #[serde(default)]
    pub reason_code: Option<String>,
}

/// A single webhook event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    /// Unique event ID, e.g. `EV123`. Stable across redeliveries.
    pub id: String,
    /// When the event was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// The kind of resource the event is about.
    pub resource_type: ResourceType,
    /// What happened, e.g. `confirmed` or `cancelled`.
    pub action: String,
    /// IDs of related resources, keyed by singular resource name.
    #[serde(default)]
    pub links: HashMap<String, String>,
    /// Why the event happened.
    #[serde(default)]
    pub details: Option<EventDetails>,
    /// Metadata attached to the event.
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl Event {
    /// Returns the ID of the resource this event is about, e.g. the payment
    /// ID for a `payments` event.
    #[must_use]
    pub fn resource_id(&self) -> Option<&str> {
        self.resource_type
            .link_key()
            .and_then(|key| self.links.get(key))
            .map(String::as_str)
    }
}

#[derive(Deserialize)]
struct EventsPayload {
    events: Vec<Event>,
}

/// Decodes the events of a verified webhook body, in delivery order.
///
/// # Errors
///
/// Returns [`WebhookError::Decode`] if the body is not JSON or has no
/// `events` array.
pub fn decode_events(body: &VerifiedBody) -> Result<Vec<Event>, WebhookError> {
    let payload: EventsPayload =
        serde_json::from_slice(body.as_bytes()).map_err(WebhookError::Decode)?;
    Ok(payload.events)
}
