//! Subscription resource implementation.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rest::{ResourceOperation, ResourcePath, RestResource};
use crate::HttpMethod;

use super::{CreatedAtFilter, Metadata};

/// Lifecycle status of a subscription.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Waiting for the customer to approve.
    PendingCustomerApproval,
    /// The customer denied approval.
    CustomerApprovalDenied,
    /// Active and usable.
    #[default]
    Active,
    /// All payments have been created.
    Finished,
    /// Cancelled.
    Cancelled,
    /// Paused; no payments are created.
    Paused,
    /// A value this SDK does not know about.
    #[serde(other)]
    Unknown,
}

/// Unit of a subscription's payment interval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IntervalUnit {
    /// Every week.
    Weekly,
    /// Every month.
    #[default]
    Monthly,
    /// Every year.
    Yearly,
}

/// Resources linked to a subscription.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SubscriptionLinks {
    /// ID of the mandate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mandate: Option<String>,
}

/// A payment a subscription will create.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpcomingPayment {
    /// Date the payment will be charged.
    pub charge_date: NaiveDate,
    /// Amount of the payment, in the lowest denomination.
    pub amount: i64,
}

/// A recurring schedule of payments against a mandate.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Subscription {
    /// Unique identifier, e.g. `SB123`.
    pub id: String,
    /// Amount in the lowest denomination of the currency (e.g. pence).
    pub amount: i64,
    /// ISO 4217 currency code, e.g. `GBP`.
    pub currency: String,
    /// Current status.
    #[serde(default)]
    pub status: SubscriptionStatus,
    /// Name shown to the customer.
    #[serde(default)]
    pub name: Option<String>,
    /// Unit of the payment interval.
    #[serde(default)]
    pub interval_unit: IntervalUnit,
    /// Number of interval units between payments.
    #[serde(default)]
    pub interval: Option<u32>,
    /// Day of the month payments are charged on (`-1` for the last day).
    #[serde(default)]
    pub day_of_month: Option<i32>,
    /// Date of the first payment.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Date on or after which no more payments are created.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// The next payments the subscription will create.
    #[serde(default)]
    pub upcoming_payments: Vec<UpcomingPayment>,
    /// When the subscription was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Up to three key-value pairs of your own data.
    #[serde(default)]
    pub metadata: Metadata,
    /// IDs of related resources.
    #[serde(default)]
    pub links: SubscriptionLinks,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl RestResource for Subscription {
    type CreateParams = SubscriptionCreateParams;
    type ListParams = SubscriptionListParams;
    type UpdateParams = SubscriptionUpdateParams;

    const NAME: &'static str = "Subscription";
    const PLURAL: &'static str = "subscriptions";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[],
            "subscriptions",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::List,
            &[],
            "subscriptions",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Get,
            &["id"],
            "subscriptions/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["id"],
            "subscriptions/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("cancel"),
            &["id"],
            "subscriptions/{id}/actions/cancel",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("pause"),
            &["id"],
            "subscriptions/{id}/actions/pause",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("resume"),
            &["id"],
            "subscriptions/{id}/actions/resume",
        ),
    ];
}

/// Parameters for creating a subscription.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SubscriptionCreateParams {
    /// Amount in the lowest denomination of the currency (e.g. pence).
    pub amount: i64,
    /// ISO 4217 currency code, e.g. `GBP`.
    pub currency: String,
    /// Unit of the payment interval.
    pub interval_unit: IntervalUnit,
    /// Number of interval units between payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    /// Day of the month payments are charged on (`-1` for the last day).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<i32>,
    /// Name shown to the customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Date of the first payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Total number of payments to create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Up to three key-value pairs of your own data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// IDs of related resources.
    pub links: SubscriptionLinks,
}

/// Filters for listing subscriptions.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SubscriptionListParams {
    /// Number of records per page, up to 500.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Cursor: return records after this ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    /// Cursor: return records before this ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Only return records for this customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    /// Only return records for this mandate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandate: Option<String>,
    /// Only return records in these statuses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<SubscriptionStatus>>,
    /// Only return records created in this range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<CreatedAtFilter>,
}

/// Parameters for updating a subscription.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SubscriptionUpdateParams {
    /// Name shown to the customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Amount in the lowest denomination of the currency (e.g. pence).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// Replaces the metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body of the `pause` action. Without `pause_cycles` the subscription
/// stays paused until resumed.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct PauseParams {
    /// Number of cycles to pause for; indefinite when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause_cycles: Option<u32>,
    /// Up to three key-value pairs of your own data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}
