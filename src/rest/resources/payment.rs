//! Payment resource implementation.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rest::{ResourceOperation, ResourcePath, RestResource};
use crate::HttpMethod;

use super::{CreatedAtFilter, Metadata};

/// Lifecycle status of a payment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Waiting for the customer to approve.
    PendingCustomerApproval,
    /// Created but not yet submitted to the banks.
    #[default]
    PendingSubmission,
    /// Submitted to the banks.
    Submitted,
    /// Collected from the customer.
    Confirmed,
    /// Paid out to the creditor.
    PaidOut,
    /// Cancelled.
    Cancelled,
    /// The customer denied approval.
    CustomerApprovalDenied,
    /// Failed.
    Failed,
    /// Charged back by the customer.
    ChargedBack,
    /// A value this SDK does not know about.
    #[serde(other)]
    Unknown,
}

/// Resources linked to a payment.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PaymentLinks {
    /// ID of the mandate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mandate: Option<String>,
    /// ID of the creditor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditor: Option<String>,
    /// ID of the subscription that created this payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
    /// ID of the payout this payment was paid out in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout: Option<String>,
}

/// A single collection from a customer's bank account.
///
/// `amount` is in the lowest denomination of `currency` (e.g. pence).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Payment {
    /// Unique identifier, e.g. `PM123`.
    pub id: String,
    /// Amount in the lowest denomination of the currency (e.g. pence).
    pub amount: i64,
    /// ISO 4217 currency code, e.g. `GBP`.
    pub currency: String,
    /// Current status.
    #[serde(default)]
    pub status: PaymentStatus,
    /// Date the payment is (or was) collected.
    #[serde(default)]
    pub charge_date: Option<NaiveDate>,
    /// Reference that appears on the customer's bank statement.
    #[serde(default)]
    pub reference: Option<String>,
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Total amount refunded so far.
    #[serde(default)]
    pub amount_refunded: Option<i64>,
    /// When the payment was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Up to three key-value pairs of your own data.
    #[serde(default)]
    pub metadata: Metadata,
    /// IDs of related resources.
    #[serde(default)]
    pub links: PaymentLinks,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl RestResource for Payment {
    type CreateParams = PaymentCreateParams;
    type ListParams = PaymentListParams;
    type UpdateParams = PaymentUpdateParams;

    const NAME: &'static str = "Payment";
    const PLURAL: &'static str = "payments";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "payments"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "payments"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Get,
            &["id"],
            "payments/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["id"],
            "payments/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("cancel"),
            &["id"],
            "payments/{id}/actions/cancel",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("retry"),
            &["id"],
            "payments/{id}/actions/retry",
        ),
    ];
}

/// Parameters for creating a payment.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PaymentCreateParams {
    /// Amount in the lowest denomination of the currency (e.g. pence).
    pub amount: i64,
    /// ISO 4217 currency code, e.g. `GBP`.
    pub currency: String,
    /// Date the payment is (or was) collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_date: Option<NaiveDate>,
    /// Reference that appears on the customer's bank statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fee taken by the partner app, in the lowest denomination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_fee: Option<i64>,
    /// Whether a failed payment is retried automatically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_if_possible: Option<bool>,
    /// Up to three key-value pairs of your own data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// IDs of related resources.
    pub links: PaymentLinks,
}

/// Filters for listing payments.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PaymentListParams {
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
    /// Only return payments created by this subscription.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
    /// Only return records in these statuses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    /// Only return records in this currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Only return records created in this range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<CreatedAtFilter>,
}

/// Parameters for updating a payment.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PaymentUpdateParams {
    /// Replaces the metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// Whether a failed payment is retried automatically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_if_possible: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::{resolve_path, serialize_to_query};
    use serde_json::json;

    #[test]
    fn test_payment_deserialization() {
        let payment: Payment = serde_json::from_value(json!({
            "id": "PM123",
            "created_at": "2026-10-01T09:00:00.000Z",
            "charge_date": "2026-10-06",
            "amount": 1000,
            "amount_refunded": 0,
            "currency": "GBP",
            "status": "pending_submission",
            "reference": "WINEBOX001",
            "metadata": { "order_dispatch_date": "2026-10-22" },
            "links": { "mandate": "MD123", "creditor": "CR123" },
            "fx": { "fx_currency": "EUR" }
        }))
        .unwrap();

        assert_eq!(payment.amount, 1000);
        assert_eq!(payment.status, PaymentStatus::PendingSubmission);
        assert_eq!(payment.charge_date, NaiveDate::from_ymd_opt(2026, 10, 6));
        assert_eq!(payment.links.mandate.as_deref(), Some("MD123"));
        assert!(payment.links.subscription.is_none());
        assert!(payment.extra.contains_key("fx"));
    }

    #[test]
    fn test_create_params_serialization() {
        let params = PaymentCreateParams {
            amount: 1500,
            currency: "EUR".to_string(),
            charge_date: NaiveDate::from_ymd_opt(2026, 11, 1),
            links: PaymentLinks {
                mandate: Some("MD123".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            json!({
                "amount": 1500,
                "currency": "EUR",
                "charge_date": "2026-11-01",
                "links": { "mandate": "MD123" }
            })
        );
    }

    #[test]
    fn test_payment_action_paths() {
        let ids = HashMap::from([("id", "PM123")]);

        let (method, path) =
            resolve_path::<Payment>(ResourceOperation::Action("retry"), &ids).unwrap();
        assert_eq!(method, HttpMethod::Post);
        assert_eq!(path, "payments/PM123/actions/retry");

        let (_, path) = resolve_path::<Payment>(ResourceOperation::Action("cancel"), &ids).unwrap();
        assert_eq!(path, "payments/PM123/actions/cancel");
    }

    #[test]
    fn test_list_params_status_filter() {
        let params = PaymentListParams {
            mandate: Some("MD123".to_string()),
            status: Some(PaymentStatus::PaidOut),
            ..Default::default()
        };

        let query = serialize_to_query(&params).unwrap();
        assert_eq!(query["status"], "paid_out");
        assert_eq!(query["mandate"], "MD123");
    }
}
