//! Mandate resource implementation.
//!
//! A mandate is the customer's authorisation to debit their bank account.
//! Mandates support two actions: `cancel` and `reinstate`.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rest::{ResourceOperation, ResourcePath, RestResource};
use crate::HttpMethod;

use super::{CreatedAtFilter, Metadata};

/// Lifecycle status of a mandate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MandateStatus {
    /// Waiting for the customer to approve.
    PendingCustomerApproval,
    /// Created but not yet submitted to the banks.
    #[default]
    PendingSubmission,
    /// Submitted to the banks.
    Submitted,
    /// Active and usable.
    Active,
    /// Suspended by the payer.
    SuspendedByPayer,
    /// Failed.
    Failed,
    /// Cancelled.
    Cancelled,
    /// Expired after a long period without use.
    Expired,
    /// Used for its single permitted payment.
    Consumed,
    /// Blocked from use.
    Blocked,
    /// A status this version of the library does not know about.
    #[serde(other)]
    Unknown,
}

/// Resources linked to a mandate.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MandateLinks {
    /// ID of the customer bank account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_bank_account: Option<String>,
    /// ID of the creditor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditor: Option<String>,
    /// ID of the customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    /// ID of the mandate that replaced this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_mandate: Option<String>,
}

/// Authorisation to collect payments from a customer's bank account.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Mandate {
    /// Unique identifier, e.g. `MD123`.
    pub id: String,
    /// Reference that appears on the customer's bank statement.
    #[serde(default)]
    pub reference: Option<String>,
    /// Current status.
    #[serde(default)]
    pub status: MandateStatus,
    /// Direct Debit scheme, e.g. `bacs` or `sepa_core`.
    #[serde(default)]
    pub scheme: Option<String>,
    /// Earliest date a new payment could be charged.
    #[serde(default)]
    pub next_possible_charge_date: Option<NaiveDate>,
    /// When the mandate was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Up to three key-value pairs of your own data.
    #[serde(default)]
    pub metadata: Metadata,
    /// IDs of related resources.
    #[serde(default)]
    pub links: MandateLinks,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl RestResource for Mandate {
    type CreateParams = MandateCreateParams;
    type ListParams = MandateListParams;
    type UpdateParams = MandateUpdateParams;

    const NAME: &'static str = "Mandate";
    const PLURAL: &'static str = "mandates";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "mandates"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "mandates"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Get,
            &["id"],
            "mandates/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            &["id"],
            "mandates/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("cancel"),
            &["id"],
            "mandates/{id}/actions/cancel",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("reinstate"),
            &["id"],
            "mandates/{id}/actions/reinstate",
        ),
    ];
}

/// Parameters for creating a mandate.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MandateCreateParams {
    /// Direct Debit scheme, e.g. `bacs` or `sepa_core`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Reference that appears on the customer's bank statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Up to three key-value pairs of your own data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// IDs of related resources.
    pub links: MandateLinks,
}

/// Filters for listing mandates.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MandateListParams {
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
    /// Only return mandates on this bank account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_bank_account: Option<String>,
    /// Only return records with this reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Only return records in these statuses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<MandateStatus>>,
    /// Only return records created in this range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<CreatedAtFilter>,
}

/// Parameters for updating a mandate.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MandateUpdateParams {
    /// Replaces the metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}
