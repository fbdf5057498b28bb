//! GoCardless REST resource implementations.
//!
//! Each resource is a plain data struct plus a [`RestResource`] impl naming
//! its envelope key and path table. The operations themselves live on
//! [`RestClient`](crate::clients::RestClient) and work for any resource.
//!
//! Resource structs carry the commonly used fields; anything else the API
//! returns is kept in the flattened `extra` map rather than dropped.
//!
//! # Available Resources
//!
//! | Resource | Actions |
//! |----------|---------|
//! | [`Customer`] | none |
//! | [`Mandate`] | `cancel`, `reinstate` |
//! | [`Payment`] | `cancel`, `retry` |
//! | [`Subscription`] | `cancel`, `pause`, `resume` |
//!
//! # Example
//!
//! ```rust,ignore
//! use gocardless_api::clients::{RequestContext, RequestOptions};
//! use gocardless_api::rest::resources::{Mandate, MandateListParams, MandateStatus};
//!
//! let params = MandateListParams {
//!     customer: Some("CU123".to_string()),
//!     status: Some(vec![MandateStatus::Active]),
//!     ..Default::default()
//! };
//! let mandates = client.list::<Mandate>(&ctx, &params, RequestOptions::new()).await?;
//! ```
//!
//! [`RestResource`]: crate::rest::RestResource

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

mod customer;
mod mandate;
mod payment;
mod subscription;

pub use customer::{Customer, CustomerCreateParams, CustomerListParams, CustomerUpdateParams};
pub use mandate::{
    Mandate, MandateCreateParams, MandateLinks, MandateListParams, MandateStatus,
    MandateUpdateParams,
};
pub use payment::{
    Payment, PaymentCreateParams, PaymentLinks, PaymentListParams, PaymentStatus,
    PaymentUpdateParams,
};
pub use subscription::{
    IntervalUnit, PauseParams, Subscription, SubscriptionCreateParams, SubscriptionLinks,
    SubscriptionListParams, SubscriptionStatus, SubscriptionUpdateParams, UpcomingPayment,
};

/// Free-form key/value pairs attached to a resource (up to 3 keys).
pub type Metadata = HashMap<String, String>;

/// Range filter on `created_at`, serialized as `created_at[gt]` etc.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CreatedAtFilter {
    /// Strictly after this timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<String>,
    /// On or after this timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<String>,
    /// Strictly before this timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<String>,
    /// On or before this timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<String>,
}

/// Body of actions that accept only metadata (`cancel`, `retry`,
/// `reinstate`, `resume`).
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct ActionParams {
    /// Up to three key-value pairs of your own data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::serialize_to_query;

    #[test]
    fn test_created_at_filter_flattens_into_query() {
        #[derive(Serialize)]
        struct Params {
            created_at: CreatedAtFilter,
        }

        let params = Params {
            created_at: CreatedAtFilter {
                gte: Some("2026-01-01T00:00:00Z".to_string()),
                ..Default::default()
            },
        };

        let query = serialize_to_query(&params).unwrap();
        assert_eq!(query.len(), 1);
        assert_eq!(query["created_at[gte]"], "2026-01-01T00:00:00Z");
    }

    #[test]
    fn test_empty_action_params_serialize_to_empty_object() {
        let value = serde_json::to_value(ActionParams::default()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }
}
