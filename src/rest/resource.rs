//! REST Resource trait for GoCardless resources.
//!
//! This module defines the [`RestResource`] trait, the contract between the
//! request-execution core and the per-resource types. A resource supplies
//! only its envelope key, its path table and its parameter types; the
//! generic operations on [`RestClient`](crate::clients::RestClient) do the
//! rest (retry, idempotency, envelope decoding).
//!
//! # Implementing a Resource
//!
//! ```rust,ignore
//! use gocardless_api::rest::{RestResource, ResourcePath, ResourceOperation};
//! use gocardless_api::HttpMethod;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Deserialize)]
//! pub struct CreditorBankAccount {
//!     pub id: String,
//!     pub account_holder_name: String,
//! }
//!
//! impl RestResource for CreditorBankAccount {
//!     type CreateParams = CreditorBankAccountCreateParams;
//!     type ListParams = CreditorBankAccountListParams;
//!     type UpdateParams = ();
//!
//!     const NAME: &'static str = "CreditorBankAccount";
//!     const PLURAL: &'static str = "creditor_bank_accounts";
//!     const PATHS: &'static [ResourcePath] = &[
//!         ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "creditor_bank_accounts"),
//!         ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "creditor_bank_accounts"),
//!         ResourcePath::new(HttpMethod::Get, ResourceOperation::Get, &["id"], "creditor_bank_accounts/{id}"),
//!         ResourcePath::new(
//!             HttpMethod::Post,
//!             ResourceOperation::Action("disable"),
//!             &["id"],
//!             "creditor_bank_accounts/{id}/actions/disable",
//!         ),
//!     ];
//! }
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::clients::{HttpMethod, InvalidHttpRequestError};
use crate::rest::{build_path, get_path, ResourceOperation, ResourcePath};

/// A GoCardless REST resource.
///
/// # Associated Types
///
/// - `CreateParams`: Body of `create` calls
/// - `ListParams`: Query of `list` calls (filters, `limit`, cursors)
/// - `UpdateParams`: Body of `update` calls (use `()` if not updatable)
///
/// # Associated Constants
///
/// - `NAME`: The singular resource name, used in error messages
/// - `PLURAL`: The envelope key for requests and responses (e.g., "payments")
/// - `PATHS`: Available paths for the operations the resource supports
pub trait RestResource: DeserializeOwned + Clone + fmt::Debug + Send + Sync + Sized {
    /// Parameters for `create` operations.
    type CreateParams: Serialize + Send + Sync;

    /// Parameters for `list` operations.
    type ListParams: Serialize + Default + Clone + fmt::Debug + Send + Sync;

    /// Parameters for `update` operations.
    type UpdateParams: Serialize + Send + Sync;

    /// The singular name of the resource (e.g., "Payment").
    const NAME: &'static str;

    /// The plural name keying the request and response envelopes.
    const PLURAL: &'static str;

    /// Available paths for this resource.
    const PATHS: &'static [ResourcePath];
}

/// Resolves the method and concrete path of an operation on `R`.
///
/// # Errors
///
/// Returns [`InvalidHttpRequestError::InvalidPath`] if `R` has no path for
/// the operation or an ID is empty.
#[allow(clippy::implicit_hasher)]
pub fn resolve_path<R: RestResource>(
    operation: ResourceOperation,
    ids: &HashMap<&str, &str>,
) -> Result<(HttpMethod, String), InvalidHttpRequestError> {
    if let Some((name, _)) = ids.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(InvalidHttpRequestError::InvalidPath {
            reason: format!("{} {name} must not be empty", R::NAME),
        });
    }

    let available_ids: Vec<&str> = ids.keys().copied().collect();
    let path = get_path(R::PATHS, operation, &available_ids).ok_or_else(|| {
        InvalidHttpRequestError::InvalidPath {
            reason: format!("{} does not support {operation}", R::NAME),
        }
    })?;

    Ok((path.http_method, build_path(path.template, ids)))
}

/// Serializes a params struct to a query parameter map.
///
/// `None` fields are skipped, nested objects are flattened as `key[sub]`
/// (e.g. `created_at[gte]`), and arrays become comma-separated lists.
///
/// # Errors
///
/// Returns [`InvalidHttpRequestError::InvalidParams`] if `params` cannot be
/// serialized or is not a JSON object.
///
/// # Example
///
/// ```rust
/// use gocardless_api::rest::serialize_to_query;
/// use serde_json::json;
///
/// let query = serialize_to_query(&json!({
///     "limit": 50,
///     "created_at": { "gte": "2026-01-01T00:00:00Z" },
///     "status": ["pending_submission", "submitted"],
///     "after": null,
/// }))
/// .unwrap();
///
/// assert_eq!(query["limit"], "50");
/// assert_eq!(query["created_at[gte]"], "2026-01-01T00:00:00Z");
/// assert_eq!(query["status"], "pending_submission,submitted");
/// assert!(!query.contains_key("after"));
/// ```
pub fn serialize_to_query<T: Serialize + ?Sized>(
    params: &T,
) -> Result<HashMap<String, String>, InvalidHttpRequestError> {
    let value = serde_json::to_value(params).map_err(|e| InvalidHttpRequestError::InvalidParams {
        reason: e.to_string(),
    })?;

    let mut query = HashMap::new();

    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, val) in map {
                flatten_into(&mut query, key, val);
            }
        }
        other => {
            return Err(InvalidHttpRequestError::InvalidParams {
                reason: format!("expected an object, got {other}"),
            });
        }
    }

    Ok(query)
}

fn flatten_into(query: &mut HashMap<String, String>, key: String, value: Value) {
    match value {
        Value::Null => {}
        Value::String(s) => {
            query.insert(key, s);
        }
        Value::Number(n) => {
            query.insert(key, n.to_string());
        }
        Value::Bool(b) => {
            query.insert(key, b.to_string());
        }
        Value::Array(arr) => {
            let values: Vec<String> = arr
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    Value::Number(n) => Some(n.to_string()),
                    Value::Bool(b) => Some(b.to_string()),
                    _ => None,
                })
                .collect();
            if !values.is_empty() {
                query.insert(key, values.join(","));
            }
        }
        Value::Object(map) => {
            for (sub, val) in map {
                flatten_into(query, format!("{key}[{sub}]"), val);
            }
        }
    }
}
