//! Response envelope decoding.
//!
//! Every GoCardless response body is a JSON object that carries either a
//! success payload keyed by the resource's plural name, or an `error` object:
//!
//! ```text
//! { "<plural>": {..} | [..], "meta": { "cursors": { "after", "before" }, "limit" } }
//! { "error": { "message", "type", "code", "request_id", "errors": [..] } }
//! ```
//!
//! A non-null `error` always wins, even over a payload key or a 2xx status.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::errors::HttpError;

/// Key of the error object in a response body.
pub const ERROR_KEY: &str = "error";

/// Key of the list metadata object in a response body.
pub const META_KEY: &str = "meta";

/// Field error reason returned when an idempotency key was already used to
/// create a resource.
pub const IDEMPOTENT_CREATION_CONFLICT: &str = "idempotent_creation_conflict";

/// Category of an API error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// An internal error on the platform side.
    Gocardless,
    /// The request was malformed or used the API incorrectly.
    InvalidApiUsage,
    /// The resource is not in a state that allows the operation.
    InvalidState,
    /// One or more parameters failed validation.
    ValidationFailed,
    /// A type this SDK does not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

/// A single field-level error inside an [`ApiErrorDetail`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The offending field, if the error relates to one.
    #[serde(default)]
    pub field: Option<String>,
    /// Human-readable description.
    #[serde(default)]
    pub message: String,
    /// JSON pointer into the request body.
    #[serde(default)]
    pub request_pointer: Option<String>,
    /// Machine-readable reason.
    #[serde(default)]
    pub reason: Option<String>,
    /// Related resource IDs.
    #[serde(default)]
    pub links: HashMap<String, String>,
}

/// The structured `error` object of a response envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    /// Human-readable summary.
    #[serde(default)]
    pub message: String,
    /// Error category.
    #[serde(rename = "type", default)]
    pub error_type: ErrorType,
    /// HTTP status the platform associated with the error.
    #[serde(default)]
    pub code: Option<u16>,
    /// Link to the documentation for this error.
    #[serde(default)]
    pub documentation_url: Option<String>,
    /// Request ID to quote when contacting support.
    #[serde(default)]
    pub request_id: Option<String>,
    /// Field-level errors.
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

impl ApiErrorDetail {
    /// Extracts the error object from a response body, if one is present.
    ///
    /// An error object that does not match the expected shape is still
    /// reported: its JSON text becomes the message.
    #[must_use]
    pub fn from_body(body: &Value) -> Option<Self> {
        let error = body.get(ERROR_KEY).filter(|value| !value.is_null())?;

        Some(Self::deserialize(error).unwrap_or_else(|_| Self {
            message: error
                .as_str()
                .map_or_else(|| error.to_string(), str::to_string),
            ..Self::default()
        }))
    }

    /// Returns the ID of an already-created resource when this error reports
    /// an idempotent creation conflict.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gocardless_api::clients::ApiErrorDetail;
    /// use serde_json::json;
    ///
    /// let body = json!({
    ///     "error": {
    ///         "message": "A resource has already been created with this idempotency key",
    ///         "type": "invalid_state",
    ///         "code": 409,
    ///         "errors": [{
    ///             "reason": "idempotent_creation_conflict",
    ///             "message": "A resource has already been created with this idempotency key",
    ///             "links": { "conflicting_resource_id": "PM123" }
    ///         }]
    ///     }
    /// });
    ///
    /// let detail = ApiErrorDetail::from_body(&body).unwrap();
    /// assert_eq!(detail.conflicting_resource_id(), Some("PM123"));
    /// ```
    #[must_use]
    pub fn conflicting_resource_id(&self) -> Option<&str> {
        self.errors
            .iter()
            .filter(|e| e.reason.as_deref() == Some(IDEMPOTENT_CREATION_CONFLICT))
            .find_map(|e| e.links.get("conflicting_resource_id"))
            .map(String::as_str)
    }
}

/// Cursors returned with a list page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursors {
    /// Cursor for the next page, `None` or empty on the last page.
    #[serde(default)]
    pub after: Option<String>,
    /// Cursor for the previous page.
    #[serde(default)]
    pub before: Option<String>,
}

/// The `meta` object returned with list responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMeta {
    /// Pagination cursors.
    #[serde(default)]
    pub cursors: Cursors,
    /// Page size the server applied.
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ListMeta {
    /// Returns the cursor for the next page, treating an empty string as none.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.cursors.after.as_deref().filter(|after| !after.is_empty())
    }
}

/// A decoded response envelope.
#[derive(Clone, Debug, PartialEq)]
pub enum Envelope<T> {
    /// The body carried an `error` object.
    Error(ApiErrorDetail),
    /// The body carried the expected payload.
    Success {
        /// The payload found under the resource key.
        payload: T,
        /// List metadata, present on list responses.
        meta: Option<ListMeta>,
    },
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decodes `body`, looking for the success payload under `key`.
    ///
    /// The error field is checked first and takes precedence.
    ///
    /// # Errors
    ///
    /// - [`HttpError::MissingResult`] if neither an error nor `key` is present.
    /// - [`HttpError::Decode`] if the payload or `meta` has the wrong shape.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gocardless_api::clients::Envelope;
    /// use serde_json::json;
    ///
    /// let body = json!({ "customers": { "id": "CU123" }, "error": { "message": "nope" } });
    /// let envelope = Envelope::<serde_json::Value>::decode(&body, "customers").unwrap();
    /// assert!(matches!(envelope, Envelope::Error(e) if e.message == "nope"));
    /// ```
    pub fn decode(body: &Value, key: &str) -> Result<Self, HttpError> {
        if let Some(detail) = ApiErrorDetail::from_body(body) {
            return Ok(Self::Error(detail));
        }

        let payload = body
            .get(key)
            .filter(|value| !value.is_null())
            .ok_or_else(|| HttpError::MissingResult {
                key: key.to_string(),
            })?;
        let payload = T::deserialize(payload).map_err(|source| HttpError::Decode {
            context: key.to_string(),
            source,
        })?;

        let meta = match body.get(META_KEY).filter(|value| !value.is_null()) {
            Some(meta) => Some(ListMeta::deserialize(meta).map_err(|source| {
                HttpError::Decode {
                    context: META_KEY.to_string(),
                    source,
                }
            })?),
            None => None,
        };

        Ok(Self::Success { payload, meta })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn test_decode_single_payload() {
        let body = json!({ "customers": { "id": "CU1" } });

        let envelope = Envelope::<Item>::decode(&body, "customers").unwrap();
        assert_eq!(
            envelope,
            Envelope::Success {
                payload: Item {
                    id: "CU1".to_string()
                },
                meta: None,
            }
        );
    }

    #[test]
    fn test_decode_list_payload_with_meta() {
        let body = json!({
            "customers": [{ "id": "CU1" }, { "id": "CU2" }],
            "meta": { "cursors": { "after": "CU2", "before": null }, "limit": 2 }
        });

        let Envelope::Success { payload, meta } =
            Envelope::<Vec<Item>>::decode(&body, "customers").unwrap()
        else {
            panic!("expected success");
        };

        assert_eq!(payload.len(), 2);
        let meta = meta.unwrap();
        assert_eq!(meta.next_cursor(), Some("CU2"));
        assert_eq!(meta.cursors.before, None);
        assert_eq!(meta.limit, Some(2));
    }

    #[test]
    fn test_error_takes_precedence_over_payload() {
        let body = json!({
            "customers": { "id": "CU1" },
            "error": {
                "message": "Validation failed",
                "type": "validation_failed",
                "code": 422,
                "request_id": "req-1",
                "documentation_url": "https://developer.gocardless.com/api-reference#validation_failed",
                "errors": [{
                    "field": "email",
                    "message": "is invalid",
                    "request_pointer": "/customers/email"
                }]
            }
        });

        let Envelope::Error(detail) = Envelope::<Item>::decode(&body, "customers").unwrap() else {
            panic!("expected error");
        };

        assert_eq!(detail.message, "Validation failed");
        assert_eq!(detail.error_type, ErrorType::ValidationFailed);
        assert_eq!(detail.code, Some(422));
        assert_eq!(detail.request_id.as_deref(), Some("req-1"));
        assert_eq!(detail.errors[0].field.as_deref(), Some("email"));
        assert_eq!(
            detail.errors[0].request_pointer.as_deref(),
            Some("/customers/email")
        );
    }

    #[test]
    fn test_null_error_is_ignored() {
        let body = json!({ "customers": { "id": "CU1" }, "error": null });
        assert!(matches!(
            Envelope::<Item>::decode(&body, "customers").unwrap(),
            Envelope::Success { .. }
        ));
    }

    #[test]
    fn test_missing_key_is_missing_result() {
        let body = json!({ "mandates": { "id": "MD1" } });

        let error = Envelope::<Item>::decode(&body, "customers").unwrap_err();
        assert!(matches!(error, HttpError::MissingResult { key } if key == "customers"));

        let error = Envelope::<Item>::decode(&json!({ "customers": null }), "customers")
            .unwrap_err();
        assert!(matches!(error, HttpError::MissingResult { .. }));
    }

    #[test]
    fn test_wrong_shape_is_decode_error() {
        let body = json!({ "customers": { "id": 42 } });

        let error = Envelope::<Item>::decode(&body, "customers").unwrap_err();
        assert!(matches!(error, HttpError::Decode { context, .. } if context == "customers"));
    }

    #[test]
    fn test_unknown_error_type_and_unstructured_error() {
        let detail =
            ApiErrorDetail::from_body(&json!({ "error": { "type": "brand_new", "message": "x" } }))
                .unwrap();
        assert_eq!(detail.error_type, ErrorType::Unknown);

        let detail = ApiErrorDetail::from_body(&json!({ "error": "flat string" })).unwrap();
        assert_eq!(detail.message, "flat string");
        assert!(detail.errors.is_empty());
    }

    #[test]
    fn test_empty_after_cursor_is_no_cursor() {
        let meta: ListMeta =
            serde_json::from_value(json!({ "cursors": { "after": "" }, "limit": 50 })).unwrap();
        assert_eq!(meta.next_cursor(), None);
    }

    #[test]
    fn test_conflicting_resource_id_requires_conflict_reason() {
        let detail = ApiErrorDetail {
            errors: vec![FieldError {
                reason: Some("something_else".to_string()),
                links: HashMap::from([(
                    "conflicting_resource_id".to_string(),
                    "PM1".to_string(),
                )]),
                ..FieldError::default()
            }],
            ..ApiErrorDetail::default()
        };
        assert_eq!(detail.conflicting_resource_id(), None);
    }
}
