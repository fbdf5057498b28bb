//! Response wrappers for REST resource operations.
//!
//! This module provides [`ResourceResponse<T>`] for single resources and
//! [`Page<T>`] for one page of a list. Both carry the rate limit and request
//! ID of the response and implement `Deref` for ergonomic access to the data:
//!
//! ```rust,ignore
//! let payment = client.get::<Payment>(&ctx, "PM123", RequestOptions::new()).await?;
//! println!("{} {}", payment.id, payment.status);  // Deref to Payment
//!
//! let page = client.list::<Payment>(&ctx, &PaymentListParams::default(), RequestOptions::new()).await?;
//! for payment in page.iter() {  // Deref to [Payment]
//!     println!("- {}", payment.id);
//! }
//! println!("next cursor: {:?}", page.next_cursor());
//! ```

use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;

use crate::clients::{Envelope, HttpError, HttpResponse, HttpResponseError, ListMeta, RateLimit};

/// A single resource returned by the API, with response metadata.
///
/// # Example
///
/// ```rust
/// use gocardless_api::rest::ResourceResponse;
/// use gocardless_api::clients::RateLimit;
///
/// let response = ResourceResponse::new("CU123", RateLimit::default(), Some("req-1".to_string()));
///
/// assert_eq!(response.len(), 5);
/// assert_eq!(response.request_id(), Some("req-1"));
/// assert_eq!(response.into_inner(), "CU123");
/// ```
#[derive(Debug, Clone)]
pub struct ResourceResponse<T> {
    data: T,
    rate_limit: RateLimit,
    request_id: Option<String>,
}

impl<T> ResourceResponse<T> {
    /// Creates a new `ResourceResponse` with the given data and metadata.
    #[must_use]
    pub const fn new(data: T, rate_limit: RateLimit, request_id: Option<String>) -> Self {
        Self {
            data,
            rate_limit,
            request_id,
        }
    }

    /// Consumes the response and returns the inner data.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Returns a reference to the inner data.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Returns the rate limit information of the response.
    #[must_use]
    pub const fn rate_limit(&self) -> &RateLimit {
        &self.rate_limit
    }

    /// Returns the request ID, if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}

impl<T: DeserializeOwned> ResourceResponse<T> {
    /// Decodes the payload under `key` from an HTTP response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Response`] if the body carries an `error` object,
    /// [`HttpError::MissingResult`] if `key` is absent, and
    /// [`HttpError::Decode`] if the payload has the wrong shape.
    pub fn from_http_response(response: HttpResponse, key: &str) -> Result<Self, HttpError> {
        match Envelope::<T>::decode(&response.body, key)? {
            Envelope::Error(detail) => Err(HttpError::Response(
                HttpResponseError::from_response(&response, Some(detail)),
            )),
            Envelope::Success { payload, .. } => Ok(Self::new(
                payload,
                response.rate_limit,
                response.request_id().map(String::from),
            )),
        }
    }
}

impl<T> Deref for ResourceResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for ResourceResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

/// One page of a cursor-paginated collection.
#[derive(Debug, Clone)]
pub struct Page<T> {
    items: Vec<T>,
    meta: ListMeta,
    rate_limit: RateLimit,
    request_id: Option<String>,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub const fn new(
        items: Vec<T>,
        meta: ListMeta,
        rate_limit: RateLimit,
        request_id: Option<String>,
    ) -> Self {
        Self {
            items,
            meta,
            rate_limit,
            request_id,
        }
    }

    /// Returns the cursor for the following page, `None` on the last page.
    ///
    /// An empty `after` cursor counts as none.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.meta.next_cursor()
    }

    /// Returns the list metadata.
    #[must_use]
    pub const fn meta(&self) -> &ListMeta {
        &self.meta
    }

    /// Returns the rate limit information of the response.
    #[must_use]
    pub const fn rate_limit(&self) -> &RateLimit {
        &self.rate_limit
    }

    /// Returns the request ID, if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Consumes the page and returns its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Decodes a list payload under `key` from an HTTP response.
    ///
    /// A missing `meta` object is treated as a final page.
    ///
    /// # Errors
    ///
    /// Same as [`ResourceResponse::from_http_response`].
    pub fn from_http_response(response: HttpResponse, key: &str) -> Result<Self, HttpError> {
        match Envelope::<Vec<T>>::decode(&response.body, key)? {
            Envelope::Error(detail) => Err(HttpError::Response(
                HttpResponseError::from_response(&response, Some(detail)),
            )),
            Envelope::Success { payload, meta } => Ok(Self::new(
                payload,
                meta.unwrap_or_default(),
                response.rate_limit,
                response.request_id().map(String::from),
            )),
        }
    }
}

impl<T> Deref for Page<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
