//! Cursor pagination over list endpoints.
//!
//! A [`Paginator`] walks a collection forward one page at a time, passing
//! each page's `meta.cursors.after` as the `after` parameter of the next
//! request. Every page fetch goes through the same retry policy as a single
//! call.
//!
//! ```text
//! NotStarted --fetch--> HasMore(cursor) --fetch--> ... --fetch--> Exhausted
//!      |                                                              ^
//!      +------------------ fetch (no cursor returned) ----------------+
//! ```
//!
//! Once exhausted, [`Paginator::fetch_next`] returns the last page again
//! without touching the network.

use std::collections::HashMap;

use crate::clients::{HttpError, ListMeta, RateLimit, RequestContext, RequestOptions, RestClient};
use crate::rest::{serialize_to_query, Page, RestResource};

/// Query parameter carrying the forward cursor.
pub const AFTER_PARAM: &str = "after";

/// Where a [`Paginator`] is in its walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaginatorState {
    /// No page has been fetched yet.
    NotStarted,
    /// More pages exist; the cursor fetches the next one.
    HasMore(String),
    /// The last page has been fetched.
    Exhausted,
}

/// Lazily walks a cursor-paginated collection.
///
/// A paginator mutates its cursor in place, so each walk belongs to a single
/// owner; start another walk with [`RestClient::paginate`] to iterate again.
///
/// # Example
///
/// ```rust,ignore
/// use gocardless_api::clients::{RequestContext, RequestOptions};
/// use gocardless_api::rest::resources::{Payment, PaymentListParams};
///
/// let ctx = RequestContext::background();
/// let params = PaymentListParams { limit: Some(100), ..Default::default() };
/// let mut pages = client.paginate::<Payment>(params, RequestOptions::new());
///
/// while pages.has_next() {
///     let page = pages.fetch_next(&ctx).await?;
///     for payment in page.iter() {
///         println!("{} {}", payment.id, payment.status);
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Paginator<'a, R: RestResource> {
    client: &'a RestClient,
    params: R::ListParams,
    options: RequestOptions,
    state: PaginatorState,
    last_page: Option<Page<R>>,
}

impl<'a, R: RestResource> Paginator<'a, R> {
    /// Creates a paginator in the [`PaginatorState::NotStarted`] state.
    #[must_use]
    pub fn new(client: &'a RestClient, params: R::ListParams, options: RequestOptions) -> Self {
        Self {
            client,
            params,
            options,
            state: PaginatorState::NotStarted,
            last_page: None,
        }
    }

    /// Returns `true` until the last page has been fetched.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        !matches!(self.state, PaginatorState::Exhausted)
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &PaginatorState {
        &self.state
    }

    /// Fetches the next page.
    ///
    /// When the paginator is exhausted this returns a copy of the last page
    /// and makes no request. A failed fetch leaves the state unchanged, so
    /// the same page can be requested again.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the list parameters cannot be serialized or
    /// the page request fails.
    pub async fn fetch_next(&mut self, ctx: &RequestContext) -> Result<Page<R>, HttpError> {
        let cursor = match &self.state {
            PaginatorState::Exhausted => {
                return Ok(self.last_page.clone().unwrap_or_else(|| {
                    Page::new(Vec::new(), ListMeta::default(), RateLimit::default(), None)
                }));
            }
            PaginatorState::NotStarted => None,
            PaginatorState::HasMore(cursor) => Some(cursor.clone()),
        };

        let mut query: HashMap<String, String> = serialize_to_query(&self.params)?;
        if let Some(cursor) = cursor {
            query.insert(AFTER_PARAM.to_string(), cursor);
        }

        let page = self.client.list_page::<R>(ctx, query, &self.options).await?;

        self.state = match page.next_cursor() {
            Some(after) => PaginatorState::HasMore(after.to_string()),
            None => PaginatorState::Exhausted,
        };
        tracing::debug!(
            "Fetched {} page of {} items, state now {:?}",
            R::PLURAL,
            page.len(),
            self.state
        );

        self.last_page = Some(page.clone());
        Ok(page)
    }

    /// Fetches every remaining page and returns all of their items.
    ///
    /// # Errors
    ///
    /// Returns the first page error; items fetched before it are discarded.
    pub async fn collect_all(&mut self, ctx: &RequestContext) -> Result<Vec<R>, HttpError> {
        let mut items = Vec::new();
        while self.has_next() {
            items.extend(self.fetch_next(ctx).await?);
        }
        Ok(items)
    }
}
