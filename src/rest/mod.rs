//! REST resource infrastructure for the GoCardless API.
//!
//! This module provides the pieces shared by every resource:
//!
//! - **[`RestResource`] trait**: envelope key, path table and parameter types
//! - **[`ResourceResponse<T>`]** and **[`Page<T>`]**: Deref-based wrappers
//!   carrying rate limit and request ID
//! - **[`Paginator`]**: cursor-following iteration over list endpoints
//! - **Path building**: templates with `{id}` placeholders per operation
//!
//! Individual resources (Customer, Mandate, Payment, Subscription) live in
//! the [`resources`] submodule.
//!
//! # Example
//!
//! ```rust,ignore
//! use gocardless_api::clients::{RequestContext, RequestOptions};
//! use gocardless_api::rest::resources::{Payment, PaymentListParams};
//!
//! let ctx = RequestContext::background();
//!
//! // One page
//! let page = client.list::<Payment>(&ctx, &PaymentListParams::default(), RequestOptions::new()).await?;
//! for payment in page.iter() {
//!     println!("- {} {}", payment.id, payment.amount);
//! }
//!
//! // Every page
//! let all = client
//!     .paginate::<Payment>(PaymentListParams::default(), RequestOptions::new())
//!     .collect_all(&ctx)
//!     .await?;
//!
//! // Actions
//! client.action::<Payment, _>(&ctx, "cancel", "PM123", &(), RequestOptions::new()).await?;
//! ```

mod pagination;
mod path;
mod resource;
mod response;

pub mod resources;

// Public exports
pub use pagination::{Paginator, PaginatorState, AFTER_PARAM};
pub use path::{build_path, get_path, ResourceOperation, ResourcePath};
pub use resource::{resolve_path, serialize_to_query, RestResource};
pub use response::{Page, ResourceResponse};
