//! Path building infrastructure for REST resources.
//!
//! Each resource declares a table of [`ResourcePath`]s, one per operation it
//! supports. The client picks the path for an operation with [`get_path`]
//! and fills in identity placeholders with [`build_path`].
//!
//! # Example
//!
//! ```rust
//! use gocardless_api::rest::{ResourcePath, ResourceOperation, get_path, build_path};
//! use gocardless_api::HttpMethod;
//! use std::collections::HashMap;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(HttpMethod::Get, ResourceOperation::Get, &["id"], "payments/{id}"),
//!     ResourcePath::new(
//!         HttpMethod::Post,
//!         ResourceOperation::Action("cancel"),
//!         &["id"],
//!         "payments/{id}/actions/cancel",
//!     ),
//! ];
//!
//! let path = get_path(PATHS, ResourceOperation::Action("cancel"), &["id"]).unwrap();
//!
//! let mut ids = HashMap::new();
//! ids.insert("id", "PM123");
//! assert_eq!(build_path(path.template, &ids), "payments/PM123/actions/cancel");
//! ```

use crate::clients::HttpMethod;
use std::collections::HashMap;
use std::fmt::{self, Display};

/// Operations that can be performed on a REST resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Create a new resource (POST /resources).
    Create,
    /// List resources, one page at a time (GET /resources).
    List,
    /// Fetch a single resource by ID (GET /resources/{id}).
    Get,
    /// Update an existing resource (PUT /resources/{id}).
    Update,
    /// A named state transition (POST /resources/{id}/actions/{name}).
    Action(&'static str),
}

impl ResourceOperation {
    /// Returns the default HTTP method for this operation.
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::List | Self::Get => HttpMethod::Get,
            Self::Create | Self::Action(_) => HttpMethod::Post,
            Self::Update => HttpMethod::Put,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::List => "list",
            Self::Get => "get",
            Self::Update => "update",
            Self::Action(name) => *name,
        }
    }
}

impl Display for ResourceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path configuration for a REST resource operation.
///
/// Templates use `{name}` placeholders, e.g. `mandates/{id}/actions/reinstate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The HTTP method for this path.
    pub http_method: HttpMethod,
    /// The operation this path is used for.
    pub operation: ResourceOperation,
    /// Required ID parameters in order.
    pub ids: &'static [&'static str],
    /// The URL template with `{id}` placeholders.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`.
    ///
    /// This is a `const fn` to allow paths to be defined as constants.
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        ids: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            http_method,
            operation,
            ids,
            template,
        }
    }

    /// Returns the number of required IDs for this path.
    #[must_use]
    pub const fn id_count(&self) -> usize {
        self.ids.len()
    }

    /// Checks if all required IDs are available.
    #[must_use]
    pub fn matches_ids(&self, available_ids: &[&str]) -> bool {
        self.ids.iter().all(|id| available_ids.contains(id))
    }
}

/// Selects the best matching path for an operation.
///
/// Among the paths for `operation` whose IDs are all available, the one
/// requiring the most IDs wins.
#[must_use]
pub fn get_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    available_ids: &[&str],
) -> Option<&'a ResourcePath> {
    paths
        .iter()
        .filter(|p| p.operation == operation)
        .filter(|p| p.matches_ids(available_ids))
        .max_by_key(|p| p.id_count())
}

/// Builds a URL path from a template by interpolating IDs.
///
/// Values are percent-encoded so an ID can never add path segments.
/// Placeholders with no value are left untouched.
///
/// # Example
///
/// ```rust
/// use gocardless_api::rest::build_path;
/// use std::collections::HashMap;
///
/// let mut ids = HashMap::new();
/// ids.insert("id", "CU 1/2");
///
/// assert_eq!(build_path("customers/{id}", &ids), "customers/CU%201%2F2");
/// ```
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, ids: &HashMap<&str, V>) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        let encoded = urlencoding::encode(&value.to_string()).into_owned();
        result = result.replace(&placeholder, &encoded);
    }

    result
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};
