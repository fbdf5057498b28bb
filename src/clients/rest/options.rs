//! Per-call options for REST operations.

use std::collections::HashMap;

/// Options applied to a single REST call.
///
/// # Defaults
///
/// - `attempts`: `None` (the client's configured `max_attempts`)
/// - `idempotency_key`: `None` (generated per call)
/// - `headers`: empty
/// - `follow_conflicts`: `true`
///
/// # Example
///
/// ```rust
/// use gocardless_api::clients::RequestOptions;
///
/// let options = RequestOptions::new()
///     .attempts(5)
///     .idempotency_key("order-8841")
///     .header("Accept-Language", "fr");
///
/// assert_eq!(options.attempts_override(), Some(5));
/// assert_eq!(options.idempotency_key_override(), Some("order-8841"));
/// ```
#[derive(Clone, Debug)]
pub struct RequestOptions {
    attempts: Option<u32>,
    idempotency_key: Option<String>,
    headers: HashMap<String, String>,
    follow_conflicts: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            attempts: None,
            idempotency_key: None,
            headers: HashMap::new(),
            follow_conflicts: true,
        }
    }
}

impl RequestOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the attempt budget for this call.
    #[must_use]
    pub const fn attempts(mut self, attempts: u32) -> Self {
        self.attempts = Some(attempts);
        self
    }

    /// Supplies the idempotency key for a mutating call.
    #[must_use]
    pub fn idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Adds a header to the call.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Controls whether `create` fetches the existing resource when the API
    /// reports an idempotent creation conflict.
    #[must_use]
    pub const fn follow_conflicts(mut self, follow: bool) -> Self {
        self.follow_conflicts = follow;
        self
    }

    /// Returns the attempt budget override, if any.
    #[must_use]
    pub const fn attempts_override(&self) -> Option<u32> {
        self.attempts
    }

    /// Returns the caller-supplied idempotency key, if any.
    #[must_use]
    pub fn idempotency_key_override(&self) -> Option<&str> {
        self.idempotency_key.as_deref()
    }

    /// Returns the extra headers.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns whether idempotent creation conflicts are followed.
    #[must_use]
    pub const fn follows_conflicts(&self) -> bool {
        self.follow_conflicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RequestOptions::default();

        assert!(options.attempts_override().is_none());
        assert!(options.idempotency_key_override().is_none());
        assert!(options.headers().is_empty());
        assert!(options.follows_conflicts());
    }

    #[test]
    fn test_builder_methods() {
        let options = RequestOptions::new()
            .attempts(1)
            .follow_conflicts(false)
            .header("X-Trace", "abc");

        assert_eq!(options.attempts_override(), Some(1));
        assert!(!options.follows_conflicts());
        assert_eq!(options.headers().get("X-Trace"), Some(&"abc".to_string()));
    }
}
