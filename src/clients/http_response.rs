//! HTTP response types for the GoCardless API SDK.
//!
//! This module provides the [`HttpResponse`] type and the [`RateLimit`]
//! information parsed from GoCardless rate-limit headers.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};

/// Header carrying the size of the rate-limit window.
pub const HEADER_RATE_LIMIT_LIMIT: &str = "ratelimit-limit";

/// Header carrying the number of requests left in the current window.
pub const HEADER_RATE_LIMIT_REMAINING: &str = "ratelimit-remaining";

/// Header carrying the instant the current window resets.
pub const HEADER_RATE_LIMIT_RESET: &str = "ratelimit-reset";

/// Parses an HTTP date in RFC 1123 form.
///
/// Both the `GMT` spelling (`Mon, 02 Jan 2006 15:04:05 GMT`) and the numeric
/// zone spelling (`Mon, 02 Jan 2006 15:04:05 -0700`) are accepted.
///
/// # Example
///
/// ```rust
/// use gocardless_api::clients::parse_http_date;
///
/// let a = parse_http_date("Wed, 21 Oct 2026 07:28:00 GMT").unwrap();
/// let b = parse_http_date("Wed, 21 Oct 2026 09:28:00 +0200").unwrap();
/// assert_eq!(a, b);
/// assert!(parse_http_date("not a date").is_none());
/// ```
#[must_use]
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%a, %d %b %Y %H:%M:%S GMT") {
        return Some(naive.and_utc());
    }

    DateTime::parse_from_str(value, "%a, %d %b %Y %H:%M:%S %z")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Rate limit information parsed from the `RateLimit-*` response headers.
///
/// Any header that is absent or unparsable is `None`.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use gocardless_api::clients::RateLimit;
///
/// let mut headers = HashMap::new();
/// headers.insert("ratelimit-limit".to_string(), vec!["1000".to_string()]);
/// headers.insert("ratelimit-remaining".to_string(), vec!["0".to_string()]);
/// headers.insert(
///     "ratelimit-reset".to_string(),
///     vec!["Wed, 21 Oct 2026 07:28:00 GMT".to_string()],
/// );
///
/// let limit = RateLimit::from_headers(&headers);
/// assert_eq!(limit.limit, Some(1000));
/// assert_eq!(limit.remaining, Some(0));
/// assert!(limit.reset.is_some());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RateLimit {
    /// The number of requests allowed per window.
    pub limit: Option<u32>,
    /// The number of requests left in the current window.
    pub remaining: Option<u32>,
    /// When the current window resets.
    pub reset: Option<DateTime<Utc>>,
}

impl RateLimit {
    /// Parses rate limit headers from a lowercase-keyed header map.
    #[must_use]
    #[allow(clippy::implicit_hasher)]
    pub fn from_headers(headers: &HashMap<String, Vec<String>>) -> Self {
        let first = |name: &str| {
            headers
                .get(name)
                .and_then(|values| values.first())
                .map(|value| value.trim())
        };

        Self {
            limit: first(HEADER_RATE_LIMIT_LIMIT).and_then(|v| v.parse().ok()),
            remaining: first(HEADER_RATE_LIMIT_REMAINING).and_then(|v| v.parse().ok()),
            reset: first(HEADER_RATE_LIMIT_RESET).and_then(parse_http_date),
        }
    }

    /// Returns `true` if none of the rate limit headers were present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.limit.is_none() && self.remaining.is_none() && self.reset.is_none()
    }
}

/// An HTTP response from the GoCardless API.
///
/// Contains the response status code, headers, the body decoded once into
/// JSON, and the parsed rate limit headers.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body (`Null` for an empty body).
    pub body: serde_json::Value,
    /// Rate limit information from the `RateLimit-*` headers.
    pub rate_limit: RateLimit,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing rate limit headers.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let rate_limit = RateLimit::from_headers(&headers);
        Self {
            code,
            headers,
            body,
            rate_limit,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    ///
    /// This ID is useful for debugging and should be included in error reports.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), vec![(*v).to_string()]))
            .collect()
    }

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(
                response.is_ok(),
                "Expected is_ok() to be true for code {code}"
            );
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [400, 404, 409, 422, 429, 500, 503] {
            assert!(!HttpResponse::new(code, HashMap::new(), json!({})).is_ok());
        }
    }

    #[test]
    fn test_parse_http_date_accepts_both_formats() {
        let expected = Utc.with_ymd_and_hms(2026, 10, 21, 7, 28, 0).unwrap();

        assert_eq!(
            parse_http_date("Wed, 21 Oct 2026 07:28:00 GMT"),
            Some(expected)
        );
        assert_eq!(
            parse_http_date("Wed, 21 Oct 2026 07:28:00 +0000"),
            Some(expected)
        );
        assert_eq!(
            parse_http_date("Wed, 21 Oct 2026 02:28:00 -0500"),
            Some(expected)
        );
    }

    #[test]
    fn test_parse_http_date_rejects_other_formats() {
        assert!(parse_http_date("").is_none());
        assert!(parse_http_date("2026-10-21T07:28:00Z").is_none());
        assert!(parse_http_date("1761031680").is_none());
    }

    #[test]
    fn test_rate_limit_parsing() {
        let limit = RateLimit::from_headers(&headers(&[
            ("ratelimit-limit", "1000"),
            ("ratelimit-remaining", "998"),
            ("ratelimit-reset", "Wed, 21 Oct 2026 07:28:00 GMT"),
        ]));

        assert_eq!(limit.limit, Some(1000));
        assert_eq!(limit.remaining, Some(998));
        assert_eq!(
            limit.reset,
            Some(Utc.with_ymd_and_hms(2026, 10, 21, 7, 28, 0).unwrap())
        );
        assert!(!limit.is_empty());
    }

    #[test]
    fn test_rate_limit_tolerates_garbage() {
        let limit = RateLimit::from_headers(&headers(&[
            ("ratelimit-remaining", "lots"),
            ("ratelimit-reset", "soon"),
        ]));

        assert_eq!(limit.remaining, None);
        assert_eq!(limit.reset, None);
        assert!(limit.is_empty());
    }

    #[test]
    fn test_response_parses_rate_limit_on_construction() {
        let response = HttpResponse::new(
            429,
            headers(&[("ratelimit-remaining", "0")]),
            json!({}),
        );
        assert_eq!(response.rate_limit.remaining, Some(0));
    }

    #[test]
    fn test_request_id_extraction() {
        let response = HttpResponse::new(
            200,
            headers(&[("x-request-id", "req-12345")]),
            json!({}),
        );
        assert_eq!(response.request_id(), Some("req-12345"));
        assert_eq!(response.header("X-Request-Id"), Some("req-12345"));

        let response = HttpResponse::new(200, HashMap::new(), json!({}));
        assert!(response.request_id().is_none());
    }
}
