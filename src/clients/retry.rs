//! Retry classification for API attempts.
//!
//! Every failed attempt is sorted into exactly one [`RetryDecision`]. The
//! classifier is pure: it never sleeps and never looks at the attempt counter,
//! so the executor owns the budget and the waiting.
//!
//! | Outcome                                         | Decision          |
//! |-------------------------------------------------|-------------------|
//! | Timeout, refused connection, failed send        | `RetryNow`        |
//! | Status 5xx                                      | `RetryNow`        |
//! | 429 with quota remaining                        | `RetryNow`        |
//! | 429, quota exhausted, reset in the future       | `RetryAfter(..)`  |
//! | 429, quota exhausted, reset missing or past     | `RetryNow`        |
//! | Anything else (other 4xx, error body on a 2xx)  | `Fatal`           |

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::clients::http_response::RateLimit;

/// HTTP status returned when the rate limit has been hit.
pub const STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// What the executor should do after a failed attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryDecision {
    /// Stop and surface the failure.
    Fatal,
    /// Try again immediately.
    RetryNow,
    /// Try again once the given duration has elapsed.
    RetryAfter(Duration),
}

impl RetryDecision {
    /// Returns `true` unless the decision is [`RetryDecision::Fatal`].
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        !matches!(self, Self::Fatal)
    }
}

/// Classifies transport failures and HTTP responses into [`RetryDecision`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct RetryClassifier;

impl RetryClassifier {
    /// Classifies an error raised before a response was received.
    ///
    /// Timeouts, connection failures and request send failures are transient.
    /// Anything else (redirect loops, body decoding, builder errors) is fatal.
    #[must_use]
    pub fn classify_transport(error: &reqwest::Error) -> RetryDecision {
        if error.is_timeout() || error.is_connect() || error.is_request() {
            RetryDecision::RetryNow
        } else {
            RetryDecision::Fatal
        }
    }

    /// Classifies a response that failed at the API level.
    ///
    /// `now` is the reference instant used to turn the rate-limit reset time
    /// into a wait.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use chrono::{TimeZone, Utc};
    /// use gocardless_api::clients::{RateLimit, RetryClassifier, RetryDecision};
    ///
    /// let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
    /// let limit = RateLimit {
    ///     limit: Some(1000),
    ///     remaining: Some(0),
    ///     reset: Some(now + chrono::Duration::seconds(2)),
    /// };
    ///
    /// assert_eq!(
    ///     RetryClassifier::classify_response(429, &limit, now),
    ///     RetryDecision::RetryAfter(Duration::from_secs(2))
    /// );
    /// assert_eq!(
    ///     RetryClassifier::classify_response(503, &RateLimit::default(), now),
    ///     RetryDecision::RetryNow
    /// );
    /// assert_eq!(
    ///     RetryClassifier::classify_response(422, &RateLimit::default(), now),
    ///     RetryDecision::Fatal
    /// );
    /// ```
    #[must_use]
    pub fn classify_response(
        status: u16,
        rate_limit: &RateLimit,
        now: DateTime<Utc>,
    ) -> RetryDecision {
        if status >= 500 {
            return RetryDecision::RetryNow;
        }
        if status != STATUS_TOO_MANY_REQUESTS {
            return RetryDecision::Fatal;
        }

        if rate_limit.remaining.is_some_and(|remaining| remaining > 0) {
            return RetryDecision::RetryNow;
        }

        rate_limit
            .reset
            .and_then(|reset| (reset - now).to_std().ok())
            .filter(|wait| !wait.is_zero())
            .map_or(RetryDecision::RetryNow, RetryDecision::RetryAfter)
    }
}
