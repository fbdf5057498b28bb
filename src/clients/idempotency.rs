//! Idempotency key generation for mutating requests.
//!
//! GoCardless deduplicates mutating requests that carry the same
//! `Idempotency-Key` header. A key is generated once per logical call, before
//! its first attempt, and is reused verbatim by every retry of that call.
//!
//! Keys combine a nanosecond timestamp with 16 bytes from the operating
//! system's CSPRNG, URL-safe base64 encoded:
//!
//! ```text
//! 1718031234567890123_q2x9Jw0bK3sYc1mW7aH4Ug
//! ```
//!
//! # Example
//!
//! ```rust
//! use gocardless_api::clients::generate_idempotency_key;
//!
//! let key = generate_idempotency_key().unwrap();
//! let (timestamp, random) = key.split_once('_').unwrap();
//! assert!(timestamp.parse::<i64>().is_ok());
//! assert_eq!(random.len(), 22);
//! ```

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

/// HTTP header carrying the idempotency key.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Number of random bytes in every key.
const RANDOM_BYTES: usize = 16;

/// Error returned when the secure random source cannot produce entropy.
///
/// A call that hits this error must fail: sending a mutating request with a
/// weak or missing key would break deduplication on retry.
#[derive(Debug, Error)]
#[error("Failed to generate idempotency key: secure random source unavailable: {source}")]
pub struct IdempotencyKeyError {
    #[source]
    source: rand::Error,
}

/// Generates a fresh idempotency key from the operating system's CSPRNG.
///
/// # Errors
///
/// Returns [`IdempotencyKeyError`] if the OS random source fails.
pub fn generate_idempotency_key() -> Result<String, IdempotencyKeyError> {
    generate_idempotency_key_with(&mut OsRng)
}

/// Generates an idempotency key drawing randomness from `rng`.
///
/// # Errors
///
/// Returns [`IdempotencyKeyError`] if `rng` cannot fill the random bytes.
pub fn generate_idempotency_key_with<R: RngCore + ?Sized>(
    rng: &mut R,
) -> Result<String, IdempotencyKeyError> {
    let mut bytes = [0u8; RANDOM_BYTES];
    rng.try_fill_bytes(&mut bytes)
        .map_err(|source| IdempotencyKeyError { source })?;

    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX);
    Ok(format!("{nanos}_{}", URL_SAFE_NO_PAD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct ExhaustedRng;

    impl RngCore for ExhaustedRng {
        fn next_u32(&mut self) -> u32 {
            unreachable!("key generation must use try_fill_bytes")
        }

        fn next_u64(&mut self) -> u64 {
            unreachable!("key generation must use try_fill_bytes")
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            unreachable!("key generation must use try_fill_bytes")
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new(std::io::Error::other("entropy exhausted")))
        }
    }

    #[test]
    fn test_key_format_is_timestamp_and_url_safe_random() {
        let key = generate_idempotency_key().unwrap();
        let (timestamp, random) = key.split_once('_').unwrap();

        assert!(timestamp.parse::<i64>().unwrap() > 0);
        assert_eq!(random.len(), 22);
        assert!(random
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<String> = (0..1000)
            .map(|_| generate_idempotency_key().unwrap())
            .collect();
        assert_eq!(keys.len(), 1000);
    }

    #[test]
    fn test_entropy_failure_is_reported_not_degraded() {
        let result = generate_idempotency_key_with(&mut ExhaustedRng);

        let error = result.unwrap_err();
        assert!(error.to_string().contains("secure random source unavailable"));
        assert!(error.to_string().contains("entropy exhausted"));
    }
}
