//! Webhook signature verification for the GoCardless API SDK.
//!
//! GoCardless signs every webhook delivery with HMAC-SHA256, keyed by the
//! endpoint's secret, over the exact request body bytes. The lowercase hex
//! digest arrives in the `Webhook-Signature` header.
//!
//! - [`verify_signature`]: checks a body that is already in memory
//! - [`verify_reader`]: reads and hashes a body in one pass, returning a
//!   [`VerifiedBody`] that is the only input event decoding accepts
//!
//! # Example
//!
//! ```rust
//! use gocardless_api::webhooks::{compute_signature, verify_reader, verify_signature};
//!
//! let body = br#"{"events":[]}"#;
//! let signature = compute_signature(body, "testing");
//!
//! assert!(verify_signature(body, &signature, "testing"));
//! assert!(!verify_signature(body, &signature, "wrong-secret"));
//!
//! let verified = verify_reader(&body[..], &signature, "testing").unwrap();
//! assert_eq!(verified.as_bytes(), body);
//! ```
//!
//! # Security
//!
//! The signature is hex-decoded before the body is touched, and digests are
//! compared in constant time.

use std::io::{self, Read};

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::webhooks::WebhookError;

type HmacSha256 = Hmac<Sha256>;

// ============================================================================
// Constants
// ============================================================================

/// HTTP header carrying the hex-encoded HMAC-SHA256 of the body.
pub const HEADER_SIGNATURE: &str = "Webhook-Signature";

/// Status to reply with when the signature does not verify.
pub const STATUS_INVALID_SIGNATURE: u16 = 498;

// ============================================================================
// VerifiedBody
// ============================================================================

/// A webhook body whose signature has been checked.
///
/// Only [`verify_reader`] produces a `VerifiedBody`, so anything accepting one
/// (such as [`decode_events`](crate::webhooks::decode_events)) cannot be
/// handed unverified bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct VerifiedBody(Vec<u8>);

impl VerifiedBody {
    /// Returns the body bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the body and returns its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl std::fmt::Debug for VerifiedBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VerifiedBody({} bytes)", self.0.len())
    }
}

// ============================================================================
// Verification Functions
// ============================================================================

fn new_mac(secret: &str) -> HmacSha256 {
    HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size")
}

/// Decodes a signature header, rejecting empty or non-hex values.
fn decode_signature(signature_hex: &str) -> Option<Vec<u8>> {
    match hex::decode(signature_hex) {
        Ok(bytes) if !bytes.is_empty() => Some(bytes),
        _ => None,
    }
}

/// Computes the hex-encoded HMAC-SHA256 signature of `body`.
///
/// Mostly useful for tests and for replaying deliveries locally.
///
/// # Example
///
/// ```rust
/// use gocardless_api::webhooks::compute_signature;
///
/// let sig = compute_signature(b"payload", "secret-key");
/// assert_eq!(sig.len(), 64); // SHA256 produces 32 bytes = 64 hex chars
/// ```
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(body: &[u8], secret: &str) -> String {
    let mut mac = new_mac(secret);
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies the signature of a body that is already in memory.
///
/// Returns `false` without hashing the body if `signature_hex` is empty or
/// not valid hex.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn verify_signature(body: &[u8], signature_hex: &str, secret: &str) -> bool {
    let Some(expected) = decode_signature(signature_hex) else {
        return false;
    };

    let mut mac = new_mac(secret);
    mac.update(body);
    let computed = mac.finalize().into_bytes();

    // ConstantTimeEq handles different lengths securely
    computed.as_slice().ct_eq(&expected).into()
}

/// Reader that feeds every byte it yields into an HMAC and keeps a copy.
struct HashingReader<R> {
    inner: R,
    mac: HmacSha256,
    retained: Vec<u8>,
}

impl<R: Read> Read for HashingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.mac.update(&buf[..n]);
        self.retained.extend_from_slice(&buf[..n]);
        Ok(n)
    }
}

/// Reads a webhook body and verifies its signature in a single pass.
///
/// The bytes hashed are exactly the bytes returned, so a body cannot be
/// altered between verification and decoding.
///
/// # Errors
///
/// - [`WebhookError::InvalidSignature`] if the signature is empty, not hex,
///   or does not match. A malformed signature is rejected before reading.
/// - [`WebhookError::Read`] if reading the body fails.
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn verify_reader<R: Read>(
    reader: R,
    signature_hex: &str,
    secret: &str,
) -> Result<VerifiedBody, WebhookError> {
    let expected = decode_signature(signature_hex).ok_or(WebhookError::InvalidSignature)?;

    let mut hashing = HashingReader {
        inner: reader,
        mac: new_mac(secret),
        retained: Vec::new(),
    };
    io::copy(&mut hashing, &mut io::sink())?;

    let HashingReader { mac, retained, .. } = hashing;
    let computed = mac.finalize().into_bytes();

    if bool::from(computed.as_slice().ct_eq(&expected)) {
        Ok(VerifiedBody(retained))
    } else {
        Err(WebhookError::InvalidSignature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "testing";
    const BODY: &[u8] = br#"{"events":[{"id":"EV123","resource_type":"payments","action":"confirmed","links":{"payment":"PM123"}}]}"#;

    /// Reader that fails if it is ever read.
    struct PanicReader;

    impl Read for PanicReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            panic!("body must not be read");
        }
    }

    /// Reader that yields one byte per call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    // ========================================================================
    // compute_signature / verify_signature
    // ========================================================================

    #[test]
    fn test_compute_signature_known_vector() {
        // RFC 4231 test case 2
        let sig = compute_signature(b"what do ya want for nothing?", "Jefe");
        assert_eq!(
            sig,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_verify_signature_accepts_valid_signature() {
        let sig = compute_signature(BODY, SECRET);
        assert!(verify_signature(BODY, &sig, SECRET));
    }

    #[test]
    fn test_verify_signature_rejects_wrong_secret() {
        let sig = compute_signature(BODY, "other");
        assert!(!verify_signature(BODY, &sig, SECRET));
    }

    #[test]
    fn test_verify_signature_rejects_any_flipped_body_byte() {
        let sig = compute_signature(BODY, SECRET);

        for i in 0..BODY.len() {
            let mut tampered = BODY.to_vec();
            tampered[i] ^= 0x01;
            assert!(!verify_signature(&tampered, &sig, SECRET), "byte {i}");
        }
    }

    #[test]
    fn test_verify_signature_rejects_malformed_signatures() {
        assert!(!verify_signature(BODY, "", SECRET));
        assert!(!verify_signature(BODY, "not-hex", SECRET));
        assert!(!verify_signature(BODY, "abc", SECRET));

        let sig = compute_signature(BODY, SECRET);
        assert!(!verify_signature(BODY, &sig[..32], SECRET));
    }

    // ========================================================================
    // verify_reader
    // ========================================================================

    #[test]
    fn test_verify_reader_returns_exact_bytes() {
        let sig = compute_signature(BODY, SECRET);
        let verified = verify_reader(Trickle(BODY), &sig, SECRET).unwrap();

        assert_eq!(verified.as_bytes(), BODY);
        assert_eq!(verified.into_bytes(), BODY.to_vec());
    }

    #[test]
    fn test_verify_reader_rejects_tampered_body() {
        let sig = compute_signature(BODY, SECRET);
        let mut tampered = BODY.to_vec();
        tampered[10] ^= 0x20;

        let result = verify_reader(&tampered[..], &sig, SECRET);
        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn test_verify_reader_rejects_malformed_signature_before_reading() {
        let result = verify_reader(PanicReader, "zz", SECRET);
        assert!(matches!(result, Err(WebhookError::InvalidSignature)));

        let result = verify_reader(PanicReader, "", SECRET);
        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn test_verified_body_debug_hides_content() {
        let sig = compute_signature(b"secret stuff", SECRET);
        let verified = verify_reader(&b"secret stuff"[..], &sig, SECRET).unwrap();
        assert_eq!(format!("{verified:?}"), "VerifiedBody(12 bytes)");
    }
}
