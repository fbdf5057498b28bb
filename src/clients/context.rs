//! Caller-supplied cancellation and deadlines for API calls.
//!
//! Every suspension point in the SDK (the network round trip and the
//! rate-limit wait) is raced against a [`RequestContext`]. When the context is
//! cancelled or its deadline passes, the in-flight operation is dropped and a
//! [`Cancelled`] error is surfaced instead of a retry.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Error returned when a [`RequestContext`] ends an operation early.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Cancelled {
    /// The cancellation token was triggered.
    #[error("Request was cancelled by the caller")]
    Cancelled,

    /// The deadline passed before the operation completed.
    #[error("Request deadline exceeded")]
    DeadlineExceeded,
}

/// Cancellation signal and optional deadline for a call.
///
/// The default context never cancels.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use gocardless_api::clients::RequestContext;
/// use tokio_util::sync::CancellationToken;
///
/// let token = CancellationToken::new();
/// let ctx = RequestContext::background()
///     .with_cancellation(token.clone())
///     .with_timeout(Duration::from_secs(10));
///
/// assert!(!ctx.is_done());
/// token.cancel();
/// assert!(ctx.is_done());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    token: Option<CancellationToken>,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Returns a context that is never cancelled and has no deadline.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Attaches a cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Sets an absolute deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets a deadline relative to now.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` if the context has been cancelled or its deadline passed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.check().is_err()
    }

    /// Returns the cancellation reason if the context is already done.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] when the token fired or the deadline passed.
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.token.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Err(Cancelled::Cancelled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(Cancelled::DeadlineExceeded);
        }
        Ok(())
    }

    /// Drives `future` to completion unless the context ends first.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if the token fires or the deadline passes before
    /// `future` resolves. The future is dropped in that case.
    pub async fn run<F: Future>(&self, future: F) -> Result<F::Output, Cancelled> {
        self.check()?;

        let cancelled = async {
            match &self.token {
                Some(token) => token.cancelled().await,
                None => std::future::pending().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            output = future => Ok(output),
            () = cancelled => Err(Cancelled::Cancelled),
            () = expired => Err(Cancelled::DeadlineExceeded),
        }
    }

    /// Sleeps for `duration` unless the context ends first.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if the wait is interrupted.
    pub async fn sleep(&self, duration: Duration) -> Result<(), Cancelled> {
        self.run(tokio::time::sleep(duration)).await
    }
}
