//! Configuration types for the GoCardless API SDK.
//!
//! This module provides the core configuration types used to initialize
//! and configure the SDK for API communication with GoCardless.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`GoCardlessConfig`]: The immutable configuration shared by every call
//! - [`GoCardlessConfigBuilder`]: A builder for constructing [`GoCardlessConfig`] instances
//! - [`AccessToken`]: A validated access token with masked debug output
//! - [`WebhookSecret`]: A validated webhook endpoint secret with masked debug output
//! - [`BaseUrl`]: A validated API base URL
//! - [`Environment`]: The GoCardless deployment to talk to
//!
//! # Example
//!
//! ```rust
//! use gocardless_api::{GoCardlessConfig, AccessToken, Environment};
//!
//! let config = GoCardlessConfig::builder()
//!     .access_token(AccessToken::new("sandbox_token").unwrap())
//!     .environment(Environment::Sandbox)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url(), "https://api-sandbox.gocardless.com");
//! assert_eq!(config.max_attempts(), 3);
//! ```

mod environment;
mod newtypes;

pub use environment::{Environment, API_VERSION};
pub use newtypes::{AccessToken, BaseUrl, WebhookSecret};

use std::time::Duration;

use crate::error::ConfigError;

/// Default number of attempts for every request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default timeout applied to each individual HTTP attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the GoCardless API SDK.
///
/// This struct holds the credential, endpoint and retry policy read by every
/// request. It is built once and never mutated afterwards.
///
/// # Thread Safety
///
/// `GoCardlessConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use gocardless_api::{GoCardlessConfig, AccessToken, BaseUrl};
///
/// let config = GoCardlessConfig::builder()
///     .access_token(AccessToken::new("token").unwrap())
///     .base_url(BaseUrl::new("http://localhost:8080").unwrap())
///     .max_attempts(5)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.base_url(), "http://localhost:8080");
/// assert_eq!(config.max_attempts(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct GoCardlessConfig {
    access_token: AccessToken,
    environment: Environment,
    base_url: Option<BaseUrl>,
    max_attempts: u32,
    timeout: Duration,
    user_agent_prefix: Option<String>,
}

impl GoCardlessConfig {
    /// Creates a new builder for constructing a `GoCardlessConfig`.
    #[must_use]
    pub fn builder() -> GoCardlessConfigBuilder {
        GoCardlessConfigBuilder::new()
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the configured environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the base URL requests are sent to.
    ///
    /// An explicit [`BaseUrl`] override wins over the environment's URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_ref()
            .map_or_else(|| self.environment.base_url(), AsRef::as_ref)
    }

    /// Returns the default attempt budget for each request.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the timeout applied to each HTTP attempt.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify GoCardlessConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GoCardlessConfig>();
};

/// Builder for constructing [`GoCardlessConfig`] instances.
///
/// The only required field is `access_token`.
///
/// # Defaults
///
/// - `environment`: [`Environment::Live`]
/// - `base_url`: `None` (derived from the environment)
/// - `max_attempts`: 3
/// - `timeout`: 30 seconds
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct GoCardlessConfigBuilder {
    access_token: Option<AccessToken>,
    environment: Option<Environment>,
    base_url: Option<BaseUrl>,
    max_attempts: Option<u32>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl GoCardlessConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the environment.
    #[must_use]
    pub const fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Overrides the base URL derived from the environment.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the default attempt budget. Values below 1 are raised to 1.
    #[must_use]
    pub const fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Sets the timeout applied to each HTTP attempt.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`GoCardlessConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `access_token` is not set.
    pub fn build(self) -> Result<GoCardlessConfig, ConfigError> {
        let access_token = self
            .access_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "access_token",
            })?;

        Ok(GoCardlessConfig {
            access_token,
            environment: self.environment.unwrap_or_default(),
            base_url: self.base_url,
            max_attempts: self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS).max(1),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
