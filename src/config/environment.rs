//! GoCardless environment definitions.
//!
//! This module provides the [`Environment`] enum selecting which GoCardless
//! deployment requests are sent to, and the fixed API version the SDK speaks.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// The API version sent in the `GoCardless-Version` header of every request.
pub const API_VERSION: &str = "2015-07-06";

/// GoCardless deployment environment.
///
/// # Example
///
/// ```rust
/// use gocardless_api::Environment;
///
/// let env: Environment = "sandbox".parse().unwrap();
/// assert_eq!(env, Environment::Sandbox);
/// assert_eq!(env.base_url(), "https://api-sandbox.gocardless.com");
/// assert_eq!(env.to_string(), "sandbox");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// The live environment, moving real money.
    #[default]
    Live,
    /// The sandbox environment for integration testing.
    Sandbox,
}

impl Environment {
    /// Returns the API base URL for this environment.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Live => "https://api.gocardless.com",
            Self::Sandbox => "https://api-sandbox.gocardless.com",
        }
    }

    /// Returns the environment name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Sandbox => "sandbox",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "sandbox" => Ok(Self::Sandbox),
            _ => Err(ConfigError::InvalidEnvironment {
                value: s.to_string(),
            }),
        }
    }
}
