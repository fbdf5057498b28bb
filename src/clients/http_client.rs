//! HTTP client for GoCardless API communication.
//!
//! This module provides the [`HttpClient`] type, which executes requests
//! against the GoCardless API with idempotency keys, retry classification
//! and rate-limit aware waits.

use std::collections::HashMap;

use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};

use crate::clients::context::RequestContext;
use crate::clients::envelope::ApiErrorDetail;
use crate::clients::errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::idempotency::{generate_idempotency_key, IDEMPOTENCY_KEY_HEADER};
use crate::clients::retry::{RetryClassifier, RetryDecision};
use crate::config::{GoCardlessConfig, API_VERSION};
use crate::error::ConfigError;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name reported in the client identity headers.
pub const SDK_NAME: &str = "gocardless-api-rust";

/// HTTP client for making requests to the GoCardless API.
///
/// The client handles:
/// - Base URL selection from the configured environment or override
/// - Default headers (authorization, API version, client identity)
/// - Idempotency keys for mutating requests, stable across retries
/// - Retry classification for transport errors, 5xx and 429 responses
/// - Cancellation of the network round trip and rate-limit waits
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use gocardless_api::clients::{HttpClient, HttpMethod, HttpRequest, RequestContext};
///
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "customers")
///     .query_param("limit", "10")
///     .build()?;
///
/// let response = client.request(&RequestContext::background(), request).await?;
/// println!("{}", response.body);
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL (e.g., `https://api.gocardless.com`).
    base_uri: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Attempt budget used when a request does not set its own.
    max_attempts: u32,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the underlying transport cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &GoCardlessConfig) -> Result<Self, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!("{user_agent_prefix}{SDK_NAME}/{SDK_VERSION} rust/{rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", config.access_token().as_ref()),
        );
        default_headers.insert("GoCardless-Version".to_string(), API_VERSION.to_string());
        default_headers.insert("GoCardless-Client-Library".to_string(), SDK_NAME.to_string());
        default_headers.insert(
            "GoCardless-Client-Version".to_string(),
            SDK_VERSION.to_string(),
        );
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::HttpClient {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_uri: config.base_url().to_string(),
            default_headers,
            max_attempts: config.max_attempts(),
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the default attempt budget.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Sends an HTTP request to the GoCardless API.
    ///
    /// Up to `max(1, tries)` attempts are made. Each failed attempt is
    /// classified by [`RetryClassifier`]: fatal failures return at once,
    /// transient ones are retried immediately, and exhausted rate limits wait
    /// for the reset time first. A body carrying an `error` object counts as a
    /// failure whatever the status.
    ///
    /// Mutating requests are sent with one idempotency key for all attempts,
    /// generated before the first attempt unless the request supplies one.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - No idempotency key could be generated (`IdempotencyKey`)
    /// - The API rejected the request (`Response`)
    /// - Every attempt failed with a retryable error (`MaxRetries`, or the
    ///   bare error when only one attempt was allowed)
    /// - A successful response was not JSON (`Decode`)
    /// - The context was cancelled or expired (`Cancelled`)
    pub async fn request(
        &self,
        ctx: &RequestContext,
        request: HttpRequest,
    ) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!(
            "{}/{}",
            self.base_uri,
            request.path.trim_start_matches('/')
        );

        let headers = self.request_headers(&request)?;

        let attempts = request.tries.unwrap_or(self.max_attempts).max(1);
        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let attempt = ctx.run(self.send(&url, &headers, &request)).await?;

            let (error, decision) = match attempt {
                Ok(response) => {
                    let detail = ApiErrorDetail::from_body(&response.body);
                    if response.is_ok() && detail.is_none() {
                        return Ok(response);
                    }
                    let decision = RetryClassifier::classify_response(
                        response.code,
                        &response.rate_limit,
                        Utc::now(),
                    );
                    let error = HttpResponseError::from_response(&response, detail);
                    (HttpError::Response(error), decision)
                }
                Err(HttpError::Network(error)) => {
                    let decision = RetryClassifier::classify_transport(&error);
                    (HttpError::Network(error), decision)
                }
                Err(error) => (error, RetryDecision::Fatal),
            };

            if decision == RetryDecision::Fatal {
                return Err(error);
            }

            if tries >= attempts {
                if attempts == 1 {
                    return Err(error);
                }
                tracing::warn!(
                    "Giving up on {} {} after {} attempts: {}",
                    request.http_method,
                    request.path,
                    tries,
                    error
                );
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    tries,
                    last: Box::new(error),
                }));
            }

            match decision {
                RetryDecision::RetryAfter(wait) => {
                    tracing::warn!(
                        "Rate limited on {} {}, waiting {:?} before attempt {}",
                        request.http_method,
                        request.path,
                        wait,
                        tries + 1
                    );
                    ctx.sleep(wait).await?;
                }
                _ => {
                    tracing::debug!(
                        "Retrying {} {} (attempt {} of {}): {}",
                        request.http_method,
                        request.path,
                        tries + 1,
                        attempts,
                        error
                    );
                }
            }
        }
    }

    /// Builds the header set sent on every attempt of `request`.
    ///
    /// Header names are case-insensitive and each appears once: extra headers
    /// replace defaults of the same name. An `Idempotency-Key` given as an
    /// extra header in any casing is treated like
    /// [`HttpRequest::idempotency_key`], so a mutating request carries exactly
    /// one key.
    fn request_headers(&self, request: &HttpRequest) -> Result<HeaderMap, HttpError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.default_headers {
            headers.insert(header_name(name)?, header_value(name, value)?);
        }

        let mut extra_key = None;
        if let Some(extra) = &request.extra_headers {
            for (name, value) in extra {
                if name.eq_ignore_ascii_case(IDEMPOTENCY_KEY_HEADER) {
                    extra_key = Some(value.clone());
                    continue;
                }
                headers.insert(header_name(name)?, header_value(name, value)?);
            }
        }

        if request.http_method.is_mutating() {
            let key = match request.idempotency_key.clone().or(extra_key) {
                Some(key) => key,
                None => generate_idempotency_key()?,
            };
            headers.insert(
                header_name(IDEMPOTENCY_KEY_HEADER)?,
                header_value(IDEMPOTENCY_KEY_HEADER, &key)?,
            );
            headers
                .entry(CONTENT_TYPE)
                .or_insert(HeaderValue::from_static("application/json"));
        }

        Ok(headers)
    }

    /// Performs one attempt and decodes the body.
    async fn send(
        &self,
        url: &str,
        headers: &HeaderMap,
        request: &HttpRequest,
    ) -> Result<HttpResponse, HttpError> {
        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        req_builder = req_builder.headers(headers.clone());

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        tracing::debug!("{} {} -> {}", request.http_method, request.path, code);

        let body = if body_text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            match serde_json::from_str(&body_text) {
                Ok(body) => body,
                Err(source) if (200..=299).contains(&code) => {
                    return Err(HttpError::Decode {
                        context: "response body".to_string(),
                        source,
                    });
                }
                // Proxies in front of the API may answer errors with HTML.
                Err(_) => serde_json::json!({ "raw_body": body_text }),
            }
        };

        Ok(HttpResponse::new(code, res_headers, body))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

fn header_name(name: &str) -> Result<HeaderName, InvalidHttpRequestError> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|_| InvalidHttpRequestError::InvalidHeader {
        name: name.to_string(),
    })
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, InvalidHttpRequestError> {
    HeaderValue::from_str(value).map_err(|_| InvalidHttpRequestError::InvalidHeader {
        name: name.to_string(),
    })
}
