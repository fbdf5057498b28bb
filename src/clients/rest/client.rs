//! REST client implementation for the GoCardless API.
//!
//! This module provides the [`RestClient`] type, which runs the generic
//! create / list / get / update / action operations for any
//! [`RestResource`] on top of [`HttpClient`].

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{json, Value};

use crate::clients::rest::RequestOptions;
use crate::clients::{
    ApiErrorDetail, HttpClient, HttpError, HttpMethod, HttpRequest, InvalidHttpRequestError,
    RequestContext,
};
use crate::config::{AccessToken, Environment, GoCardlessConfig};
use crate::error::ConfigError;
use crate::rest::{
    resolve_path, serialize_to_query, Page, Paginator, ResourceOperation, ResourceResponse,
    RestResource,
};

/// Envelope key for action request bodies.
pub const ACTION_DATA_KEY: &str = "data";

/// REST API client for the GoCardless API.
///
/// All operations are generic over the resource type: the resource supplies
/// its envelope key and paths, and the client supplies retries, idempotency
/// keys and envelope decoding.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use gocardless_api::{Environment, RestClient};
/// use gocardless_api::clients::{RequestContext, RequestOptions};
/// use gocardless_api::rest::resources::{Payment, PaymentCreateParams};
///
/// let client = RestClient::from_token("sandbox_xxx", Environment::Sandbox)?;
/// let ctx = RequestContext::background();
///
/// let payment = client
///     .create::<Payment>(&ctx, &params, RequestOptions::new())
///     .await?;
///
/// client
///     .action::<Payment, _>(&ctx, "cancel", &payment.id, &(), RequestOptions::new())
///     .await?;
/// ```
#[derive(Debug)]
pub struct RestClient {
    http_client: HttpClient,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the transport cannot be built.
    pub fn new(config: &GoCardlessConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            http_client: HttpClient::new(config)?,
        })
    }

    /// Creates a client from an access token and environment, with all
    /// other settings at their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] for an empty token. No
    /// network activity happens before validation.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gocardless_api::{ConfigError, Environment, RestClient};
    ///
    /// let result = RestClient::from_token("", Environment::Sandbox);
    /// assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
    /// ```
    pub fn from_token(
        access_token: impl Into<String>,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let config = GoCardlessConfig::builder()
            .access_token(AccessToken::new(access_token)?)
            .environment(environment)
            .build()?;
        Self::new(&config)
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Creates a resource.
    ///
    /// The parameters are sent wrapped under the resource's plural key. If
    /// the API reports that the idempotency key already created a resource,
    /// that resource is fetched and returned instead (see
    /// [`RequestOptions::follow_conflicts`]).
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the response cannot be decoded.
    pub async fn create<R: RestResource>(
        &self,
        ctx: &RequestContext,
        params: &R::CreateParams,
        options: RequestOptions,
    ) -> Result<ResourceResponse<R>, HttpError> {
        let (method, path) = resolve_path::<R>(ResourceOperation::Create, &HashMap::new())?;
        let body = wrap_body(R::PLURAL, params)?;
        let request = build_request(method, path, Some(body), None, &options)?;

        let error = match self.http_client.request(ctx, request).await {
            Ok(response) => return ResourceResponse::from_http_response(response, R::PLURAL),
            Err(HttpError::Response(error)) => error,
            Err(error) => return Err(error),
        };

        let conflicting_id = error
            .detail
            .as_ref()
            .and_then(ApiErrorDetail::conflicting_resource_id)
            .map(String::from);

        match conflicting_id {
            Some(id) if options.follows_conflicts() => {
                tracing::debug!(
                    "{} already created with this idempotency key, fetching {}",
                    R::NAME,
                    id
                );
                let mut follow = RequestOptions::new();
                if let Some(attempts) = options.attempts_override() {
                    follow = follow.attempts(attempts);
                }
                for (key, value) in options.headers() {
                    follow = follow.header(key.clone(), value.clone());
                }
                self.get::<R>(ctx, &id, follow).await
            }
            _ => Err(HttpError::Response(error)),
        }
    }

    /// Fetches one page of resources.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the response cannot be decoded.
    pub async fn list<R: RestResource>(
        &self,
        ctx: &RequestContext,
        params: &R::ListParams,
        options: RequestOptions,
    ) -> Result<Page<R>, HttpError> {
        let query = serialize_to_query(params)?;
        self.list_page::<R>(ctx, query, &options).await
    }

    /// Fetches one page with an already-serialized query.
    pub(crate) async fn list_page<R: RestResource>(
        &self,
        ctx: &RequestContext,
        query: HashMap<String, String>,
        options: &RequestOptions,
    ) -> Result<Page<R>, HttpError> {
        let (method, path) = resolve_path::<R>(ResourceOperation::List, &HashMap::new())?;
        let query = Some(query).filter(|q| !q.is_empty());
        let request = build_request(method, path, None, query, options)?;

        let response = self.http_client.request(ctx, request).await?;
        Page::from_http_response(response, R::PLURAL)
    }

    /// Returns a [`Paginator`] that walks every page matching `params`.
    ///
    /// No request is made until the first [`Paginator::fetch_next`].
    #[must_use]
    pub fn paginate<R: RestResource>(
        &self,
        params: R::ListParams,
        options: RequestOptions,
    ) -> Paginator<'_, R> {
        Paginator::new(self, params, options)
    }

    /// Fetches a single resource by ID.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the response cannot be decoded.
    pub async fn get<R: RestResource>(
        &self,
        ctx: &RequestContext,
        id: &str,
        options: RequestOptions,
    ) -> Result<ResourceResponse<R>, HttpError> {
        let ids = HashMap::from([("id", id)]);
        let (method, path) = resolve_path::<R>(ResourceOperation::Get, &ids)?;
        let request = build_request(method, path, None, None, &options)?;

        let response = self.http_client.request(ctx, request).await?;
        ResourceResponse::from_http_response(response, R::PLURAL)
    }

    /// Updates a resource.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the response cannot be decoded.
    pub async fn update<R: RestResource>(
        &self,
        ctx: &RequestContext,
        id: &str,
        params: &R::UpdateParams,
        options: RequestOptions,
    ) -> Result<ResourceResponse<R>, HttpError> {
        let ids = HashMap::from([("id", id)]);
        let (method, path) = resolve_path::<R>(ResourceOperation::Update, &ids)?;
        let body = wrap_body(R::PLURAL, params)?;
        let request = build_request(method, path, Some(body), None, &options)?;

        let response = self.http_client.request(ctx, request).await?;
        ResourceResponse::from_http_response(response, R::PLURAL)
    }

    /// Performs a named action (e.g. `cancel`, `retry`, `pause`) on a resource.
    ///
    /// Parameters are sent under the `data` key. Parameters that serialize
    /// to `null`, such as `&()`, send `{"data": {}}`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the response cannot be decoded.
    pub async fn action<R: RestResource, P: Serialize + ?Sized>(
        &self,
        ctx: &RequestContext,
        action: &'static str,
        id: &str,
        params: &P,
        options: RequestOptions,
    ) -> Result<ResourceResponse<R>, HttpError> {
        let ids = HashMap::from([("id", id)]);
        let (method, path) = resolve_path::<R>(ResourceOperation::Action(action), &ids)?;
        let data = match to_value(params)? {
            Value::Null => json!({}),
            data => data,
        };
        let body = wrap_body(ACTION_DATA_KEY, &data)?;
        let request = build_request(method, path, Some(body), None, &options)?;

        let response = self.http_client.request(ctx, request).await?;
        ResourceResponse::from_http_response(response, R::PLURAL)
    }
}

fn to_value<P: Serialize + ?Sized>(params: &P) -> Result<Value, InvalidHttpRequestError> {
    serde_json::to_value(params).map_err(|e| InvalidHttpRequestError::InvalidParams {
        reason: e.to_string(),
    })
}

/// Wraps `params` in an object keyed by `key`.
fn wrap_body<P: Serialize + ?Sized>(key: &str, params: &P) -> Result<Value, InvalidHttpRequestError> {
    let mut body = serde_json::Map::new();
    body.insert(key.to_string(), to_value(params)?);
    Ok(Value::Object(body))
}

fn build_request(
    method: HttpMethod,
    path: String,
    body: Option<Value>,
    query: Option<HashMap<String, String>>,
    options: &RequestOptions,
) -> Result<HttpRequest, InvalidHttpRequestError> {
    let mut builder = HttpRequest::builder(method, path);
    if let Some(body) = body {
        builder = builder.body(body);
    }
    if let Some(query) = query {
        builder = builder.query(query);
    }
    if !options.headers().is_empty() {
        builder = builder.extra_headers(options.headers().clone());
    }
    if let Some(attempts) = options.attempts_override() {
        builder = builder.tries(attempts);
    }
    if let Some(key) = options.idempotency_key_override() {
        if method.is_mutating() {
            builder = builder.idempotency_key(key);
        }
    }
    builder.build()
}
