//! The REST client and its builder.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;

use crate::auth::{Credentials, NonceSource, RatchetNonce, sign};
use crate::error::ClientError;
use crate::rest::endpoints::EndpointConfig;
use crate::rest::envelope::ResponseEnvelope;

/// Asynchronous client for the Kraken REST API.
///
/// Public endpoints work without any configuration; private endpoints need
/// credentials on the builder. The client is cheap to clone and safe to
/// share across tasks.
///
/// # Example
///
/// ```rust,no_run
/// use kraken_rest::rest::RestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = RestClient::new()?;
///     let time = client.server_time().await?.into_result()?;
///     println!("server unixtime: {}", time.unixtime);
///     Ok(())
/// }
/// ```
///
/// With credentials:
///
/// ```rust,no_run
/// use kraken_rest::auth::Credentials;
/// use kraken_rest::rest::RestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = RestClient::builder()
///         .credentials(Credentials::from_env()?)
///         .build()?;
///     let balances = client.balance().await?.into_result()?;
///     println!("{balances:?}");
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RestClient {
    /// Pipeline with transient-retry middleware, used for public GETs only.
    public_http: ClientWithMiddleware,
    /// Non-retrying pipeline for signed POSTs. A transport-level replay
    /// would resend an already-issued nonce; retries of private calls must
    /// happen above this client, with a fresh nonce each time.
    private_http: ClientWithMiddleware,
    config: EndpointConfig,
    credentials: Option<Credentials>,
    nonce: Arc<dyn NonceSource>,
}

impl RestClient {
    /// Create a client with default settings, for public endpoints.
    pub fn new() -> Result<Self, ClientError> {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> RestClientBuilder {
        RestClientBuilder::new()
    }

    /// The endpoint configuration this client was built with.
    pub fn endpoint_config(&self) -> &EndpointConfig {
        &self.config
    }

    /// Issue a public GET with no query parameters.
    pub(crate) async fn public_get<T>(
        &self,
        method: &str,
    ) -> Result<ResponseEnvelope<T>, ClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.config.public_url(method);
        tracing::debug!(%method, "public GET");
        let response = self
            .public_http
            .get(&url)
            .send()
            .await
            .map_err(flatten_timeout)?;
        decode(response).await
    }

    /// Issue a public GET with query parameters.
    ///
    /// Kept separate from [`public_get`](Self::public_get) because a URL
    /// with an empty query string is not the same request as one without a
    /// query string at all.
    pub(crate) async fn public_get_with<T, Q>(
        &self,
        method: &str,
        params: &Q,
    ) -> Result<ResponseEnvelope<T>, ClientError>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let query = serde_urlencoded::to_string(params)?;
        let url = if query.is_empty() {
            self.config.public_url(method)
        } else {
            format!("{}?{}", self.config.public_url(method), query)
        };
        tracing::debug!(%method, "public GET");
        let response = self
            .public_http
            .get(&url)
            .send()
            .await
            .map_err(flatten_timeout)?;
        decode(response).await
    }

    /// Issue a signed POST to a private endpoint.
    ///
    /// Validates credentials, draws a nonce, injects it as the first body
    /// parameter, signs the exact body that will be transmitted, and sends
    /// it with the `API-Key` and `API-Sign` headers.
    pub(crate) async fn private_post<T, P>(
        &self,
        method: &str,
        params: &P,
    ) -> Result<ResponseEnvelope<T>, ClientError>
    where
        T: serde::de::DeserializeOwned,
        P: serde::Serialize,
    {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            ClientError::Configuration(
                "API key and secret are required for private endpoints".to_string(),
            )
        })?;
        if credentials.is_incomplete() {
            return Err(ClientError::Configuration(
                "API key and secret must be non-empty for private endpoints".to_string(),
            ));
        }

        let nonce = self.nonce.next();
        let encoded = serde_urlencoded::to_string(params)?;
        let body = if encoded.is_empty() {
            format!("nonce={nonce}")
        } else {
            format!("nonce={nonce}&{encoded}")
        };

        let path = self.config.private_path(method);
        let signature = sign(&path, nonce, &body, credentials.expose_secret())?;

        tracing::debug!(%method, nonce, "private POST");
        let response = self
            .private_http
            .post(self.config.private_url(method))
            .header("API-Key", &credentials.api_key)
            .header("API-Sign", signature)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(flatten_timeout)?;
        decode(response).await
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.config.base_url())
            .field("version", &self.config.version())
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

/// Decode a response body into an envelope.
///
/// Non-success statuses and unparsable bodies are transport errors; the
/// envelope's own error list is left for the caller to inspect.
async fn decode<T>(response: reqwest::Response) -> Result<ResponseEnvelope<T>, ClientError>
where
    T: serde::de::DeserializeOwned,
{
    let status = response.status();
    let body = response.text().await.map_err(|e| {
        if e.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Http(e)
        }
    })?;
    if !status.is_success() {
        return Err(ClientError::Status { code: status, body });
    }
    serde_json::from_str(&body)
        .map_err(|e| ClientError::InvalidResponse(format!("could not parse response: {e}. Body: {body}")))
}

/// Surface request timeouts as their own variant.
fn flatten_timeout(err: reqwest_middleware::Error) -> ClientError {
    match &err {
        reqwest_middleware::Error::Reqwest(inner) if inner.is_timeout() => ClientError::Timeout,
        _ => ClientError::HttpMiddleware(err),
    }
}

/// Builder for [`RestClient`].
pub struct RestClientBuilder {
    base_url: String,
    version: u32,
    credentials: Option<Credentials>,
    nonce: Option<Arc<dyn NonceSource>>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    max_retries: u32,
}

impl RestClientBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: crate::rest::endpoints::KRAKEN_API_URL.to_string(),
            version: crate::rest::endpoints::KRAKEN_API_VERSION,
            credentials: None,
            nonce: None,
            user_agent: None,
            timeout: None,
            max_retries: 3,
        }
    }

    /// Set the base URL (useful for testing against a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API version path segment.
    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Set credentials for private endpoints.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce source.
    pub fn nonce_source(mut self, source: Arc<dyn NonceSource>) -> Self {
        self.nonce = Some(source);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a request timeout. Timed-out requests surface as
    /// [`ClientError::Timeout`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of transient retries for public requests.
    ///
    /// Private requests are never retried at the transport level; see
    /// [`RestClient`] internals for why.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Build the client, validating the base URL.
    pub fn build(self) -> Result<RestClient, ClientError> {
        url::Url::parse(&self.base_url)?;

        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("kraken-rest/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("kraken-rest"));
        headers.insert(USER_AGENT, header_value);

        let mut reqwest_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }
        let reqwest_client = reqwest_builder.build()?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(self.max_retries);
        let public_http = ClientBuilder::new(reqwest_client.clone())
            .with(TracingMiddleware::default())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();
        let private_http = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(RestClient {
            public_http,
            private_http,
            config: EndpointConfig::new(self.base_url, self.version),
            credentials: self.credentials,
            nonce: self.nonce.unwrap_or_else(|| Arc::new(RatchetNonce::new())),
        })
    }
}

impl Default for RestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
