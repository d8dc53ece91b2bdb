//! MentorHub API client
//!
//! One method per backend action, grouped by resource in the submodules.
//! Every request carries the stored bearer token when there is one;
//! endpoints that cannot work without it fail with
//! [`ApiError::Unauthorized`] before touching the network.

pub mod achievements;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod courses;
pub mod dashboard;
pub mod error;
pub mod mentors;
pub mod progress;
pub mod sessions;

pub use catalog::CatalogClient;
pub use config::ClientConfig;
pub use error::ApiError;

use mentorhub_core::TokenStore;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response, header};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// MentorHub backend client
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: TokenStore,
}

impl ApiClient {
    /// Create a client with default configuration
    pub fn new(base_url: impl Into<String>, tokens: TokenStore) -> Result<Self, ApiError> {
        Self::builder().base_url(base_url).tokens(tokens).build()
    }

    /// Create a client pointed at the configured backend
    pub fn from_env(tokens: TokenStore) -> Result<Self, ApiError> {
        Self::builder()
            .config(ClientConfig::from_env())
            .tokens(tokens)
            .build()
    }

    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Request builder with the bearer token attached when one is stored
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let request = self.client.request(method, url);

        match self.tokens.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Request builder for endpoints that require a token. Fails fast with
    /// `Unauthorized` so no doomed request is sent.
    pub fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let Some(token) = self.tokens.get() else {
            tracing::debug!(path, "no stored token, skipping request");
            return Err(ApiError::Unauthorized);
        };
        let url = format!("{}{}", self.base_url, path);
        Ok(self.client.request(method, url).bearer_auth(token))
    }

    /// Send a request and decode the JSON body. An empty body (204) decodes
    /// as JSON `null`, which is what `()` and `Option<_>` expect.
    pub async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        execute(request).await
    }
}

pub(crate) async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = request
        .header(header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "request did not reach the server");
            ApiError::Network(err)
        })?;
    let status = response.status();

    if !status.is_success() {
        let message = error_message(response).await;
        tracing::debug!(status = status.as_u16(), %message, "request rejected");
        return Err(ApiError::from_status(status, message));
    }

    let body = response.bytes().await?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_slice(b"null")?);
    }
    Ok(serde_json::from_slice(&body)?)
}

/// Best-effort message from an error response: the body's `detail` field,
/// or the status text when the body has none
async fn error_message(response: Response) -> String {
    let status = response.status();
    let fallback = status
        .canonical_reason()
        .map_or_else(|| status.as_u16().to_string(), str::to_string);

    let Ok(body) = response.bytes().await else {
        return fallback;
    };
    serde_json::from_slice::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| detail(&value))
        .unwrap_or(fallback)
}

fn detail(body: &serde_json::Value) -> Option<String> {
    match body.get("detail")? {
        serde_json::Value::String(message) if !message.is_empty() => Some(message.clone()),
        // Validation errors come as a list of `{ "msg": ... }` objects
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    config: ClientConfig,
    base_url: Option<String>,
    tokens: Option<TokenStore>,
}

impl ApiClientBuilder {
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn tokens(mut self, tokens: TokenStore) -> Self {
        self.tokens = Some(tokens);
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiError> {
        let tokens = self
            .tokens
            .ok_or_else(|| ApiError::Configuration("token store is required".into()))?;
        let base_url = self.base_url.unwrap_or(self.config.base_url);
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::Configuration("base_url is required".into()));
        }

        Ok(ApiClient {
            client: http_client(self.config.timeout, &self.config.user_agent)?,
            base_url,
            tokens,
        })
    }
}

#[allow(unused_variables, unused_mut)]
pub(crate) fn http_client(timeout: Option<Duration>, user_agent: &str) -> Result<Client, ApiError> {
    let mut builder = ClientBuilder::new().user_agent(user_agent);

    #[cfg(not(target_arch = "wasm32"))]
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|err| ApiError::Configuration(format!("failed to build HTTP client: {err}")))
}
