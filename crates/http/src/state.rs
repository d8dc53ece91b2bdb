//! Application state management

use crate::error::HttpError;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Course catalog upstream used by the proxy routes
#[derive(Clone, Debug)]
pub struct CatalogUpstream {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogUpstream {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::internal(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` upstream and return the JSON body untouched. `resource`
    /// labels the error message when the catalog rejects the request.
    pub async fn fetch(
        &self,
        path: &str,
        query: &[(&str, String)],
        resource: &'static str,
    ) -> Result<Value, HttpError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, ?query, "fetching from course catalog");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| HttpError::internal(format!("catalog request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), %url, "course catalog error");
            return Err(HttpError::Upstream {
                status: status.as_u16(),
                resource,
                reason: status
                    .canonical_reason()
                    .map_or_else(|| status.as_u16().to_string(), str::to_string),
            });
        }

        response
            .json()
            .await
            .map_err(|e| HttpError::internal(format!("catalog body from {url} is not JSON: {e}")))
    }
}

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    pub catalog: CatalogUpstream,
    /// Public origin of the site, used in robots.txt and sitemap.xml
    pub site_base_url: Arc<str>,
}

impl AppState {
    pub fn new(catalog: CatalogUpstream, site_base_url: impl Into<String>) -> Self {
        Self {
            catalog,
            site_base_url: Arc::from(site_base_url.into().trim_end_matches('/')),
        }
    }
}
