//! API client configuration

use std::time::Duration;

/// Backend base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Environment variable holding the backend base URL
pub const BASE_URL_ENV: &str = "MENTORHUB_API_BASE_URL";

const DEFAULT_USER_AGENT: &str = concat!("mentorhub-client/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Ignored in the browser, where fetch has no per-client timeout
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Read the base URL from the environment. Browser builds bake the value
    /// in at compile time.
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let base_url = std::env::var(BASE_URL_ENV).ok();

        #[cfg(target_arch = "wasm32")]
        let base_url = option_env!("MENTORHUB_API_BASE_URL").map(str::to_string);

        Self {
            base_url: base_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            ..Self::default()
        }
    }
}
