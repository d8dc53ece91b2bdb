//! Configuration management for the MentorHub site backend

use crate::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Prefix of environment overrides, e.g. `MENTORHUB_SERVER__BIND_ADDR`
pub const ENV_PREFIX: &str = "MENTORHUB";

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub catalog: CatalogConfig,
    /// Filter directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones
    #[serde(default)]
    pub log_json: bool,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Public site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Origin used in robots.txt and sitemap.xml
    pub base_url: String,
}

/// Course catalog upstream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub upstream_url: String,
    pub timeout_secs: u64,
}

impl CatalogConfig {
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            site: SiteConfig::default(),
            catalog: CatalogConfig::default(),
            log_level: "mentorhub=debug,tower_http=debug,info".to_string(),
            log_json: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_origins: Vec::new(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            upstream_url: "https://stepik.org/api".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Load configuration: defaults, then the optional file, then
    /// `MENTORHUB_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a value has the wrong type
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = config::Config::builder()
            .set_default("server.bind_addr", defaults.server.bind_addr.to_string())?
            .set_default("server.cors_origins", Vec::<String>::new())?
            .set_default("site.base_url", defaults.site.base_url)?
            .set_default("catalog.upstream_url", defaults.catalog.upstream_url)?
            .set_default("catalog.timeout_secs", defaults.catalog.timeout_secs)?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_json", defaults.log_json)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.catalog.upstream_url, "https://stepik.org/api");
        assert_eq!(settings.catalog.timeout(), Duration::from_secs(30));
        assert!(settings.server.cors_origins.is_empty());
    }

    #[test]
    fn file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("mentorhub-settings-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[site]\nbase_url = \"https://mentorhub.ru\"\n\n[catalog]\ntimeout_secs = 5\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.site.base_url, "https://mentorhub.ru");
        assert_eq!(settings.catalog.timeout_secs, 5);
        assert_eq!(settings.catalog.upstream_url, "https://stepik.org/api");
    }
}
