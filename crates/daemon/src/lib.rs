//! MentorHub site backend: course-catalog proxy, robots.txt, sitemap.xml

pub mod config;
pub mod server;

pub use config::{CatalogConfig, ServerConfig, Settings, SiteConfig};
pub use server::{build_app, serve};

/// Result type for daemon operations
pub type Result<T> = std::result::Result<T, DaemonError>;

/// Daemon error types
#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("HTTP error: {0}")]
    Http(#[from] mentorhub_http::HttpError),

    #[error("Invalid CORS origin {origin:?}")]
    InvalidOrigin { origin: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
