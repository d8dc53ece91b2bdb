//! MentorHub HTTP layer
//!
//! The `client` feature provides typed wrappers over the MentorHub backend
//! and the course-catalog proxy. The `server` feature provides the axum
//! router that serves the proxy, robots.txt, sitemap.xml and the health
//! check.

pub mod error;
pub mod types;

#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod state;

#[cfg(feature = "client")]
pub mod client;

pub use error::{HttpError, Result};

#[cfg(feature = "server")]
pub use state::{AppState, CatalogUpstream};

#[cfg(feature = "server")]
pub use axum::{Json, extract, response};
