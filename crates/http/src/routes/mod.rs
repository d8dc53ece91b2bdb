//! Route definitions

use crate::state::AppState;
use axum::{Router, routing::get};

pub mod catalog;
pub mod health;
pub mod seo;

/// Every route served by the site backend
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(seo::router())
        .merge(catalog::router())
}
