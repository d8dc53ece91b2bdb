//! robots.txt and sitemap.xml, regenerated on every request

use crate::state::AppState;
use axum::{
    Router,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
};
use mentorhub_core::seo::{SITE_ROUTES, robots_txt, sitemap_xml};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/robots.txt", get(robots))
        .route("/sitemap.xml", get(sitemap))
}

#[tracing::instrument(skip_all)]
pub async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        robots_txt(&state.site_base_url),
    )
}

#[tracing::instrument(skip_all)]
pub async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        sitemap_xml(&state.site_base_url, SITE_ROUTES, chrono::Utc::now()),
    )
}
