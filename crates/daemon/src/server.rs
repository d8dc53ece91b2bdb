//! Router assembly and the listener loop

use crate::{DaemonError, Result, Settings};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use mentorhub_http::{AppState, CatalogUpstream};
use std::future::Future;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let parsed = origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| DaemonError::InvalidOrigin {
                    origin: origin.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(parsed)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

/// Build the complete router with middleware
pub fn build_app(settings: &Settings) -> Result<Router> {
    let catalog = CatalogUpstream::new(&settings.catalog.upstream_url, settings.catalog.timeout())?;
    let state = AppState::new(catalog, settings.site.base_url.clone());

    // Requests never outlive the upstream timeout by much
    let request_timeout = settings.catalog.timeout() + Duration::from_secs(5);

    Ok(mentorhub_http::routes::router()
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors_layer(&settings.server.cors_origins)?)
        .layer(TraceLayer::new_for_http()))
}

/// Serve until `shutdown` resolves
pub async fn serve<F>(settings: &Settings, listener: TcpListener, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(settings)?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn router_builds_with_defaults() {
        let app = build_app(&Settings::default()).unwrap();
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn rejects_malformed_origin() {
        let origins = vec!["https://ok.example".to_string(), "bad\norigin".to_string()];
        assert!(matches!(
            cors_layer(&origins),
            Err(DaemonError::InvalidOrigin { .. })
        ));
    }
}
