//! Course catalog proxy
//!
//! Requests are mapped onto the upstream `courses`, `sections`, `lessons` and
//! `users` resources and the upstream JSON is returned verbatim.

use crate::error::{HttpError, Result};
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_LANGUAGE: &str = "ru";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/stepik/courses", get(list_courses))
        .route("/api/stepik/courses/{id}", get(course))
        .route("/api/stepik/sections", get(sections))
        .route("/api/stepik/lessons", get(lessons))
        .route("/api/stepik/{id}", get(resource))
}

/// Query parameters accepted by the proxy routes
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub course: Option<String>,
    pub ids: Option<String>,
    pub page: Option<u32>,
    pub language: Option<String>,
}

/// Upstream resource a proxy request resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogTarget {
    Course(String),
    Listing { page: u32, language: String },
    Sections { course: String },
    Lessons { ids: String },
    Users { ids: String },
}

fn present(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

fn numeric(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

impl CatalogTarget {
    /// Resolve the `/api/stepik/{id}` form: `sections`, `lessons` and
    /// `users` are resources, anything else is a course id
    pub fn resolve(id: &str, query: &CatalogQuery) -> Result<Self> {
        match id {
            "sections" => Self::sections(query),
            "lessons" => Self::lessons(query),
            "users" => present(query.ids.as_ref())
                .map(|ids| Self::Users { ids })
                .ok_or_else(|| HttpError::bad_request("Missing ids parameter")),
            id => Self::course(id),
        }
    }

    pub fn course(id: &str) -> Result<Self> {
        if numeric(id) {
            Ok(Self::Course(id.to_string()))
        } else {
            Err(HttpError::bad_request("Invalid course id"))
        }
    }

    pub fn sections(query: &CatalogQuery) -> Result<Self> {
        present(query.course.as_ref())
            .map(|course| Self::Sections { course })
            .ok_or_else(|| HttpError::bad_request("Missing course parameter"))
    }

    pub fn lessons(query: &CatalogQuery) -> Result<Self> {
        present(query.ids.as_ref())
            .map(|ids| Self::Lessons { ids })
            .ok_or_else(|| HttpError::bad_request("Missing ids parameter"))
    }

    pub fn listing(query: &CatalogQuery) -> Self {
        Self::Listing {
            page: query.page.unwrap_or(1).max(1),
            language: present(query.language.as_ref())
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        }
    }

    /// Upstream path and query string
    pub fn upstream(&self) -> (String, Vec<(&'static str, String)>) {
        match self {
            Self::Course(id) => (format!("courses/{id}"), Vec::new()),
            Self::Listing { page, language } => (
                "courses".to_string(),
                vec![("page", page.to_string()), ("language", language.clone())],
            ),
            Self::Sections { course } => ("sections".to_string(), vec![("course", course.clone())]),
            Self::Lessons { ids } => ("lessons".to_string(), vec![("ids", ids.clone())]),
            Self::Users { ids } => ("users".to_string(), vec![("ids", ids.clone())]),
        }
    }
}

async fn forward(
    state: &AppState,
    target: &CatalogTarget,
    resource: &'static str,
) -> Result<Json<Value>> {
    let (path, query) = target.upstream();
    let body = state.catalog.fetch(&path, &query, resource).await?;
    tracing::debug!(?target, "catalog request served");
    Ok(Json(body))
}

#[tracing::instrument(skip(state))]
pub async fn course(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    forward(&state, &CatalogTarget::course(&id)?, "course").await
}

#[tracing::instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Value>> {
    forward(&state, &CatalogTarget::listing(&query), "courses").await
}

#[tracing::instrument(skip(state))]
pub async fn sections(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Value>> {
    forward(&state, &CatalogTarget::sections(&query)?, "sections").await
}

#[tracing::instrument(skip(state))]
pub async fn lessons(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Value>> {
    forward(&state, &CatalogTarget::lessons(&query)?, "lessons").await
}

#[tracing::instrument(skip(state))]
pub async fn resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Value>> {
    forward(&state, &CatalogTarget::resolve(&id, &query)?, "data").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CatalogUpstream;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use std::time::Duration;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app(upstream: &str) -> Router {
        let catalog = CatalogUpstream::new(upstream, Duration::from_secs(5)).unwrap();
        router().with_state(AppState::new(catalog, "http://localhost:3000"))
    }

    async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), 1_000_000).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[test]
    fn resolve_dispatches_on_id() {
        let query = CatalogQuery {
            ids: Some("1,2".into()),
            ..CatalogQuery::default()
        };
        assert_eq!(
            CatalogTarget::resolve("users", &query).unwrap(),
            CatalogTarget::Users { ids: "1,2".into() }
        );
        assert_eq!(
            CatalogTarget::resolve("58852", &query).unwrap(),
            CatalogTarget::Course("58852".into())
        );
        assert!(CatalogTarget::resolve("sections", &query).is_err());
        assert!(CatalogTarget::resolve("..", &query).is_err());
    }

    #[test]
    fn listing_defaults() {
        assert_eq!(
            CatalogTarget::listing(&CatalogQuery::default()),
            CatalogTarget::Listing {
                page: 1,
                language: "ru".into()
            }
        );
    }

    #[tokio::test]
    async fn course_body_is_forwarded_verbatim() {
        let upstream = MockServer::start().await;
        let body = json!({"meta": {"page": 1}, "courses": [{"id": 67, "title": "Python"}]});
        Mock::given(method("GET"))
            .and(path("/courses/67"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&upstream)
            .await;

        let (status, json) = call(app(&upstream.uri()), "/api/stepik/courses/67").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, body);
    }

    #[tokio::test]
    async fn sections_forward_course_parameter() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sections"))
            .and(query_param("course", "67"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sections": []})))
            .expect(1)
            .mount(&upstream)
            .await;

        let (status, json) = call(app(&upstream.uri()), "/api/stepik/sections?course=67").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"sections": []}));
    }

    #[tokio::test]
    async fn missing_parameters_are_rejected_without_upstream_call() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&upstream)
            .await;

        let (status, json) = call(app(&upstream.uri()), "/api/stepik/sections").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "Missing course parameter"}));

        let (status, json) = call(app(&upstream.uri()), "/api/stepik/lessons?ids=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "Missing ids parameter"}));

        let (status, json) = call(app(&upstream.uri()), "/api/stepik/users").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "Missing ids parameter"}));
    }

    #[tokio::test]
    async fn users_dispatch_through_generic_route() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("ids", "5,6"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"users": [{"id": 5}]})))
            .mount(&upstream)
            .await;

        let (status, json) = call(app(&upstream.uri()), "/api/stepik/users?ids=5,6").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["users"][0]["id"], 5);
    }

    #[tokio::test]
    async fn upstream_status_is_propagated() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/courses/404404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&upstream)
            .await;

        let (status, json) = call(app(&upstream.uri()), "/api/stepik/404404").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json, json!({"error": "Failed to fetch data: Not Found"}));
    }

    #[tokio::test]
    async fn dedicated_routes_name_the_failed_resource() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&upstream)
            .await;

        let (status, json) = call(app(&upstream.uri()), "/api/stepik/courses/7").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json, json!({"error": "Failed to fetch course: Service Unavailable"}));

        let (_, json) = call(app(&upstream.uri()), "/api/stepik/sections?course=7").await;
        assert_eq!(json, json!({"error": "Failed to fetch sections: Service Unavailable"}));

        let (_, json) = call(app(&upstream.uri()), "/api/stepik/lessons?ids=1").await;
        assert_eq!(json, json!({"error": "Failed to fetch lessons: Service Unavailable"}));

        let (_, json) = call(app(&upstream.uri()), "/api/stepik/courses?page=2").await;
        assert_eq!(json, json!({"error": "Failed to fetch courses: Service Unavailable"}));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_internal_error() {
        let (status, json) = call(app("http://127.0.0.1:9"), "/api/stepik/courses/1").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({"error": "Internal server error"}));
    }
}
