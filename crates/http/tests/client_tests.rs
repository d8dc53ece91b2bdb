//! Integration tests for the MentorHub API client

#![cfg(feature = "client")]

use mentorhub_core::{MemoryStore, TokenStore};
use mentorhub_http::client::error::{NETWORK_MESSAGE, UNAUTHORIZED_MESSAGE};
use mentorhub_http::client::{ApiClient, ApiError, CatalogClient};
use mentorhub_http::types::{
    LessonInput, LoginCredentials, MentorFilters, ProgressUpdate, ReviewSummaryRef,
    SessionFilter, UpdateSessionRequest,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn tokens(token: Option<&str>) -> TokenStore {
    let tokens = TokenStore::new(Arc::new(MemoryStore::new()));
    if let Some(token) = token {
        tokens.set(token, None, None, None);
    }
    tokens
}

fn session_json(id: i64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "mentor_id": 7,
        "student_id": 3,
        "topic": "Rust ownership",
        "scheduled_time": "2024-05-01T10:00:00",
        "duration": 60,
        "price": 1500.0,
        "status": status
    })
}

#[tokio::test]
async fn test_client_builder() {
    let client = ApiClient::builder()
        .base_url("http://localhost:8000/api/v1/")
        .tokens(tokens(None))
        .build()
        .unwrap();
    assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
}

#[tokio::test]
async fn test_client_builder_requires_token_store() {
    let result = ApiClient::builder().base_url("http://localhost").build();
    assert!(matches!(result, Err(ApiError::Configuration(_))));
}

#[tokio::test]
async fn test_sessions_without_token_make_no_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri(), tokens(None)).unwrap();

    let result = client.my_sessions(None).await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
    assert!(matches!(client.dashboard().await, Err(ApiError::Unauthorized)));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_my_sessions_with_status_filter() {
    let mock_server = MockServer::start().await;
    let sessions = json!([session_json(1, "confirmed"), session_json(2, "pending")]);

    Mock::given(method("GET"))
        .and(path("/sessions/my"))
        .and(query_param("status", "upcoming"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&sessions))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri(), tokens(Some("secret"))).unwrap();
    let result = client.my_sessions(Some(SessionFilter::Upcoming)).await.unwrap();

    assert_eq!(serde_json::to_value(&result).unwrap()[0]["id"], 1);
    assert_eq!(result.len(), 2);
    assert_eq!(result[1].topic, "Rust ownership");

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("status=upcoming"));
}

#[tokio::test]
async fn test_absent_filter_is_omitted() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sessions/my"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri(), tokens(Some("t"))).unwrap();
    client.my_sessions(None).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_review_listing_unauthorized_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/courses/123/reviews"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri(), tokens(Some("expired"))).unwrap();
    let err = client.course_reviews(123, 1, 10).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), UNAUTHORIZED_MESSAGE);
    assert_eq!(err.user_message(), "Требуется авторизация. Пожалуйста, войдите.");
}

#[tokio::test]
async fn test_review_page_decodes_envelope() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/courses/5/reviews"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 11,
            "page": 2,
            "page_size": 10,
            "total_pages": 2,
            "data": [{"id": 9, "user_id": 4, "rating": 5, "created_at": "2024-01-01T00:00:00"}]
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri(), tokens(Some("t"))).unwrap();
    let page = client.course_reviews(5, 2, 10).await.unwrap();

    assert!(page.is_consistent());
    assert_eq!(page.data[0].rating, 5);
    assert!(page.data[0].user_name.is_none());
}

#[tokio::test]
async fn test_error_detail_is_surfaced() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mentors/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Ментор не найден"})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/mentors/100"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri(), tokens(None)).unwrap();

    match client.get_mentor(99).await {
        Err(ApiError::Request { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Ментор не найден");
        }
        other => panic!("unexpected result: {other:?}"),
    }

    match client.get_mentor(100).await {
        Err(ApiError::Request { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_network_error_is_distinct() {
    let client = ApiClient::new("http://127.0.0.1:9", tokens(Some("t"))).unwrap();
    let err = client.dashboard().await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.user_message(), NETWORK_MESSAGE);
}

#[tokio::test]
async fn test_login_persists_tokens_and_logout_clears_them() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "anna@example.com", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access",
            "refresh_token": "refresh",
            "expires_in": 3600
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("Authorization", "Bearer access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "email": "anna@example.com",
            "username": "anna",
            "full_name": "Анна Петрова",
            "role": "mentor",
            "created_at": "2024-05-01T10:00:00"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = tokens(None);
    let client = ApiClient::new(mock_server.uri(), store.clone()).unwrap();
    client
        .login(&LoginCredentials {
            email: "anna@example.com".into(),
            password: "hunter2".into(),
        })
        .await
        .unwrap();

    assert_eq!(store.get().as_deref(), Some("access"));
    assert_eq!(store.refresh_token().as_deref(), Some("refresh"));
    let record = store.record().unwrap();
    assert_eq!(record.display_name.as_deref(), Some("Анна Петрова"));
    assert_eq!(record.role.as_deref(), Some("mentor"));

    client.logout();
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn test_login_survives_failed_profile_lookup() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access",
            "token_type": "bearer"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let store = tokens(None);
    let client = ApiClient::new(mock_server.uri(), store.clone()).unwrap();
    client
        .login(&LoginCredentials {
            email: "anna@example.com".into(),
            password: "hunter2".into(),
        })
        .await
        .unwrap();

    let record = store.record().unwrap();
    assert_eq!(record.access_token, "access");
    assert_eq!(record.display_name, None);
}

#[tokio::test]
async fn test_cancel_session_patches_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/sessions/4"))
        .and(body_json(json!({"status": "cancelled"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_json(4, "cancelled")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri(), tokens(Some("t"))).unwrap();
    let session = client.cancel_session(4).await.unwrap();
    assert_eq!(
        serde_json::to_value(session.status).unwrap(),
        json!("cancelled")
    );

    let update = UpdateSessionRequest::default();
    assert_eq!(serde_json::to_value(&update).unwrap(), json!({}));
}

#[tokio::test]
async fn test_delete_course_accepts_no_content() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/courses/12"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri(), tokens(Some("t"))).unwrap();
    client.delete_course(12).await.unwrap();
}

#[tokio::test]
async fn test_public_endpoints_send_token_when_present() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mentors"))
        .respond_with(|request: &Request| {
            let authorized = request.headers.contains_key("authorization");
            ResponseTemplate::new(200).set_body_json(json!({
                "mentors": [],
                "total": 0,
                "page": 1,
                "pages": u8::from(authorized)
            }))
        })
        .mount(&mock_server)
        .await;

    let filters = MentorFilters {
        specialization: Some("backend".into()),
        ..MentorFilters::default()
    };

    let anonymous = ApiClient::new(mock_server.uri(), tokens(None)).unwrap();
    assert_eq!(anonymous.list_mentors(&filters).await.unwrap().pages, 0);

    let signed_in = ApiClient::new(mock_server.uri(), tokens(Some("t"))).unwrap();
    assert_eq!(signed_in.list_mentors(&filters).await.unwrap().pages, 1);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("specialization=backend"));
}

#[tokio::test]
async fn test_progress_write_requires_token() {
    let client = ApiClient::new("http://127.0.0.1:9", tokens(None)).unwrap();
    let update = ProgressUpdate {
        course_id: 1,
        lesson_id: None,
        progress_percent: 50.0,
        completed: false,
    };
    assert!(matches!(
        client.upsert_progress(&update).await,
        Err(ApiError::Unauthorized)
    ));
}

#[tokio::test]
async fn test_catalog_empty_lessons_skip_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"lessons": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let catalog = CatalogClient::new(mock_server.uri()).unwrap();
    assert!(catalog.catalog_lessons(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_catalog_course_details_assembles_syllabus() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/courses/67"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"page": 1, "has_next": false, "has_previous": false},
            "courses": [{"id": 67, "title": "Python", "instructors": [5], "sections": [1, 2]}]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("ids", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"id": 5, "full_name": "Иван Петров"}]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sections"))
        .and(query_param("course", "67"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sections": [
                {"id": 2, "title": "Функции", "position": 2, "lessons": [30]},
                {"id": 1, "title": "Основы", "position": 1, "lessons": [11, 10]}
            ]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/lessons"))
        .and(query_param("ids", "30,11,10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lessons": [
                {"id": 10, "title": "Переменные", "position": 1},
                {"id": 11, "title": "Типы", "position": 2},
                {"id": 30, "title": "def", "position": 1}
            ]
        })))
        .mount(&mock_server)
        .await;

    let catalog = CatalogClient::new(mock_server.uri()).unwrap();
    let details = catalog.catalog_course_details(67).await.unwrap();

    assert_eq!(details.course.title, "Python");
    assert_eq!(details.instructors[0].name, "Иван Петров");
    let titles: Vec<&str> = details.syllabus.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Основы", "Функции"]);
    let first: Vec<u64> = details.syllabus[0].lessons.iter().map(|l| l.id).collect();
    assert_eq!(first, vec![10, 11]);
}

#[tokio::test]
async fn test_catalog_course_with_summary_id() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/courses/67"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "courses": [{"id": 67, "title": "Python", "review_summary": 67, "cover": null}]
        })))
        .mount(&mock_server)
        .await;

    let catalog = CatalogClient::new(mock_server.uri()).unwrap();
    let course = catalog.catalog_course(67).await.unwrap();
    assert_eq!(course.title, "Python");
    assert_eq!(course.review_summary, Some(ReviewSummaryRef::Id(67)));
}

#[tokio::test]
async fn test_catalog_reads_are_memoised() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sections"))
        .and(query_param("course", "67"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sections": [{"id": 1, "title": "Основы", "position": 1, "lessons": []}]
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let catalog = CatalogClient::new(mock_server.uri()).unwrap();
    let shared = catalog.clone();

    assert_eq!(catalog.catalog_sections(67).await.unwrap().len(), 1);
    assert_eq!(shared.catalog_sections(67).await.unwrap().len(), 1);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);

    catalog.clear_cache();
    catalog.catalog_sections(67).await.unwrap();
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_catalog_failures_are_not_memoised() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/courses/5"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/courses/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "courses": [{"id": 5, "title": "Rust"}]
        })))
        .mount(&mock_server)
        .await;

    let catalog = CatalogClient::new(mock_server.uri()).unwrap();
    assert!(catalog.catalog_course(5).await.is_err());
    assert_eq!(catalog.catalog_course(5).await.unwrap().title, "Rust");
}

#[tokio::test]
async fn test_achievements_require_token() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri(), tokens(None)).unwrap();
    assert!(matches!(client.my_achievements().await, Err(ApiError::Unauthorized)));
    assert!(matches!(client.get_achievement(1).await, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn test_my_achievements() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/achievements/my"))
        .and(header("authorization", "Bearer t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "user_id": 3,
            "title": "Первая сессия",
            "description": "Завершите первую сессию",
            "icon": "🎓",
            "earned_at": "2024-05-01T10:00:00"
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri(), tokens(Some("t"))).unwrap();
    let achievements = client.my_achievements().await.unwrap();
    assert_eq!(achievements[0].title, "Первая сессия");
}

fn lesson_json(id: i64, title: &str) -> serde_json::Value {
    json!({"id": id, "course_id": 12, "title": title, "duration_minutes": 15, "order": 1})
}

#[tokio::test]
async fn test_lesson_management() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/courses/12/lessons"))
        .and(body_json(json!({"course_id": 12, "title": "Введение", "order": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(lesson_json(40, "Введение")))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/courses/lessons/40"))
        .and(body_json(json!({"title": "Вступление"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(lesson_json(40, "Вступление")))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/courses/lessons/40"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri(), tokens(Some("t"))).unwrap();
    let created = client
        .create_lesson(
            12,
            &LessonInput {
                course_id: Some(12),
                title: Some("Введение".into()),
                order: Some(1),
                ..LessonInput::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(created.id, 40);

    let renamed = LessonInput {
        title: Some("Вступление".into()),
        ..LessonInput::default()
    };
    assert_eq!(client.update_lesson(40, &renamed).await.unwrap().title, "Вступление");
    client.delete_lesson(40).await.unwrap();

    let anonymous = ApiClient::new(mock_server.uri(), tokens(None)).unwrap();
    assert!(matches!(anonymous.delete_lesson(40).await, Err(ApiError::Unauthorized)));
}
