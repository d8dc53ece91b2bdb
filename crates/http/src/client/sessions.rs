//! Mentoring session endpoints (authenticated)

use super::{ApiClient, ApiError};
use crate::types::{
    CreateSessionRequest, Session, SessionFilter, SessionStatus, UpdateSessionRequest,
};
use reqwest::Method;

impl ApiClient {
    /// Sessions of the current user, optionally narrowed to upcoming or past
    pub async fn my_sessions(&self, filter: Option<SessionFilter>) -> Result<Vec<Session>, ApiError> {
        let mut request = self.authorized(Method::GET, "/sessions/my")?;
        if let Some(filter) = filter {
            request = request.query(&[("status", filter.as_str())]);
        }
        self.execute(request).await
    }

    pub async fn get_session(&self, id: i64) -> Result<Session, ApiError> {
        let request = self.authorized(Method::GET, &format!("/sessions/{id}"))?;
        self.execute(request).await
    }

    pub async fn create_session(&self, data: &CreateSessionRequest) -> Result<Session, ApiError> {
        let request = self.authorized(Method::POST, "/sessions")?.json(data);
        self.execute(request).await
    }

    pub async fn update_session(
        &self,
        id: i64,
        data: &UpdateSessionRequest,
    ) -> Result<Session, ApiError> {
        let request = self
            .authorized(Method::PATCH, &format!("/sessions/{id}"))?
            .json(data);
        self.execute(request).await
    }

    pub async fn cancel_session(&self, id: i64) -> Result<Session, ApiError> {
        self.set_session_status(id, SessionStatus::Cancelled).await
    }

    pub async fn confirm_session(&self, id: i64) -> Result<Session, ApiError> {
        self.set_session_status(id, SessionStatus::Confirmed).await
    }

    async fn set_session_status(&self, id: i64, status: SessionStatus) -> Result<Session, ApiError> {
        let update = UpdateSessionRequest {
            status: Some(status),
            ..UpdateSessionRequest::default()
        };
        self.update_session(id, &update).await
    }
}
