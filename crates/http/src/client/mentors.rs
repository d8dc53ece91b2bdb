//! Mentor directory endpoints (public)

use super::{ApiClient, ApiError};
use crate::types::{Mentor, MentorFilters, MentorsResponse};
use reqwest::Method;

impl ApiClient {
    pub async fn list_mentors(&self, filters: &MentorFilters) -> Result<MentorsResponse, ApiError> {
        let request = self.request(Method::GET, "/mentors").query(filters);
        self.execute(request).await
    }

    pub async fn get_mentor(&self, id: i64) -> Result<Mentor, ApiError> {
        let request = self.request(Method::GET, &format!("/mentors/{id}"));
        self.execute(request).await
    }

    /// Reviews have no fixed shape on this endpoint yet
    pub async fn mentor_reviews(&self, mentor_id: i64) -> Result<serde_json::Value, ApiError> {
        let request = self.request(Method::GET, &format!("/mentors/{mentor_id}/reviews"));
        self.execute(request).await
    }
}
