//! Learning progress endpoints

use super::{ApiClient, ApiError};
use crate::types::{ProgressRecord, ProgressUpdate};
use reqwest::Method;

impl ApiClient {
    /// Progress of the current user. Sent without a token when none is
    /// stored; the backend then answers for an anonymous visitor or rejects.
    pub async fn my_progress(&self, course_id: Option<i64>) -> Result<Vec<ProgressRecord>, ApiError> {
        let mut request = self.request(Method::GET, "/users/me/progress");
        if let Some(course_id) = course_id {
            request = request.query(&[("course_id", course_id)]);
        }
        self.execute(request).await
    }

    pub async fn upsert_progress(&self, update: &ProgressUpdate) -> Result<ProgressRecord, ApiError> {
        let request = self.authorized(Method::POST, "/progress")?.json(update);
        self.execute(request).await
    }
}
