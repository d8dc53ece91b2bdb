//! Dashboard endpoints (authenticated)

use super::{ApiClient, ApiError};
use crate::types::{DashboardData, DashboardStats};
use reqwest::Method;

impl ApiClient {
    pub async fn dashboard(&self) -> Result<DashboardData, ApiError> {
        let request = self.authorized(Method::GET, "/dashboard")?;
        self.execute(request).await
    }

    pub async fn user_stats(&self) -> Result<DashboardStats, ApiError> {
        let request = self.authorized(Method::GET, "/users/me/stats")?;
        self.execute(request).await
    }
}
