//! Achievements of the signed-in user

use super::{ApiClient, ApiError};
use crate::types::Achievement;
use reqwest::Method;

impl ApiClient {
    pub async fn my_achievements(&self) -> Result<Vec<Achievement>, ApiError> {
        let request = self.authorized(Method::GET, "/achievements/my")?;
        self.execute(request).await
    }

    pub async fn get_achievement(&self, id: i64) -> Result<Achievement, ApiError> {
        let request = self.authorized(Method::GET, &format!("/achievements/{id}"))?;
        self.execute(request).await
    }
}
