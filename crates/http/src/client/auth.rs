//! Authentication endpoints

use super::{ApiClient, ApiError};
use crate::types::{LoginCredentials, RefreshRequest, RegisterData, TokenResponse, User};
use reqwest::Method;

impl ApiClient {
    /// Log in and persist the returned tokens, then look up the profile so
    /// the display name and role are stored next to them. A failed profile
    /// lookup leaves the login in place without a name.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<TokenResponse, ApiError> {
        let request = self
            .request(Method::POST, "/auth/login")
            .json(credentials);
        let tokens: TokenResponse = self.execute(request).await?;

        self.tokens().set(
            &tokens.access_token,
            tokens.refresh_token.as_deref(),
            None,
            None,
        );
        match self.current_user().await {
            Ok(user) => self.tokens().set(
                &tokens.access_token,
                tokens.refresh_token.as_deref(),
                Some(user.display_name()),
                Some(user.role.as_str()),
            ),
            Err(err) => tracing::warn!(error = %err, "profile lookup after login failed"),
        }
        tracing::info!("logged in");
        Ok(tokens)
    }

    pub async fn register(&self, data: &RegisterData) -> Result<User, ApiError> {
        let request = self.request(Method::POST, "/auth/register").json(data);
        self.execute(request).await
    }

    /// Exchange a refresh token for a new token pair. Nothing calls this
    /// automatically on a 401; the caller decides when to renew.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse, ApiError> {
        let request = self
            .request(Method::POST, "/auth/refresh")
            .json(&RefreshRequest {
                refresh_token: refresh_token.to_string(),
            });
        self.execute(request).await
    }

    /// Forget the stored credentials. The backend keeps no session state, so
    /// no request is made.
    pub fn logout(&self) {
        self.tokens().clear();
        tracing::info!("logged out");
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        let request = self.authorized(Method::GET, "/users/me")?;
        self.execute(request).await
    }
}
