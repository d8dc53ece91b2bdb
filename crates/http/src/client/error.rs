//! Client error types

use thiserror::Error;

/// Fixed text shown when the backend rejects the stored credentials
pub const UNAUTHORIZED_MESSAGE: &str = "Требуется авторизация. Пожалуйста, войдите.";

/// Fixed text shown when the backend cannot be reached
pub const NETWORK_MESSAGE: &str = "Ошибка сети";

/// Failure of an API call
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response at all (DNS, connection refused, timeout)
    #[error("Ошибка сети")]
    Network(#[source] reqwest::Error),

    /// Non-2xx response other than 401
    #[error("{message}")]
    Request { status: u16, message: String },

    /// 401 from the backend, or no stored token for an endpoint that needs one
    #[error("Требуется авторизация. Пожалуйста, войдите.")]
    Unauthorized,

    /// 2xx response whose body did not match the expected shape
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ApiError {
    /// Map a non-success status and its best-effort message
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            401 => Self::Unauthorized,
            code => Self::Request {
                status: code,
                message,
            },
        }
    }

    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            _ => None,
        }
    }

    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Text suitable for a toast or an inline error
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => NETWORK_MESSAGE.to_string(),
            Self::Unauthorized => UNAUTHORIZED_MESSAGE.to_string(),
            Self::Request { message, .. } => message.clone(),
            Self::Decode(_) | Self::Configuration(_) => "Что-то пошло не так".to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err)
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
