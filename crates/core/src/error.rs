//! Common error types for the client core

/// Standard result type for core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Errors raised by the core. None of these are shown to the user: callers
/// recover locally (usually by falling back to defaults) and log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Persisted data did not have the expected shape
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl CoreError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConsentRecord;

    #[test]
    fn malformed_consent_is_a_validation_error() {
        let err = ConsentRecord::parse("not json").unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
        assert!(err.to_string().starts_with("Validation error: cookie consent:"));
    }
}
