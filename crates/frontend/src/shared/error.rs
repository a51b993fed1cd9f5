use thiserror::Error;

/// Ошибки обращения к API.
///
/// `AuthExpired` is recovered by a forced logout rather than shown on the
/// page; everything else is logged and leaves the UI as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Сессия истекла")]
    AuthExpired,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server rejected request: {0}")]
    Rejected(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Invalid form: {0}")]
    Validation(String),
}

impl ApiError {
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired)
    }
}
