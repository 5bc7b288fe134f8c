use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// 401 from the server; carries the server detail so callers can show
    /// it as-is (e.g. "Email ou senha incorretos").
    #[error("{0}")]
    Unauthorized(String),

    #[error("Session expired - please log in again")]
    SessionExpired,

    #[error("No refresh token available")]
    NoRefreshToken,

    /// Request rejected by the server (4xx); message comes from the server.
    #[error("{0}")]
    Rejected(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Shown when the server gives no usable detail message
const GENERIC_ERROR_MESSAGE: &str = "Erro de comunicação com o servidor";

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    /// Pull the `{"detail": "..."}` message out of an error body, falling
    /// back to the truncated raw body or a generic message.
    fn detail_message(body: &str) -> String {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(detail) = value.get("detail").and_then(serde_json::Value::as_str) {
                return detail.to_string();
            }
        }
        if body.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            Self::truncate_body(body)
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = Self::detail_message(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized(detail),
            400..=499 => ApiError::Rejected(detail),
            500..=599 => ApiError::ServerError(detail),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, detail)),
        }
    }
}
