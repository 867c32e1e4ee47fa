use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An upstream provider answered with a non-success status or an unreadable payload
    #[error("{provider} API returned status {status}: {body}")]
    Provider {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// The completion provider produced nothing usable
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Transport-level failure, including timeouts. The URL is stripped on
    /// conversion because provider keys travel in query strings.
    #[error("HTTP client error: {0}")]
    HttpClient(reqwest::Error),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::HttpClient(err.without_url())
    }
}

impl AppError {
    /// Builds a provider error for a payload that could not be decoded
    pub fn malformed(provider: &'static str, detail: impl std::fmt::Display) -> Self {
        AppError::Provider {
            provider,
            status: StatusCode::BAD_GATEWAY.as_u16(),
            body: format!("malformed response: {}", detail),
        }
    }

    /// True when the failure is not local to one lookup, e.g. rejected credentials.
    /// Such errors abort the whole request instead of degrading one axis.
    pub fn is_global(&self) -> bool {
        matches!(
            self,
            AppError::Provider {
                status: 401 | 403,
                ..
            }
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Provider { .. } | AppError::HttpClient(_) => {
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            AppError::Generation(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
