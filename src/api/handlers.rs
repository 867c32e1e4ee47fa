use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::DnaReport,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDnaRequest {
    #[serde(default)]
    pub movie_title: Option<String>,
}

impl MovieDnaRequest {
    /// The trimmed title, rejecting missing or blank input
    fn validated_title(&self) -> AppResult<&str> {
        match self.movie_title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => Ok(title),
            _ => Err(AppError::InvalidInput(
                "Movie title is required".to_string(),
            )),
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "message": "Movie DNA API is running" })),
    )
}

/// Analyze the creative DNA of a movie and recommend related titles
pub async fn movie_dna(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<MovieDnaRequest>, JsonRejection>,
) -> AppResult<Json<DnaReport>> {
    let Json(request) =
        payload.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;
    let title = request.validated_title()?;

    tracing::info!(
        request_id = %request_id,
        movie_title = %title,
        "Processing movie DNA request"
    );

    let report = state.dna_service.analyze(title).await.map_err(|e| {
        tracing::error!(
            request_id = %request_id,
            error = %e,
            "Movie DNA analysis failed"
        );
        e
    })?;

    tracing::info!(
        request_id = %request_id,
        movie_id = report.original_movie.movie.id,
        "Movie DNA request completed"
    );

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> MovieDnaRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_validated_title() {
        assert_eq!(
            request(r#"{"movieTitle": "  Inception "}"#).validated_title().unwrap(),
            "Inception"
        );
    }

    #[test]
    fn test_missing_or_blank_title_rejected() {
        for body in [
            r#"{}"#,
            r#"{"movieTitle": ""}"#,
            r#"{"movieTitle": "   "}"#,
            r#"{"movieTitle": null}"#,
        ] {
            let err = request(body).validated_title().unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)), "body {}", body);
        }
    }
}
