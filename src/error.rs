use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Body returned for every failed generation. Provider details never leave the server.
pub const GENERATION_FAILED: &str = "Failed to generate text.";

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Text generation failed: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Playback failed: {0}")]
    Playback(String),

    #[error("Generation already in progress for preset '{0}'")]
    Busy(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = match &self {
            AppError::Generation(_) => "GENERATION_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Playback(_) => "PLAYBACK_ERROR",
            AppError::Busy(_) => "BUSY",
            AppError::Http(_) => "HTTP_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Json(_) => "JSON_ERROR",
        };

        tracing::error!("Request failed: {} - {}", code, self);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: GENERATION_FAILED.to_string(),
            }),
        )
            .into_response()
    }
}
