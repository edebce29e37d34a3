use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmpaError {
    #[error("Database Error: {0}")]
    Database(#[from] ampa_models::AmpaModelError),
    #[error("SQLx Error: {0}")]
    SQLx(#[from] sqlx::Error),
    #[error("IO Error: {0}")]
    IO(#[from] std::io::Error),
    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Serde: JSON: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("Configuration Error: {0}")]
    Envy(#[from] envy::Error),
    #[error("Could not parse URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Could not join thread: {0}")]
    JoinError(#[from] tokio::task::JoinError),
    #[error("Access has been denied")]
    AccessDenied,
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
    #[error("Configuration Variable Unset: {0}")]
    ConfigurationUnset(String),
    #[error("{0} {1} not found")]
    ObjectNotFound(String, String),
    #[error("Other Error: {0:?}")]
    Other(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type AmpaResult<T> = std::result::Result<T, AmpaError>;

impl IntoResponse for AmpaError {
    fn into_response(self) -> Response {
        match self {
            AmpaError::AccessDenied => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "error": "Unauthorized" })),
            )
                .into_response(),
            AmpaError::InvalidPayload(msg) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": msg })),
            )
                .into_response(),
            err => {
                error!("Error presented to user: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
