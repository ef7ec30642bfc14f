//! Error types and their HTTP representation

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Where visitors are sent when a short code does not resolve.
pub const NOT_FOUND_PAGE: &str = "https://http.cat/404";

/// Failures raised by a [`Store`](crate::database::Store) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] redb::Error),

    #[error("corrupt record: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Everything a request handler can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required form field was left empty.
    #[error("{0}")]
    Validation(&'static str),

    /// Bad credentials or an email that is already registered.
    #[error("{0}")]
    Auth(&'static str),

    #[error("short URL not found")]
    NotFound,

    /// The signed-in account does not own the record.
    #[error("you do not own this short URL")]
    Forbidden,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to render page: {0}")]
    Render(#[from] askama::Error),

    #[error("failed to hash password")]
    PasswordHash,

    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(_) | AppError::Auth(_) => {
                tracing::warn!("rejected request: {self}");
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                [(header::LOCATION, NOT_FOUND_PAGE)],
                self.to_string(),
            )
                .into_response(),
            AppError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()).into_response(),
            AppError::Store(_) | AppError::Render(_) | AppError::PasswordHash | AppError::Task(_) => {
                tracing::error!("{self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred",
                )
                    .into_response()
            }
        }
    }
}
