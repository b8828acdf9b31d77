//! HTTP error translation.
//!
//! # Responsibility
//! - Catch every core error at the serving boundary and turn it into an
//!   explicit status + page before a response escapes.
//!
//! # Invariants
//! - NotFound maps to 404, bad client input to 400, everything else to 500.
//! - Internal failure details are logged, not echoed to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bookshelf_core::db::DbError;
use bookshelf_core::RepoError;
use log::error;

use crate::views;

#[derive(Debug)]
pub enum WebError {
    /// Malformed client input, e.g. a non-numeric year.
    Data(String),
    /// Missing required form field.
    Validation(String),
    /// The addressed book does not exist.
    NotFound(String),
    /// Storage or other server-side failure.
    Internal(String),
}

impl From<RepoError> for WebError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err.to_string()),
            RepoError::NotFound(id) => Self::NotFound(format!("book {id} does not exist")),
            RepoError::Db(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<DbError> for WebError {
    fn from(value: DbError) -> Self {
        Self::Internal(value.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, title, message) = match self {
            Self::Data(message) => (StatusCode::BAD_REQUEST, "Bad request", message),
            Self::Validation(message) => (StatusCode::BAD_REQUEST, "Bad request", message),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, "Not found", message),
            Self::Internal(message) => {
                error!("event=request_failed module=web status=error error={message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error",
                    "something went wrong handling this request".to_string(),
                )
            }
        };

        (status, views::message_page(title, &message)).into_response()
    }
}
