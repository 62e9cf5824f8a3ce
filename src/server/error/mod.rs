//! Error types for the branchdesk server.
//!
//! Domain errors (authentication, configuration, form validation) live in their own modules and
//! are aggregated into [`Error`], which every handler returns. All errors implement
//! `IntoResponse`; anything without a dedicated mapping becomes a logged 500 response.

pub mod auth;
pub mod config;
pub mod form;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError, form::FormErrors},
};

/// Main error type for the branchdesk server.
///
/// Converts from the underlying error types via `?`. The `IntoResponse` implementation maps
/// validation failures to 422, missing records to 404, permission failures to 403 and sends
/// unauthenticated requests to the login page.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication or authorization error.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Submitted form failed validation, nothing was written.
    #[error(transparent)]
    FormError(#[from] FormErrors),
    /// Requested record does not exist.
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: &'static str, id: i32 },
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in branchdesk's code.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// Template rendering error for printable views and the login page.
    #[error(transparent)]
    TemplateError(#[from] tera::Error),
    /// Spreadsheet generation error.
    #[error(transparent)]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),
    /// Listener or socket error while serving.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl Error {
    pub fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound { resource, id }
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 303 See Other - Unauthenticated request, redirected to the login page
/// - 403 Forbidden - Authenticated user lacks the required permission
/// - 404 Not Found - Requested record does not exist
/// - 422 Unprocessable Entity - Form validation failed, body lists field messages
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::FormError(err) => err.into_response(),
            Self::NotFound { resource, id } => {
                tracing::debug!(resource = %resource, id = %id, "Record not found");

                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorDto {
                        error: format!("{} not found", resource),
                    }),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic message to the client so implementation
/// details are not leaked.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
