use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Internal(String),
    InternalWithDetails(String, Value),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidCredentials => {
                HttpError::Unauthorized("Invalid credentials".to_string())
            }

            ServiceError::Validation(errors) => HttpError::BadRequest(errors.join("; ")),

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Not found".into()),
                RepositoryError::AlreadyExists(msg) => {
                    HttpError::BadRequest(format!("Already exists: {msg}"))
                }
                RepositoryError::ForeignKey(msg) => {
                    HttpError::BadRequest(format!("Foreign key violation: {msg}"))
                }
                RepositoryError::Sqlx(err) => {
                    error!("❌ Unhandled store error: {err:?}");
                    HttpError::Internal("Repository error".into())
                }
                RepositoryError::Custom(msg) => HttpError::Internal(msg),
            },

            ServiceError::Jwt(err) => HttpError::Forbidden(format!("JWT error: {err}")),

            ServiceError::TokenExpired => HttpError::Forbidden("Token expired".into()),

            ServiceError::Bcrypt(_) => HttpError::Internal("Internal authentication error".into()),

            ServiceError::SyncRejected(failures) => HttpError::InternalWithDetails(
                "Errors inserting some products".into(),
                serde_json::to_value(&failures).unwrap_or(Value::Null),
            ),

            ServiceError::Internal(msg) => HttpError::Internal(msg),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg, details) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            HttpError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            HttpError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            HttpError::InternalWithDetails(msg, details) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg, Some(details))
            }
        };

        let body = Json(ErrorResponse {
            status: "error".into(),
            message: msg,
            details,
        });

        (status, body).into_response()
    }
}
