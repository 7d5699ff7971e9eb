// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::{ErrorDetail, InternalErrorBody};

#[derive(Debug, Error)]
pub enum AppError {
    /// Client input error. Logged at info by the caller, never as an error.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Handled failure of the external completion service.
    #[error("upstream failure: {0}")]
    Upstream(String),

    /// Anything unexpected. Rendered generically; the request middleware logs
    /// the detail and stamps the real trace id.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Response extension marking a response produced for an unhandled failure.
#[derive(Debug, Clone)]
pub struct UnhandledFailure(pub String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDetail { detail })).into_response()
            }
            AppError::Upstream(detail) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorDetail { detail })).into_response()
            }
            AppError::Internal(detail) => {
                let mut response = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(InternalErrorBody::new("unknown")),
                )
                    .into_response();
                response.extensions_mut().insert(UnhandledFailure(detail));
                response
            }
        }
    }
}
