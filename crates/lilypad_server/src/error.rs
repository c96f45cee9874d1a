//! Mapping of failures onto HTTP responses.

use crate::registry::SessionId;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::{Display, From};
use lilypad_core::{ErrorClass, SessionError};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Errors surfaced by the REST service.
#[derive(Debug, Display, From)]
pub enum ApiError {
    /// No session has this id.
    #[display("Session '{}' not found", _0)]
    #[from(skip)]
    SessionNotFound(SessionId),

    /// The request body could not be understood.
    #[display("Invalid request: {}", _0)]
    #[from(skip)]
    InvalidRequest(String),

    /// An undo index below zero.
    #[display("Index {} is negative", _0)]
    #[from(skip)]
    NegativeIndex(i64),

    /// The engine rejected the operation.
    #[display("{}", _0)]
    Session(SessionError),
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Session(e) => Some(e),
            _ => None,
        }
    }
}

/// JSON body of every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable kind, e.g. `not_one_edit_away`.
    pub error: String,
    /// Human-readable description.
    pub message: String,
}

impl ApiError {
    /// Machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SessionNotFound(_) => "session_not_found",
            Self::InvalidRequest(_) => "invalid_request",
            Self::NegativeIndex(_) => "invalid_index",
            Self::Session(e) => e.kind(),
        }
    }

    /// HTTP status for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidRequest(_) | Self::NegativeIndex(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Session(e) => match e.class() {
                ErrorClass::Input => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorClass::Sequencing => StatusCode::CONFLICT,
                ErrorClass::NoPath => StatusCode::NOT_FOUND,
                ErrorClass::Oracle => StatusCode::BAD_GATEWAY,
                ErrorClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = %status, error = %self, "Request failed");
        } else {
            warn!(status = %status, error = %self, "Request rejected");
        }
        let body = ErrorBody {
            error: self.kind().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
