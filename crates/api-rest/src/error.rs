//! Error-to-status mapping for the REST surface.

use adss_core::DiagnosisError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Wire shape for every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }
}

impl From<DiagnosisError> for ApiError {
    fn from(err: DiagnosisError) -> Self {
        let status = match &err {
            DiagnosisError::NoSessionForPatient(_) | DiagnosisError::SessionNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            DiagnosisError::NotCompleted(_) | DiagnosisError::ConcurrentUpdate(_) => {
                StatusCode::CONFLICT
            }
            DiagnosisError::Reasoning(_) => StatusCode::BAD_GATEWAY,
            DiagnosisError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, "{}", self.message);
        }
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}
