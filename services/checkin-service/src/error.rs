use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::auth::DenyReason;
use crate::models::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum CheckinError {
    #[error("security check failed: {}", .0.as_str())]
    Unauthorized(DenyReason),
    #[error("no json data")]
    NoJsonData,
    #[error("internal failure: {0}")]
    Internal(String),
}

impl CheckinError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CheckinError::Unauthorized(_) => StatusCode::FORBIDDEN,
            CheckinError::NoJsonData => StatusCode::BAD_REQUEST,
            CheckinError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CheckinError {
    fn into_response(self) -> Response {
        let body = match &self {
            CheckinError::Unauthorized(_) => ErrorResponse {
                status: "denied",
                reason: Some("Security Check Failed"),
            },
            CheckinError::NoJsonData => ErrorResponse {
                status: "error",
                reason: Some("No JSON data"),
            },
            CheckinError::Internal(message) => {
                // Details stay in the server log.
                tracing::error!(error = %message, "request failed");
                ErrorResponse {
                    status: "error",
                    reason: None,
                }
            }
        };
        (self.status_code(), Json(body)).into_response()
    }
}
