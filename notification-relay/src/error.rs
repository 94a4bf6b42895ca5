use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::ProviderError;

pub const TITLE_AND_BODY_REQUIRED: &str = "title and body required";
pub const TARGET_REQUIRED: &str = "token or topic required";
pub const INVALID_BODY: &str = "invalid request body";

/// Outcomes of `/send` that end the request early.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Server not configured")]
    ServerMisconfigured,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(&'static str),

    #[error("send failed: {0}")]
    Provider(#[from] ProviderError),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            detail: Option<String>,
        }

        let (status, error, detail) = match self {
            RelayError::ServerMisconfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server not configured".to_string(),
                None,
            ),
            RelayError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string(), None)
            }
            RelayError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.to_string(), None),
            RelayError::Provider(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "send failed".to_string(),
                Some(err.to_string()),
            ),
        };

        (status, Json(ErrorResponse { error, detail })).into_response()
    }
}
