//! Mapping from library errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use verifaq_core::Error;

/// Handler error wrapper; renders as `{error, kind}` with a matching status.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::InsufficientContent { .. } | Error::EmptyExtraction(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Error::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Error::Decode(_) => StatusCode::BAD_REQUEST,
            Error::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self.0);
        }

        (
            status,
            Json(serde_json::json!({
                "error": self.0.user_message(),
                "kind": self.0.kind(),
            })),
        )
            .into_response()
    }
}
