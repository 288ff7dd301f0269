use crate::utils::error::ResumeError;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Error body sent to callers: `{"detail": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for ResumeError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_upstream() {
            tracing::error!("Upstream failure: {}", self);
        } else if status.is_server_error() {
            tracing::error!("Internal failure: {}", self);
        } else {
            tracing::info!("{}", self);
        }

        let body = ErrorBody {
            detail: self.detail(),
        };
        (status, Json(body)).into_response()
    }
}
