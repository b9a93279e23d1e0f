//! HTTP error mapping for the webhook surface.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;
use triage_tools::ToolError;

/// A request failure with its HTTP status.
///
/// Caller mistakes (unknown tool, bad arguments, unknown symptom) map to
/// 400; anything else is a 500. The body is always `{"error": message}`.
#[derive(Debug)]
pub struct ServerError {
    status: StatusCode,
    message: String,
}

impl ServerError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }
}

impl From<ToolError> for ServerError {
    fn from(err: ToolError) -> Self {
        let status = if err.is_caller_error() {
            StatusCode::BAD_REQUEST
        } else {
            error!(error = %err, "tool execution failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self { status, message: err.to_string() }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
