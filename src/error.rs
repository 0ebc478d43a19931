use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors surfaced to HTTP clients.
///
/// Upstream failures never reach this type; handlers log them and answer
/// with an empty result set.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The selected provider has no credential configured.
    #[error("{0} not configured")]
    MissingCredential(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingCredential(var) => {
                tracing::error!(var, "upstream credential is not configured");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
