use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use userproxy_shared::error::ProxyError;

/// Newtype wrapper for `ProxyError` that implements `IntoResponse`.
///
/// Needed because of the orphan rule — neither the trait (`IntoResponse`)
/// nor the type (`ProxyError`) is defined in this crate.
#[derive(Debug)]
pub struct ServerError(pub ProxyError);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            ProxyError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                serde_json::json!({ "error": "Method not allowed" }),
            ),
            ProxyError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, serde_json::json!({ "error": msg }))
            }
            ProxyError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                serde_json::json!({
                    "error": "Payload too large",
                    "message": msg,
                }),
            ),
            ProxyError::Upstream { status, details } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                serde_json::json!({
                    "error": "Failed to fetch user data",
                    "details": details,
                }),
            ),
            ProxyError::Internal(msg) => {
                tracing::error!(error = %msg, "unhandled failure while looking up user");
                let message = if msg.is_empty() {
                    "Unknown error".to_string()
                } else {
                    msg
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({
                        "error": "Internal server error",
                        "message": message,
                    }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<ProxyError> for ServerError {
    fn from(e: ProxyError) -> Self {
        ServerError(e)
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(e: serde_json::Error) -> Self {
        ServerError(e.into())
    }
}
