/// Shared error type for the user profile proxy.
///
/// Every failure the handler can produce is one of these variants; the server
/// maps each to an HTTP status and JSON body.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("upstream returned HTTP {status}")]
    Upstream {
        status: u16,
        details: serde_json::Value,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for ProxyError {
    fn from(e: serde_json::Error) -> Self {
        ProxyError::Internal(e.to_string())
    }
}
