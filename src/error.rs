use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Every way a request can fail. Each variant maps to one status and body shape.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid or missing address")]
    InvalidAddress,

    /// A credential the handler needs is absent or unreadable
    #[error("{0}")]
    Config(String),

    /// check-env could not read the environment
    #[error("{0}")]
    Environment(String),

    /// Upstream answered with a non-success status
    #[error("{provider} API error")]
    Upstream {
        provider: &'static str,
        status: StatusCode,
        body: String,
    },

    /// HTTP 200 carrying a GraphQL `errors` payload
    #[error("Bitquery GraphQL error")]
    GraphQl(String),

    /// Built through `From`, which strips the request URL (it can carry an API key)
    #[error("Upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Internal server error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.without_url())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::InvalidAddress => (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() })),
            ApiError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg })),
            ApiError::Environment(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "ok": false, "error": msg }),
            ),
            ApiError::Upstream { status, body, .. } => {
                (*status, json!({ "error": self.to_string(), "body": body }))
            }
            ApiError::GraphQl(details) => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": self.to_string(), "details": details }),
            ),
            ApiError::Transport(e) => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": "Upstream request failed", "details": e.to_string() }),
            ),
            ApiError::Decode(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error", "details": e.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
