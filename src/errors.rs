use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub const CONFIG_ERROR_MESSAGE: &str = "Server configuration error. Please contact support.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong. Please try again later.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No data provided")]
    NoData,

    #[error("{0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Attaches the underlying detail to 500 responses when running in development.
    pub fn into_response_with_detail(self, development: bool) -> Response {
        match &self {
            AppError::Internal(e) if development => (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(json!({
                    "success": false,
                    "message": INTERNAL_ERROR_MESSAGE,
                    "error": format!("{e:#}"),
                })),
            )
                .into_response(),
            _ => self.into_response(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NoData => (
                StatusCode::BAD_REQUEST,
                json!({ "message": self.to_string() }),
            ),
            AppError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": message }),
            ),
            AppError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "success": false, "message": CONFIG_ERROR_MESSAGE }),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "success": false, "message": INTERNAL_ERROR_MESSAGE }),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Delivery failure inside the background dispatcher. Never reaches a client.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    #[error("invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("provider rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

impl TransportError {
    pub fn kind(&self) -> &'static str {
        match self {
            TransportError::MissingCredentials(_) => "missing_credentials",
            TransportError::InvalidAddress { .. } => "invalid_address",
            TransportError::Build(_) => "build",
            TransportError::Rejected { .. } => "rejected",
            TransportError::Network(_) => "network",
            TransportError::Smtp(_) => "smtp",
        }
    }
}
