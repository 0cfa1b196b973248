use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing ip field")]
    MissingIp,
    #[error("upstream rejected message with status {status}")]
    Upstream { status: u16, body: String },
    #[error("internal error")]
    Internal { message: String },
}

/// Failure of a single delivery attempt to the messaging API.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("messaging api returned status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("messaging api unreachable: {0}")]
    Transport(String),
}

/// Attached to error responses so the request log can say which branch failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    MissingIp,
    UpstreamRejected,
    Transport,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingIp => "missing_ip",
            Self::UpstreamRejected => "upstream_rejected",
            Self::Transport => "transport",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

impl AppError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MissingIp => FailureKind::MissingIp,
            Self::Upstream { .. } => FailureKind::UpstreamRejected,
            Self::Internal { .. } => FailureKind::Transport,
        }
    }
}

impl From<DeliveryError> for AppError {
    fn from(err: DeliveryError) -> Self {
        match err {
            DeliveryError::Rejected { status, body } => Self::Upstream { status, body },
            DeliveryError::Transport(message) => Self::internal(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let (status, error) = match self {
            Self::MissingIp => (StatusCode::BAD_REQUEST, "Missing ip field"),
            Self::Upstream { status, body } => {
                tracing::error!(upstream_status = status, body = %body, "telegram api error");
                (StatusCode::BAD_GATEWAY, "Failed to send message to Telegram")
            }
            Self::Internal { message } => {
                tracing::error!(error = %message, "error sending telegram message");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let mut response = (status, Json(ErrorResponse { error })).into_response();
        response.extensions_mut().insert(kind);
        response
    }
}
